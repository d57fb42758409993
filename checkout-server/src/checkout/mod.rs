//! 结账模块
//!
//! - [`validation`] - 请求校验 (定价前执行)
//! - [`service`] - 定价、分账、整组原子持久化

pub mod service;
pub mod validation;

pub use service::{CheckoutQuote, CheckoutService, QuotedOrder, assemble_orders};
pub use validation::{parse_payment_method, validate_checkout, validate_delivery};
