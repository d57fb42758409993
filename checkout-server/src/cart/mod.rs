//! 购物车模块
//!
//! - [`CartSession`] - 顾客购物车，按商家上限淘汰最早加入的商家

mod session;

pub use session::{AddItemOutcome, CartSession};
