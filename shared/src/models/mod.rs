//! Data models
//!
//! Shared between checkout-server and its clients (via API).
//! Monetary fields are `rust_decimal::Decimal`; percentages are 0-100.

pub mod cart;
pub mod checkout;
pub mod geo;
pub mod money;
pub mod order;
pub mod payment;
pub mod rate_settings;
pub mod report;

// Re-exports
pub use cart::*;
pub use checkout::*;
pub use geo::*;
pub use money::*;
pub use order::*;
pub use payment::*;
pub use rate_settings::*;
pub use report::*;
