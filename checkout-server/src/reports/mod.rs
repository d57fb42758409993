//! 收益报表模块
//!
//! - [`earnings`] - 按时间段 / 商家汇总已持久化的分账金额

pub mod earnings;

pub use earnings::{build_earnings_report, earnings_report};
