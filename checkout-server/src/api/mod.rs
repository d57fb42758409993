//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`checkout`] - 结账 / 报价
//! - [`orders`] - 订单查询与状态流转
//! - [`settings`] - 费率设置
//! - [`reports`] - 收益报表

use axum::Router;

use crate::core::ServerState;

pub mod checkout;
pub mod health;
pub mod orders;
pub mod reports;
pub mod settings;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(settings::router())
        .merge(reports::router())
}
