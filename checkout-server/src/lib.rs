//! Checkout Server - 外卖平台结账与分账核心
//!
//! # 架构概述
//!
//! - **定价** (`pricing`): 距离配送费、购物车按商家分组、多商家结账定价、收益分账
//! - **购物车** (`cart`): 会话内购物车，限制同时存在的商家数
//! - **结账** (`checkout`): 校验 → 定价 → 分账 → 原子落库
//! - **订单** (`orders`): redb 存储与履约状态流转
//! - **设置** (`settings`): 费率设置 (快照读取)
//! - **报表** (`reports`): 基于已落库分账的收益汇总
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! checkout-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── pricing/       # 纯函数定价核心
//! ├── cart/          # 购物车会话
//! ├── checkout/      # 结账服务与校验
//! ├── orders/        # 订单存储
//! ├── settings/      # 费率设置
//! ├── reports/       # 收益报表
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod orders;
pub mod pricing;
pub mod reports;
pub mod settings;
pub mod utils;

// Re-export 公共类型
pub use checkout::CheckoutService;
pub use core::{Config, Server, ServerState, build_app};
pub use orders::OrderStorage;
pub use settings::SettingsStore;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  ____ _               _               _
 / ___| |__   ___  ___| | _____  _   _| |_
| |   | '_ \ / _ \/ __| |/ / _ \| | | | __|
| |___| | | |  __/ (__|   < (_) | |_| | |_
 \____|_| |_|\___|\___|_|\_\___/ \__,_|\__|
    "#
    );
}
