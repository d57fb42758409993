//! 费率设置模块
//!
//! - [`SettingsStore`] - 管理员可编辑的实时 `RateSettings`，持久化到 redb
//!
//! 结账时只读取一次快照 (read-then-freeze)，之后的修改不影响已定价订单。

mod store;

pub use store::SettingsStore;
