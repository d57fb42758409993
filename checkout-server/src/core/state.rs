use std::path::PathBuf;
use std::time::Instant;

use crate::checkout::CheckoutService;
use crate::core::{Config, Result, ServerError};
use crate::orders::{OrderStorage, StorageResult};
use crate::settings::SettingsStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝 (内部为 Arc)，可以直接作为 axum State 使用。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | storage | OrderStorage | redb 订单存储 |
/// | settings | SettingsStore | 实时费率设置 |
/// | checkout | CheckoutService | 结账服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单存储 (redb)
    pub storage: OrderStorage,
    /// 费率设置
    pub settings: SettingsStore,
    /// 结账服务
    pub checkout: CheckoutService,
    started_at: Instant,
}

impl ServerState {
    /// 基于已打开的存储创建状态
    pub fn new(config: Config, storage: OrderStorage) -> StorageResult<Self> {
        let settings = SettingsStore::load(storage.clone())?;
        let checkout = CheckoutService::new(storage.clone(), settings.clone());
        Ok(Self {
            config,
            storage,
            settings,
            checkout,
            started_at: Instant::now(),
        })
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录 (work_dir/database)
    /// 2. 打开数据库 (work_dir/database/checkout.redb)
    /// 3. 加载费率设置
    pub fn initialize(config: &Config) -> Result<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(ServerError::WorkDir)?;
        }

        let storage = OrderStorage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Order storage opened");

        Ok(Self::new(config.clone(), storage)?)
    }

    /// 内存数据库状态 (测试用)
    pub fn in_memory(config: Config) -> StorageResult<Self> {
        Self::new(config, OrderStorage::open_in_memory()?)
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
