use thiserror::Error;

use crate::orders::StorageError;

/// 服务器启动 / 运行错误
///
/// 请求级错误使用 [`shared::error::AppError`]，这里只处理进程级故障。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("工作目录创建失败: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error("存储初始化失败: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP 服务错误: {0}")]
    Http(#[source] std::io::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
