//! Rate Settings API Handlers

use axum::{Json, extract::State};
use shared::models::{RateSettings, RateSettingsUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/settings - 获取当前费率设置
pub async fn get(State(state): State<ServerState>) -> Json<RateSettings> {
    Json(state.settings.snapshot())
}

/// PUT /api/settings - 部分更新费率设置
///
/// 只影响之后的结账，已创建订单的金额与分账不变。
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<RateSettingsUpdate>,
) -> AppResult<Json<RateSettings>> {
    let settings = state.settings.update(payload)?;
    Ok(Json(settings))
}
