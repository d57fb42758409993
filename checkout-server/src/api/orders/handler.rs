//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{OrderStatus, OrderStatusUpdate, PricedOrder};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - 订单列表 (按创建时间)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PricedOrder>>> {
    let orders = state
        .storage
        .list_orders()?
        .into_iter()
        .filter(|o| {
            query
                .restaurant_id
                .as_ref()
                .is_none_or(|r| &o.restaurant_id == r)
        })
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .collect();
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PricedOrder>> {
    let order = state
        .storage
        .get_order(id)?
        .ok_or_else(|| AppError::order_not_found(id))?;
    Ok(Json(order))
}

/// GET /api/orders/groups/:group_id - 获取多商家订单组
pub async fn get_group(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> AppResult<Json<Vec<PricedOrder>>> {
    let orders = state.storage.get_group(&group_id)?.ok_or_else(|| {
        AppError::with_message(
            shared::ErrorCode::OrderGroupNotFound,
            format!("Order group {} not found", group_id),
        )
        .with_detail("order_group_id", group_id.clone())
    })?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - 更新履约状态 (金额字段不变)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<PricedOrder>> {
    let order = state
        .storage
        .update_status(id, payload.status, now_millis())?;
    tracing::info!(order_id = id, status = ?order.status, "Order status updated");
    Ok(Json(order))
}
