//! Checkout API Handlers

use axum::{Json, extract::State};
use shared::models::{CheckoutRequest, CheckoutResponse};

use crate::checkout::CheckoutQuote;
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/checkout - 创建订单组 (定价 + 分账 + 原子持久化)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let response = state.checkout.checkout(&payload)?;
    Ok(Json(response))
}

/// POST /api/checkout/quote - 仅定价，不落库
pub async fn quote(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutQuote>> {
    let quote = state.checkout.quote(&payload)?;
    Ok(Json(quote))
}
