//! Reports API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{EarningsQuery, EarningsReport};

use crate::core::ServerState;
use crate::reports::earnings_report;
use crate::utils::{AppError, AppResult};

/// GET /api/reports/earnings?from=&to=&restaurant_id=
pub async fn earnings(
    State(state): State<ServerState>,
    Query(query): Query<EarningsQuery>,
) -> AppResult<Json<EarningsReport>> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::validation(format!(
            "from ({}) must not be after to ({})",
            from, to
        )));
    }
    let report = earnings_report(&state.storage, &query)?;
    Ok(Json(report))
}
