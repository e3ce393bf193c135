use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, StatsDto};
use crate::entities::{lockers, payments};

/// GET /api/stats
/// Aggregate dashboard counters, scanned fresh on every request.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<StatsDto>>, ApiError> {
    let store = state.store();

    let users = store.count_users().await?;
    let active_lockers = store
        .count_lockers_by_status(lockers::status::OCCUPIED)
        .await?;
    let total_lockers = store.count_lockers().await?;
    let pending_payments = store
        .count_payments_by_status(payments::status::PENDING)
        .await?;

    Ok(Json(ApiResponse::success(StatsDto {
        users,
        active_lockers,
        total_lockers,
        pending_payments,
    })))
}
