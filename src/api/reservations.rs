use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ReservationDto};

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let reservations = state.store().list_reservations().await?;
    let dtos: Vec<ReservationDto> = reservations
        .into_iter()
        .map(ReservationDto::from)
        .collect();
    Ok(Json(ApiResponse::success(dtos)))
}
