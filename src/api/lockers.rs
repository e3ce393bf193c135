use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LockerDto};

pub async fn list_lockers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LockerDto>>>, ApiError> {
    let lockers = state.store().list_lockers().await?;
    let dtos: Vec<LockerDto> = lockers.into_iter().map(LockerDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
