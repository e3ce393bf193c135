use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PaymentDto};

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PaymentDto>>>, ApiError> {
    let payments = state.store().list_payments().await?;
    let dtos: Vec<PaymentDto> = payments.into_iter().map(PaymentDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
