//! CRUD over the customer-role subset of users.
//!
//! This route family predates the session middleware and authorizes itself:
//! anonymous and non-admin callers both get 403 via [`AdminUser`]. Deletion
//! is a soft delete - the record is deactivated, never removed.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::AdminUser;
use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::db::{NewUser, UserChanges};
use crate::entities::users::role;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub active: Option<bool>,
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let customers = state.store().list_users_by_role(role::CUSTOMER).await?;
    let dtos: Vec<UserDto> = customers.into_iter().map(UserDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::validation("Missing required fields"));
    };
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Missing required fields"));
    }

    let security = state.config().read().await.security.clone();
    let customer = state
        .store()
        .create_user(
            NewUser {
                username,
                email,
                password,
                role: role::CUSTOMER.to_string(),
            },
            &security,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(customer))),
    ))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<i32>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let customer = state
        .store()
        .get_user_by_role(customer_id, role::CUSTOMER)
        .await?
        .ok_or_else(|| ApiError::customer_not_found(customer_id))?;

    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role: None,
        active: payload.active,
    };

    let security = state.config().read().await.security.clone();
    let updated = state
        .store()
        .update_user(customer, changes, &security)
        .await?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

/// Soft delete: the customer stays in storage with active = false and remains
/// retrievable by id.
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let customer = state
        .store()
        .get_user_by_role(customer_id, role::CUSTOMER)
        .await?
        .ok_or_else(|| ApiError::customer_not_found(customer_id))?;

    state.store().deactivate_user(customer).await?;

    Ok(Json(ApiResponse::success(true)))
}
