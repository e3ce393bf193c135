use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::db::{NewUser, UserChanges};
use crate::entities::users::role;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Partial update: absent fields leave the stored attribute unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.store().list_users().await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    if !current.0.is_admin() {
        return Err(ApiError::forbidden());
    }

    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::validation("Missing required fields"));
    };
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Missing required fields"));
    }

    let security = state.config().read().await.security.clone();
    let user = state
        .store()
        .create_user(
            NewUser {
                username,
                email,
                password,
                role: payload.role.unwrap_or_else(|| role::USER.to_string()),
            },
            &security,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if !current.0.is_admin() && current.0.id != user_id {
        return Err(ApiError::forbidden());
    }

    let user = state
        .store()
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if !current.0.is_admin() && current.0.id != user_id {
        return Err(ApiError::forbidden());
    }

    let user = state
        .store()
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    // Role changes are accepted from admins only; anyone else's role field
    // is silently dropped.
    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role: if current.0.is_admin() {
            payload.role
        } else {
            None
        },
        active: None,
    };

    let security = state.config().read().await.security.clone();
    let updated = state.store().update_user(user, changes, &security).await?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    if !current.0.is_admin() {
        return Err(ApiError::forbidden());
    }

    if current.0.id == user_id {
        return Err(ApiError::validation("Cannot delete your own account"));
    }

    let deleted = state.store().delete_user(user_id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::user_not_found(user_id))
    }
}
