use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::entities::users;

/// Session key holding the authenticated user's id.
const SESSION_USER_KEY: &str = "user_id";

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware & extractors
// ============================================================================

/// Gate for the protected route family: a missing session answers 401.
pub async fn require_session(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    if user_id.is_none() {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    }

    Ok(next.run(request).await)
}

/// The request's authenticated user, resolved from the session id through the
/// store. Handlers receive identity explicitly instead of consulting any
/// ambient login state.
pub struct CurrentUser(pub users::Model);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = load_session_user(parts, state).await?;
        user.map(Self)
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
    }
}

/// Admin-tier extractor used by the customers route family, which answers 403
/// for anonymous and non-admin callers alike.
pub struct AdminUser(pub users::Model);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = load_session_user(parts, state).await?;
        match user {
            Some(user) if user.is_admin() => Ok(Self(user)),
            _ => Err(ApiError::forbidden()),
        }
    }
}

async fn load_session_user(
    parts: &mut Parts,
    state: &Arc<AppState>,
) -> Result<Option<users::Model>, ApiError> {
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| ApiError::internal(format!("Session unavailable: {msg}")))?;

    let Some(user_id) = session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
    else {
        return Ok(None);
    };

    // The loader: resolve the stored id back into a full user record.
    let user = state.store().get_user(user_id).await?;
    Ok(user)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
/// Authenticate with username and password, establishes a session on success.
///
/// An unknown username and a wrong password produce the same generic error so
/// the response does not reveal which field was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .store()
        .verify_credentials(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    let Some(user) = user else {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    };

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::Span::current().record("user_id", user.id);
    tracing::info!("User {} logged in", user.username);

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// POST /api/auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Result<Json<ApiResponse<bool>>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to clear session: {e}")))?;
    Ok(Json(ApiResponse::success(true)))
}

/// GET /api/auth/me
/// Get current user information (requires authentication)
pub async fn get_current_user(
    current: CurrentUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    Ok(Json(ApiResponse::success(UserDto::from(current.0))))
}
