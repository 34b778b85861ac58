//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ridehail_core::status::UserType;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::request_meta::RequestMeta;
use crate::response::{DataResponse, MessageResponse};
use crate::services::auth::{AuthTokens, RegisterInput, UserInfo};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 20, message = "Phone must be 8 to 20 characters"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image: Option<String>,
    pub user_type: UserType,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthTokens>)> {
    input.validate()?;

    let tokens = state
        .auth
        .register(
            RegisterInput {
                email: input.email,
                phone: input.phone,
                password: input.password,
                first_name: input.first_name,
                last_name: input.last_name,
                profile_image: input.profile_image,
                user_type: input.user_type,
            },
            &meta,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    input.validate()?;
    let tokens = state.auth.login(&input.email, &input.password, &meta).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. Each token works once.
pub async fn refresh(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthTokens>> {
    input.validate()?;
    let tokens = state.auth.refresh(&input.refresh_token, &meta).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated account. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    meta: RequestMeta,
) -> AppResult<StatusCode> {
    state.auth.logout(auth_user.account_id, &meta).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserInfo>>> {
    let info = state.auth.get_user_info(auth_user.account_id).await?;
    Ok(Json(DataResponse { data: info }))
}

/// POST /api/v1/auth/forgot-password
///
/// Same answer whether or not the email is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    state.auth.forgot_password(&input.email, &meta).await?;
    Ok(Json(MessageResponse::ok(
        "If the email is registered, password reset instructions have been sent",
    )))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    meta: RequestMeta,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    state
        .auth
        .reset_password(&input.token, &input.new_password, &meta)
        .await?;
    Ok(Json(MessageResponse::ok("Password reset successfully")))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    meta: RequestMeta,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    state
        .auth
        .change_password(
            auth_user.account_id,
            &input.current_password,
            &input.new_password,
            &meta,
        )
        .await?;
    Ok(Json(MessageResponse::ok("Password changed successfully")))
}
