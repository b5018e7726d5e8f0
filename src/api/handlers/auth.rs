//! Session creation (login).

use crate::{
    types::{AppError, AuthTokenResponse, LoginRequest, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Login with user name and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthTokenResponse),
        (status = 400, description = "Missing field or incorrect credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthTokenResponse>> {
    let user_name = payload
        .user_name
        .as_deref()
        .ok_or(AppError::MissingField("user_name"))?;
    let password = payload
        .password
        .as_deref()
        .ok_or(AppError::MissingField("password"))?;

    // Unknown user and wrong password must be indistinguishable to the
    // caller; the distinction only reaches the log.
    let user = state.db.user_by_name(user_name).await?.ok_or_else(|| {
        tracing::warn!(user_name, "login attempt for unknown user");
        AppError::InvalidCredentials
    })?;

    if !state
        .auth_service
        .verify_password(password, &user.password_hash)
        .await?
    {
        tracing::warn!(user_name, "login attempt with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let auth_token = state.auth_service.create_jwt(&user.user_name, user.id)?;

    Ok(Json(AuthTokenResponse { auth_token }))
}
