//! Account registration.

use crate::{
    auth::password::validate_password,
    types::{AppError, RegisterRequest, Result, UserResponse},
    AppState,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing field, weak password, or taken user name")
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let full_name = require_field(&payload.full_name, "full_name")?;
    let user_name = require_field(&payload.user_name, "user_name")?;
    let password = require_field(&payload.password, "password")?;

    validate_password(password)?;

    if state.db.user_by_name(user_name).await?.is_some() {
        return Err(AppError::UsernameTaken);
    }

    let password_hash = state.auth_service.hash_password(password).await?;

    // The pre-check above is advisory; a concurrent registration racing past
    // it is caught by the storage uniqueness constraint and surfaces as the
    // same UsernameTaken failure.
    let user = state
        .db
        .insert_user(user_name, full_name, payload.nickname.as_deref(), &password_hash)
        .await?;

    let location = format!("/api/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    ))
}

/// Registration treats an absent or empty field as missing.
fn require_field<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingField(name)),
    }
}
