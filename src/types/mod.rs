use chrono::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::client::{Review, Thing, User};

// ============= API Request/Response Types =============

/// Body of `POST /api/users`.
///
/// Every field is optional at the deserialization layer so that missing-field
/// errors can name the exact field instead of surfacing a serde parse error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Successful login response. The token is the only thing a caller gets.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenResponse {
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

/// A user as serialized to callers. Never carries the password hash; an
/// absent nickname is rendered as an empty string even though it is stored
/// as NULL.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub user_name: String,
    pub full_name: String,
    pub nickname: String,
    pub date_created: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            full_name: u.full_name,
            nickname: u.nickname.unwrap_or_default(),
            date_created: format_timestamp(u.date_created),
        }
    }
}

/// A shared thing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThingResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub date_created: String,
}

impl From<Thing> for ThingResponse {
    fn from(t: Thing) -> Self {
        Self {
            id: t.id,
            title: t.title,
            content: t.content,
            image: t.image,
            date_created: format_timestamp(t.date_created),
        }
    }
}

/// A review left on a thing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub thing_id: i64,
    pub user_id: i64,
    pub date_created: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            rating: r.rating,
            text: r.text,
            thing_id: r.thing_id,
            user_id: r.user_id,
            date_created: format_timestamp(r.date_created),
        }
    }
}

/// Body of `POST /api/things/{thing_id}/reviews`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewReviewRequest {
    pub rating: Option<i64>,
    pub text: Option<String>,
}

fn format_timestamp(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|d| d.to_rfc3339())
        .unwrap_or_default()
}

// ============= Authentication Types =============

/// Claims embedded in a signed session token.
///
/// `sub` is the user name, `user_id` the storage-assigned id. Tokens carry no
/// expiry claim: their lifetime is bounded only by the signing secret, and
/// rotating the secret invalidates every outstanding token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub iat: usize,
}

// ============= Error Types =============

/// Everything that can go wrong inside a request.
///
/// Validation failures map to 400 with a specific message; authentication and
/// authorization failures map to 401 with a deliberately vague one. Storage
/// and crypto faults are logged with their cause and surface as an opaque
/// 500. The response body is always `{"error": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error("Password must be longer than 8 characters")]
    PasswordTooShort,

    #[error("Password must be less than 72 characters")]
    PasswordTooLong,

    #[error("Password must not start or end with empty spaces")]
    PasswordPaddedWithSpaces,

    #[error("Password must contain 1 upper case, lower case, number and special character")]
    PasswordNotComplex,

    #[error("User name already taken")]
    UsernameTaken,

    #[error("Incorrect user_name or password")]
    InvalidCredentials,

    #[error("Missing basic token")]
    MissingBasicToken,

    #[error("Missing bearer token")]
    MissingBearerToken,

    #[error("Unauthorized request")]
    UnauthorizedRequest,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Thing doesn't exist")]
    ThingNotFound,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::MissingField(_)
            | AppError::PasswordTooShort
            | AppError::PasswordTooLong
            | AppError::PasswordPaddedWithSpaces
            | AppError::PasswordNotComplex
            | AppError::UsernameTaken
            | AppError::InvalidCredentials
            | AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::MissingBasicToken | AppError::MissingBearerToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            // Whatever the specific token or credential fault, the wire
            // answer stays "Unauthorized request".
            AppError::UnauthorizedRequest | AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                AppError::UnauthorizedRequest.to_string(),
            ),

            AppError::ThingNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::Database(ref cause) | AppError::Internal(ref cause) => {
                tracing::error!(%cause, "internal fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
