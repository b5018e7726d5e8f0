//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Trove, built on the Axum web
//! framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Users (`/api/users`)
//! - `POST /api/users` - Register a new account
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/login` - Login and receive a session token
//!
//! ## Things (`/api/things`, protected)
//! - `GET /api/things` - List things (basic credentials)
//! - `GET /api/things/{thing_id}` - Get one thing (basic credentials)
//! - `GET /api/things/{thing_id}/reviews` - Reviews for a thing (basic credentials)
//! - `POST /api/things/{thing_id}/reviews` - Review a thing (bearer token)
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected reads expect basic credentials, writes expect a session token:
//! ```text
//! Authorization: Basic <base64(user_name:password)>
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

use utoipa::OpenApi;

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI document for the Trove API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::users::register,
        handlers::auth::login,
        handlers::things::list_things,
        handlers::things::get_thing,
        handlers::things::list_thing_reviews,
        handlers::things::create_thing_review,
    ),
    components(schemas(
        crate::types::RegisterRequest,
        crate::types::UserResponse,
        crate::types::LoginRequest,
        crate::types::AuthTokenResponse,
        crate::types::ThingResponse,
        crate::types::ReviewResponse,
        crate::types::NewReviewRequest,
    )),
    tags(
        (name = "users", description = "Account registration"),
        (name = "auth", description = "Session creation"),
        (name = "things", description = "Gated resource access"),
    )
)]
pub struct ApiDoc;
