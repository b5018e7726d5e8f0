//! Authentication and request gating.
//!
//! This module provides the identity infrastructure for the Trove API:
//! password policy enforcement, Argon2id credential hashing, HS256 session
//! tokens, and the per-request gates that protect resource routes.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Registration password policy
//! - [`auth::jwt`](crate::auth::jwt) - Token signing/verification and password hashing
//! - [`auth::middleware`](crate::auth::middleware) - Axum layers and extractors for gated routes
//!
//! # Security Properties
//!
//! - **Password Hashing**: Argon2id with a per-call random salt; the stored
//!   hash is never serialized back to callers
//! - **Session Tokens**: HS256-signed, single allowed algorithm; unsigned or
//!   differently-signed tokens are rejected outright
//! - **Uniform failures**: unknown-user and wrong-password collapse to one
//!   wire-level error in both the login flow and the basic gate
//!
//! # Usage
//!
//! Protected routers take a gate as a middleware layer:
//!
//! ```ignore
//! use axum::{middleware, Router, routing::get};
//!
//! let things = Router::new()
//!     .route("/api/things", get(list_things))
//!     .layer(middleware::from_fn_with_state(state, require_basic_auth));
//! ```
//!
//! Handlers that need the caller's identity extract it:
//!
//! ```ignore
//! async fn create_review(AuthUser(user): AuthUser, /* ... */) { /* ... */ }
//! ```

/// Session token and password hashing services.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Password policy validation.
pub mod password;

pub use jwt::AuthService;
pub use middleware::{require_basic_auth, require_bearer_auth, AuthUser};
pub use password::validate_password;
