//! # Trove - Community Resource-Sharing API
//!
//! A resource-sharing API server built in Rust: accounts with validated,
//! Argon2-hashed credentials, stateless HS256 session tokens, and per-request
//! credential gates in front of every protected route.
//!
//! ## Overview
//!
//! Trove can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `trove-server` binary
//! 2. **As a library** - Mount [`api::routes::create_router`] inside your own
//!    Axum application
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trove::{api::routes::create_router, auth::AuthService, db::DatabaseProvider, AppState};
//! use trove::utils::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let db = DatabaseProvider::from_env().create_client().await?;
//!     let auth_service = AuthService::new(config.auth.jwt_secret.clone(), config.auth.hash_time_cost)?;
//!
//!     let state = AppState {
//!         config: Arc::new(config),
//!         db: Arc::from(db),
//!         auth_service: Arc::new(auth_service),
//!     };
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password policy, credential hashing, session tokens, gates
//! - [`db`] - Storage abstraction (SQLite, Turso)
//! - [`types`] - Common types and error handling
//! - [`utils`] - Environment configuration
//!
//! ## Security Model
//!
//! Authentication failures are deliberately uniform on the wire: a caller
//! cannot distinguish an unknown user from a wrong password, nor one bad
//! token from another. Stored password hashes never appear in any serialized
//! response.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password policy, hashing, tokens, and request gates.
pub mod auth;
/// Command-line interface for the server binary.
pub mod cli;
/// Database clients (SQLite, Turso).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::AuthService;
pub use db::{DatabaseClient, DatabaseProvider, DbClient};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration
    pub config: Arc<Config>,
    /// Storage accessor
    pub db: Arc<dyn DatabaseClient>,
    /// Authentication service
    pub auth_service: Arc<AuthService>,
}
