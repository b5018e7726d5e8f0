//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authentication handlers (login).
pub mod auth;
/// Thing and review handlers.
pub mod things;
/// User registration handlers.
pub mod users;
