//! Database abstraction traits
//!
//! This module provides the [`DatabaseClient`] trait that abstracts over the
//! available backends (in-memory SQLite, file-based SQLite, remote Turso).
//! Flows receive storage as `Arc<dyn DatabaseClient>` rather than reaching
//! for any ambient connection object.

use crate::types::Result;
use async_trait::async_trait;

pub use super::client::{Review, Thing, User};

/// Database provider configuration
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<Box<dyn DatabaseClient>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::client::DbClient::new_memory().await?;
                Ok(Box::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::client::DbClient::new_local(path).await?;
                Ok(Box::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::client::DbClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Box::new(client))
            }
        }
    }

    /// Create from environment variables or use defaults
    pub fn from_env() -> Self {
        // Check for Turso configuration first
        #[cfg(feature = "turso")]
        {
            if let (Ok(url), Ok(token)) = (
                std::env::var("TURSO_DATABASE_URL"),
                std::env::var("TURSO_AUTH_TOKEN"),
            ) {
                if !url.is_empty() && !token.is_empty() {
                    return DatabaseProvider::Turso {
                        url,
                        auth_token: token,
                    };
                }
            }
        }

        // Check for SQLite file path
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            if !path.is_empty() && path != ":memory:" {
                return DatabaseProvider::SQLite { path };
            }
        }

        // Default to in-memory
        DatabaseProvider::Memory
    }
}

/// Abstract trait for database operations
///
/// This trait defines all storage operations the flows need. The registration
/// and login flows and the access gate depend on it, never on a concrete
/// backend.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    // ============== User Operations ==============

    /// Insert a new user, returning the stored record with its assigned id
    async fn insert_user(
        &self,
        user_name: &str,
        full_name: &str,
        nickname: Option<&str>,
        password_hash: &str,
    ) -> Result<User>;

    /// Get a user by user name
    async fn user_by_name(&self, user_name: &str) -> Result<Option<User>>;

    /// Get a user by ID
    async fn user_by_id(&self, id: i64) -> Result<Option<User>>;

    // ============== Thing Operations ==============

    /// Insert a new thing
    async fn insert_thing(
        &self,
        title: &str,
        content: &str,
        image: Option<&str>,
    ) -> Result<Thing>;

    /// List all things
    async fn list_things(&self) -> Result<Vec<Thing>>;

    /// Get a thing by ID
    async fn thing_by_id(&self, id: i64) -> Result<Option<Thing>>;

    // ============== Review Operations ==============

    /// Insert a review for a thing
    async fn insert_review(
        &self,
        rating: i64,
        text: &str,
        thing_id: i64,
        user_id: i64,
    ) -> Result<Review>;

    /// Get all reviews for a thing
    async fn reviews_for_thing(&self, thing_id: i64) -> Result<Vec<Review>>;
}

// ============== Implement DatabaseClient for DbClient ==============

#[async_trait]
impl DatabaseClient for super::client::DbClient {
    async fn insert_user(
        &self,
        user_name: &str,
        full_name: &str,
        nickname: Option<&str>,
        password_hash: &str,
    ) -> Result<User> {
        super::client::DbClient::insert_user(self, user_name, full_name, nickname, password_hash)
            .await
    }

    async fn user_by_name(&self, user_name: &str) -> Result<Option<User>> {
        super::client::DbClient::user_by_name(self, user_name).await
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        super::client::DbClient::user_by_id(self, id).await
    }

    async fn insert_thing(
        &self,
        title: &str,
        content: &str,
        image: Option<&str>,
    ) -> Result<Thing> {
        super::client::DbClient::insert_thing(self, title, content, image).await
    }

    async fn list_things(&self) -> Result<Vec<Thing>> {
        super::client::DbClient::list_things(self).await
    }

    async fn thing_by_id(&self, id: i64) -> Result<Option<Thing>> {
        super::client::DbClient::thing_by_id(self, id).await
    }

    async fn insert_review(
        &self,
        rating: i64,
        text: &str,
        thing_id: i64,
        user_id: i64,
    ) -> Result<Review> {
        super::client::DbClient::insert_review(self, rating, text, thing_id, user_id).await
    }

    async fn reviews_for_thing(&self, thing_id: i64) -> Result<Vec<Review>> {
        super::client::DbClient::reviews_for_thing(self, thing_id).await
    }
}
