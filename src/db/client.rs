use crate::types::{AppError, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row, Value};

/// libsql-backed storage client.
///
/// Supports in-memory and file-backed local databases, plus remote Turso
/// behind the `turso` feature. Schema is created on first connect; username
/// uniqueness is enforced by the storage layer, not re-checked in code.
pub struct DbClient {
    db: Database,
}

impl DbClient {
    /// In-memory database, used by tests and throwaway runs.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// File-backed local database.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let client = Self { db };
        client.initialize_schema().await?;

        Ok(client)
    }

    /// Remote Turso database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        let client = Self { db };
        client.initialize_schema().await?;

        Ok(client)
    }

    pub fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // Users table. The UNIQUE constraint on user_name is what resolves a
        // race between two concurrent registrations of the same name.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_name TEXT UNIQUE NOT NULL,
                full_name TEXT NOT NULL,
                nickname TEXT,
                password TEXT NOT NULL,
                date_created INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Things table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS things (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                image TEXT,
                date_created INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create things table: {}", e)))?;

        // Reviews table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                rating INTEGER NOT NULL,
                text TEXT NOT NULL,
                thing_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                date_created INTEGER NOT NULL,
                FOREIGN KEY (thing_id) REFERENCES things(id),
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create reviews table: {}", e)))?;

        Ok(())
    }

    // User operations

    /// Insert a new user and return the stored record.
    ///
    /// A violation of the user_name uniqueness constraint surfaces as
    /// [`AppError::UsernameTaken`] so concurrent registrations collapse to
    /// the same failure a pre-checked duplicate produces.
    pub async fn insert_user(
        &self,
        user_name: &str,
        full_name: &str,
        nickname: Option<&str>,
        password_hash: &str,
    ) -> Result<User> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let nickname_value = match nickname {
            Some(n) => Value::Text(n.to_owned()),
            None => Value::Null,
        };

        conn.execute(
            "INSERT INTO users (user_name, full_name, nickname, password, date_created)
             VALUES (?, ?, ?, ?, ?)",
            (user_name, full_name, nickname_value, password_hash, now),
        )
        .await
        .map_err(|e| {
            let cause = e.to_string();
            if cause.contains("UNIQUE constraint failed") {
                AppError::UsernameTaken
            } else {
                AppError::Database(format!("Failed to insert user: {}", cause))
            }
        })?;

        Ok(User {
            id: conn.last_insert_rowid(),
            user_name: user_name.to_owned(),
            full_name: full_name.to_owned(),
            nickname: nickname.map(str::to_owned),
            password_hash: password_hash.to_owned(),
            date_created: now,
        })
    }

    pub async fn user_by_name(&self, user_name: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, user_name, full_name, nickname, password, date_created
                 FROM users WHERE user_name = ?",
                [user_name],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, user_name, full_name, nickname, password, date_created
                 FROM users WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    // Thing operations

    pub async fn insert_thing(
        &self,
        title: &str,
        content: &str,
        image: Option<&str>,
    ) -> Result<Thing> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let image_value = match image {
            Some(i) => Value::Text(i.to_owned()),
            None => Value::Null,
        };

        conn.execute(
            "INSERT INTO things (title, content, image, date_created)
             VALUES (?, ?, ?, ?)",
            (title, content, image_value, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert thing: {}", e)))?;

        Ok(Thing {
            id: conn.last_insert_rowid(),
            title: title.to_owned(),
            content: content.to_owned(),
            image: image.map(str::to_owned),
            date_created: now,
        })
    }

    pub async fn list_things(&self) -> Result<Vec<Thing>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, title, content, image, date_created FROM things ORDER BY id",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query things: {}", e)))?;

        let mut things = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            things.push(thing_from_row(&row)?);
        }

        Ok(things)
    }

    pub async fn thing_by_id(&self, id: i64) -> Result<Option<Thing>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, title, content, image, date_created FROM things WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query thing: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(thing_from_row(&row)?)),
            None => Ok(None),
        }
    }

    // Review operations

    pub async fn insert_review(
        &self,
        rating: i64,
        text: &str,
        thing_id: i64,
        user_id: i64,
    ) -> Result<Review> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO reviews (rating, text, thing_id, user_id, date_created)
             VALUES (?, ?, ?, ?, ?)",
            (rating, text, thing_id, user_id, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert review: {}", e)))?;

        Ok(Review {
            id: conn.last_insert_rowid(),
            rating,
            text: text.to_owned(),
            thing_id,
            user_id,
            date_created: now,
        })
    }

    pub async fn reviews_for_thing(&self, thing_id: i64) -> Result<Vec<Review>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, rating, text, thing_id, user_id, date_created
                 FROM reviews WHERE thing_id = ? ORDER BY id",
                [thing_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query reviews: {}", e)))?;

        let mut reviews = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            reviews.push(review_from_row(&row)?);
        }

        Ok(reviews)
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        user_name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        full_name: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        nickname: optional_text(row, 3)?,
        password_hash: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        date_created: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn thing_from_row(row: &Row) -> Result<Thing> {
    Ok(Thing {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        title: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        content: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        image: optional_text(row, 3)?,
        date_created: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn review_from_row(row: &Row) -> Result<Review> {
    Ok(Review {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        rating: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        text: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        thing_id: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        user_id: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        date_created: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn optional_text(row: &Row, index: i32) -> Result<Option<String>> {
    match row
        .get_value(index)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Text(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => Err(AppError::Database(format!(
            "Unexpected column type at index {}: {:?}",
            index, other
        ))),
    }
}

/// A stored user row. Held only for the duration of one operation; the
/// serialized form sent to callers ([`crate::types::UserResponse`]) never
/// includes `password_hash`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub password_hash: String,
    pub date_created: i64,
}

/// A stored thing row.
#[derive(Debug, Clone)]
pub struct Thing {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub date_created: i64,
}

/// A stored review row.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub thing_id: i64,
    pub user_id: i64,
    pub date_created: i64,
}
