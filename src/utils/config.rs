use serde::Deserialize;
use std::env;

/// Process-wide configuration, loaded once at startup from the environment
/// (with `.env` support). The signing secret has no default on purpose:
/// starting without one is a deployment error, not something to paper over.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing session tokens. Rotating it invalidates every
    /// outstanding token; there is no migration path.
    pub jwt_secret: String,
    /// Argon2 time cost for password hashing.
    pub hash_time_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")?,
                hash_time_cost: env::var("HASH_TIME_COST")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()?,
            },
        })
    }
}
