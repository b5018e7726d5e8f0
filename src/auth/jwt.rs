use crate::types::{AppError, Claims, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm as HashAlgorithm, Argon2, Params, Version,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Authentication service for session token management and password hashing.
///
/// Provides secure password hashing using Argon2id and session token
/// generation/verification using HS256. The signing secret and the hashing
/// time cost are process-wide configuration loaded once at startup; rotating
/// the secret invalidates every previously issued token.
pub struct AuthService {
    jwt_secret: String,
    hash_params: Params,
}

impl AuthService {
    /// Creates a new AuthService with the given configuration.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing tokens (should be at least 32 chars)
    /// * `hash_time_cost` - Argon2 time cost (number of passes over memory)
    pub fn new(jwt_secret: String, hash_time_cost: u32) -> Result<Self> {
        let hash_params = Params::new(
            Params::DEFAULT_M_COST,
            hash_time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Invalid hash cost parameters: {}", e)))?;

        Ok(Self {
            jwt_secret,
            hash_params,
        })
    }

    /// Hashes a password using Argon2id with a fresh random salt.
    ///
    /// Returns a PHC-formatted hash string. The work happens on the blocking
    /// pool so other requests keep making progress while a hash is computed.
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let params = self.hash_params.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(HashAlgorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// Verifies a password against a stored Argon2 hash.
    ///
    /// The comparison is delegated to the argon2 crate, which recomputes the
    /// hash under the parameters embedded in the PHC string and compares in
    /// constant time. A malformed stored hash is an internal fault, never a
    /// credential failure.
    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash)
                .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
    }

    /// Issues a signed session token for a user.
    ///
    /// The subject is the user name and the payload carries the storage id.
    /// No expiry claim is set; token lifetime is bounded by the secret alone.
    pub fn create_jwt(&self, subject: &str, user_id: i64) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            user_id,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a session token and returns its claims.
    ///
    /// Rejects anything not signed with HS256 under the current secret:
    /// foreign secrets, other algorithms (including unsigned "none" tokens),
    /// and structurally malformed input all fail as [`AppError::TokenInvalid`].
    pub fn verify_jwt(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim, so expiry must not be required.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    fn create_test_service() -> AuthService {
        AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            2,
        )
        .expect("should build auth service")
    }

    #[tokio::test]
    async fn test_password_hashing() {
        let service = create_test_service();
        let password = "aaAA11@@test";

        let hash = service
            .hash_password(password)
            .await
            .expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format (starts with $argon2)
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let service = create_test_service();
        let password = "aaAA11@@test";

        let first = service.hash_password(password).await.expect("should hash");
        let second = service.hash_password(password).await.expect("should hash");

        // Per-call random salts mean identical inputs never collide
        assert_ne!(first, second, "salted hashes should differ");
    }

    #[tokio::test]
    async fn test_password_verification_success() {
        let service = create_test_service();
        let password = "secure_password_456";

        let hash = service
            .hash_password(password)
            .await
            .expect("should hash password");
        let is_valid = service
            .verify_password(password, &hash)
            .await
            .expect("should verify");

        assert!(is_valid, "correct password should verify successfully");
    }

    #[tokio::test]
    async fn test_password_verification_failure() {
        let service = create_test_service();
        let password = "correct_password";
        let wrong_password = "wrong_password";

        let hash = service
            .hash_password(password)
            .await
            .expect("should hash password");
        let is_valid = service
            .verify_password(wrong_password, &hash)
            .await
            .expect("should verify");

        assert!(!is_valid, "wrong password should fail verification");
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_internal_fault() {
        let service = create_test_service();

        let result = service.verify_password("whatever", "not-a-phc-string").await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_token_round_trip() {
        let service = create_test_service();

        let token = service.create_jwt("ab", 42).expect("should sign");
        let claims = service.verify_jwt(&token).expect("should verify");

        assert_eq!(claims.sub, "ab", "subject should match user name");
        assert_eq!(claims.user_id, 42, "payload should carry the user id");

        let now = chrono::Utc::now().timestamp() as usize;
        assert!(
            claims.iat <= now && claims.iat >= now - 5,
            "iat should be current timestamp"
        );
    }

    #[test]
    fn test_token_verification_invalid_token() {
        let service = create_test_service();

        let result = service.verify_jwt("invalid.token.here");

        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_token_verification_wrong_secret() {
        let service1 = AuthService::new("secret-one-that-is-32-chars-long".to_string(), 2)
            .expect("should build");
        let service2 = AuthService::new("secret-two-that-is-32-chars-long".to_string(), 2)
            .expect("should build");

        let token = service1.create_jwt("ab", 1).expect("should sign");
        let result = service2.verify_jwt(&token);

        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let service = create_test_service();
        let token = service.create_jwt("ab", 1).expect("should sign");

        // Rewrite the payload segment, keeping the original signature.
        let mut parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        let forged_claims = serde_json::json!({
            "sub": "ab",
            "user_id": 999,
            "iat": 0,
        });
        let forged = URL_SAFE_NO_PAD.encode(forged_claims.to_string());
        parts[1] = &forged;
        let tampered = parts.join(".");

        assert!(matches!(
            service.verify_jwt(&tampered),
            Err(AppError::TokenInvalid)
        ));
    }

    #[test]
    fn test_other_algorithms_are_rejected() {
        let service = create_test_service();

        // Same secret, different HMAC width: must not verify.
        let claims = Claims {
            sub: "ab".to_string(),
            user_id: 1,
            iat: 0,
        };
        let hs384 = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret("test-secret-key-that-is-at-least-32-chars".as_bytes()),
        )
        .expect("should sign");

        assert!(matches!(
            service.verify_jwt(&hs384),
            Err(AppError::TokenInvalid)
        ));
    }

    #[test]
    fn test_unsigned_tokens_are_rejected() {
        let service = create_test_service();

        // Hand-rolled alg=none token with an empty signature segment.
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"ab","user_id":1,"iat":0}"#);
        let unsigned = format!("{}.{}.", header, payload);

        assert!(matches!(
            service.verify_jwt(&unsigned),
            Err(AppError::TokenInvalid)
        ));
    }
}
