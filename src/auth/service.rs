//! Credential verification and stateless session tokens

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::store::models::User;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub name: String,
    pub email: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at
}

/// Login form fields. Shape is checked before any lookup occurs; absent
/// fields deserialize as empty and fail the same check.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email)]
    #[schema(example = "user@nextmail.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(example = "123456")]
    pub password: String,
}

/// Minimal authenticated identity returned on a credential match
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Operational failures of the verifier. A credential mismatch is NOT an
/// error: [`AuthService::verify_credentials`] returns `Ok(None)` for both
/// unknown email and wrong password so callers cannot tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to fetch user.")]
    Lookup(#[source] sqlx::Error),

    #[error("Stored credential is malformed")]
    BadStoredHash,

    #[error("Failed to hash password")]
    Hash,

    #[error("Failed to generate token")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Hash a plaintext password into an argon2 PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Password hashing failed: {e}");
            CredentialError::Hash
        })
}

pub struct AuthService {
    pool: PgPool,
    jwt_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_secret: String, session_ttl_hours: i64) -> Self {
        Self {
            pool,
            jwt_secret,
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.num_seconds()
    }

    /// Look up the user by exact email and compare the submitted password
    /// against the stored hash.
    ///
    /// Returns `Ok(None)` on no match without revealing whether the email
    /// exists; only operational failures surface as errors.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, CredentialError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {e}");
            CredentialError::Lookup(e)
        })?;

        let Some(user) = user else {
            tracing::debug!("login failed: user not found");
            return Ok(None);
        };

        let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
            tracing::error!("Invalid stored hash format: {e}");
            CredentialError::BadStoredHash
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(Some(SessionUser {
                id: user.id,
                name: user.name,
                email: user.email,
            })),
            Err(_) => {
                tracing::debug!("login failed: password mismatch");
                Ok(None)
            }
        }
    }

    /// Issue a signed session token carrying the user identity
    pub fn issue_token(&self, user: &SessionUser) -> Result<String, CredentialError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.session_ttl)
            .expect("valid timestamp")
            .timestamp();

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            exp: expiration as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Verify a session token signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(ttl_hours: i64) -> AuthService {
        // connect_lazy performs no I/O; the pool is never used in these tests
        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();
        AuthService::new(pool, "test-secret".to_string(), ttl_hours)
    }

    fn test_user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "User".to_string(),
            email: "user@nextmail.com".to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("123456").unwrap();
        assert!(hash.starts_with("$argon2"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"123456", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"1234567", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("123456").unwrap();
        let b = hash_password("123456").unwrap();
        assert_ne!(a, b, "same password must hash differently per salt");
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let service = test_service(24);
        let user = test_user();

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.name, "User");
        assert_eq!(claims.email, "user@nextmail.com");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let service = test_service(-1);
        let token = service.issue_token(&test_user()).unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_token_rejects_wrong_secret() {
        let issuer = test_service(24);
        let token = issuer.issue_token(&test_user()).unwrap();

        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();
        let other = AuthService::new(pool, "other-secret".to_string(), 24);
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_login_form_shape_validation() {
        let ok = LoginForm {
            email: "user@nextmail.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = LoginForm {
            email: "not-an-email".to_string(),
            password: "123456".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = LoginForm {
            email: "user@nextmail.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}
