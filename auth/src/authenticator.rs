use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::JwtSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and JWT handling.
///
/// Holds the immutable signing settings it was built with; nothing is read
/// from the environment after construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    settings: JwtSettings,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed JWT access token
    pub access_token: String,
    /// Absolute expiry embedded in the token
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Validated signing secret, algorithm and token lifetime
    pub fn new(settings: JwtSettings) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(&settings),
            settings,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access token for a user, expiring after the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        username: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        self.issue_token_at(username, user_id, role, Utc::now())
    }

    /// Issue an access token as if the current time were `issued_at`.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_at(
        &self,
        username: &str,
        user_id: i64,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_user(username, user_id, role, issued_at, self.settings.ttl());
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(issued_at);

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has passed
    /// * `InvalidToken` - Signature or payload rejected
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
