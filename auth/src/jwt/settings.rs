use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use super::errors::JwtError;

/// Immutable signing configuration for issued tokens.
///
/// Built once at startup from external configuration and handed to the
/// [`JwtHandler`](super::JwtHandler). Only HMAC algorithms are accepted since
/// the same secret both signs and verifies.
#[derive(Clone)]
pub struct JwtSettings {
    secret: Vec<u8>,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtSettings {
    /// Validate and build signing settings.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `algorithm` - Algorithm name (`HS256`, `HS384` or `HS512`)
    /// * `expiration_hours` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Unknown or non-HMAC algorithm
    /// * `InvalidExpiration` - Lifetime is zero or negative
    pub fn new(
        secret: impl AsRef<[u8]>,
        algorithm: &str,
        expiration_hours: i64,
    ) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let algorithm = match Algorithm::from_str(algorithm.trim()) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(JwtError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        if expiration_hours <= 0 {
            return Err(JwtError::InvalidExpiration(expiration_hours));
        }

        Ok(Self {
            secret: secret.to_vec(),
            algorithm,
            ttl: Duration::hours(expiration_hours),
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Lifetime added to the issuance time to compute `exp`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// Never print the secret.
impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}
