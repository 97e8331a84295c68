use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by access tokens.
///
/// `sub` holds the username and `id` the numeric user id. Both are optional on
/// the wire so a token lacking them still decodes; callers decide whether the
/// claim set is usable. `exp` is mandatory and checked during decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// User identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Coarse role string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `username` - Stored as `sub`
    /// * `user_id` - Stored as `id`
    /// * `role` - Stored as `role`
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime; `exp = issued_at + ttl`
    pub fn for_user(
        username: impl ToString,
        user_id: i64,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: Some(username.to_string()),
            id: Some(user_id),
            role: Some(role.to_string()),
            exp: (issued_at + ttl).timestamp(),
            iat: Some(issued_at.timestamp()),
        }
    }
}
