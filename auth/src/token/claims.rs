use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity asserted by a bearer token.
///
/// Serialized with the RFC 7519 registered names (`sub`, `iat`, `exp`) plus a
/// private `email` claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Account identifier
    #[serde(rename = "sub")]
    pub account_id: String,

    pub email: String,

    /// Issued at (Unix timestamp)
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Expiration time (Unix timestamp)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl IdentityClaims {
    /// Create claims for an account, expiring `ttl` after `issued_at`.
    pub fn for_account(
        account_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            account_id: account_id.to_string(),
            email: email.to_string(),
            issued_at: issued_at.timestamp(),
            expires_at: expiration.timestamp(),
        }
    }

    /// Expiration as a UTC datetime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.expires_at, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if the claims are expired at the given Unix timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at < current_timestamp
    }
}
