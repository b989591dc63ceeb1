use chrono::Duration;

use super::errors::TokenError;

/// Signing configuration for [`TokenService`](super::TokenService).
///
/// Resolved once at startup and handed to the service by reference.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenConfig {
    /// Minimum secret size for HS256 (256 bits).
    pub const MIN_SECRET_LEN: usize = 32;

    /// Default token lifetime.
    pub fn default_ttl() -> Duration {
        Duration::hours(24)
    }

    /// Build a token configuration.
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret shorter than 32 bytes or non-positive TTL
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Result<Self, TokenError> {
        let secret = secret.into();

        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(TokenError::InvalidConfig(format!(
                "secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_LEN,
                secret.len()
            )));
        }

        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidConfig(
                "ttl must be positive".to_string(),
            ));
        }

        Ok(Self { secret, ttl })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}
