use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::config::TokenConfig;
use super::errors::TokenError;
use super::errors::TokenInvalid;

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256-signed identity tokens.
///
/// Tokens are stateless: nothing is stored server-side and a token stays valid
/// until its expiry. There is no revocation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from resolved configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: Algorithm::HS256,
            ttl: config.ttl(),
        }
    }

    /// Issue a token for an account, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, account_id: &str, email: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(account_id, email, Utc::now())
    }

    /// Issue a token as if it were signed at `issued_at`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        account_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = IdentityClaims::for_account(account_id, email, issued_at, self.ttl);
        let header = Header::new(self.algorithm);

        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// The header algorithm must be exactly HS256; anything else is treated as
    /// forged. Expiry is checked with zero leeway, after the signature.
    ///
    /// # Errors
    /// * `Forged` - Signature mismatch or unexpected algorithm
    /// * `Expired` - `exp` is in the past
    /// * `Malformed` - Not a JWS, bad encoding, or missing claims
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenInvalid> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<IdentityClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenInvalid::Expired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenInvalid::Forged
                    }
                    _ => TokenInvalid::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
