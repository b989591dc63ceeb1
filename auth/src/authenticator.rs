use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::password::PasswordPolicy;
use crate::password::PolicyViolation;
use crate::token::IdentityClaims;
use crate::token::IssuedToken;
use crate::token::TokenConfig;
use crate::token::TokenError;
use crate::token::TokenInvalid;
use crate::token::TokenService;

/// Authentication coordinator combining password policy, hashing, and tokens.
///
/// Holds only immutable configuration and is safe to share across tasks.
pub struct Authenticator {
    password_policy: PasswordPolicy,
    credential_hasher: CredentialHasher,
    token_service: TokenService,
}

/// Errors preparing a new password for storage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    #[error("Weak password: {0}")]
    WeakPassword(#[from] PolicyViolation),

    #[error("Password error: {0}")]
    Hashing(#[from] PasswordError),
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenIssuance(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with the default policy and hashing cost.
    ///
    /// # Arguments
    /// * `token_config` - Resolved token signing configuration
    pub fn new(token_config: &TokenConfig) -> Self {
        Self::with_hasher(token_config, CredentialHasher::new())
    }

    /// Create an authenticator with an explicitly configured hasher.
    pub fn with_hasher(token_config: &TokenConfig, credential_hasher: CredentialHasher) -> Self {
        Self {
            password_policy: PasswordPolicy::new(),
            credential_hasher,
            token_service: TokenService::new(token_config),
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Validate a new password against the policy and hash it for storage.
    ///
    /// # Errors
    /// * `WeakPassword` - First policy rule the password failed
    /// * `Hashing` - Hashing operation failed
    pub fn hash_new_password(&self, password: &str) -> Result<String, CredentialError> {
        self.password_policy.validate(password)?;
        Ok(self.credential_hasher.hash(password)?)
    }

    /// Verify a password against a stored hash and issue a token.
    ///
    /// A stored hash that cannot be parsed counts as a mismatch.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssuance` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
        email: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        let matches = self
            .credential_hasher
            .verify(password, stored_hash)
            .unwrap_or(false);

        if !matches {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_service.issue(account_id, email)?)
    }

    /// Validate a bearer token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenInvalid> {
        self.token_service.verify(token)
    }
}
