use auth::AuthenticationError;
use auth::CredentialError;
use auth::PolicyViolation;
use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures reported by an account directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for registration and signin.
///
/// `InvalidCredentials` is a unit variant: an unknown email and
/// a wrong password produce the same value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Weak password: {0}")]
    WeakPassword(#[from] PolicyViolation),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Directory error: {0}")]
    Directory(DirectoryError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to issue token: {0}")]
    TokenIssuanceFailed(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<CredentialError> for AccountError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::WeakPassword(violation) => AccountError::WeakPassword(violation),
            CredentialError::Hashing(e) => AccountError::Hashing(e.to_string()),
        }
    }
}

impl From<AuthenticationError> for AccountError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
            AuthenticationError::TokenIssuance(e) => AccountError::TokenIssuanceFailed(e.to_string()),
        }
    }
}
