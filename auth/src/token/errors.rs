use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Invalid token configuration: {0}")]
    InvalidConfig(String),
}

/// Reason a presented token was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenInvalid {
    #[error("Token is expired")]
    Expired,

    #[error("Token signature or algorithm is not trusted")]
    Forged,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
