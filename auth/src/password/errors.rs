use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}

/// First password policy rule a candidate password failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("password must be at least {min} characters long, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("password must contain an uppercase letter")]
    MissingUppercase,

    #[error("password must contain a lowercase letter")]
    MissingLowercase,

    #[error("password must contain a digit")]
    MissingDigit,

    #[error("password must contain one of the symbols @$!%*?&")]
    MissingSymbol,

    #[error("password may only contain letters, digits and the symbols @$!%*?&, found {0:?}")]
    DisallowedCharacter(char),
}
