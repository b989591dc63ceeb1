//! Credential primitives for the identity service
//!
//! - Password policy (length and character classes)
//! - Password hashing (Argon2id, PHC strings)
//! - Bearer token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Nothing here performs I/O or logs; every operation is a pure computation over
//! immutable configuration.
//!
//! # Examples
//!
//! ## Password Policy
//! ```
//! use auth::{PasswordPolicy, PolicyViolation};
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.validate("Secret1!").is_ok());
//! assert_eq!(policy.validate("Secret12"), Err(PolicyViolation::MissingSymbol));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let hash = hasher.hash("Secret1!").unwrap();
//! assert!(hasher.verify("Secret1!", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenService};
//!
//! let config = TokenConfig::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     TokenConfig::default_ttl(),
//! )
//! .unwrap();
//! let tokens = TokenService::new(&config);
//!
//! let issued = tokens.issue("42", "ann@x.com").unwrap();
//! let claims = tokens.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.email, "ann@x.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenConfig};
//!
//! let config = TokenConfig::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     TokenConfig::default_ttl(),
//! )
//! .unwrap();
//! let auth = Authenticator::new(&config);
//!
//! // Register: enforce policy, hash password
//! let hash = auth.hash_new_password("Secret1!").unwrap();
//!
//! // Signin: verify and issue token
//! let issued = auth.authenticate("Secret1!", &hash, "42", "ann@x.com").unwrap();
//!
//! // Protected request: validate token
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.account_id, "42");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::CredentialError;
pub use password::CredentialHasher;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordPolicy;
pub use password::PolicyViolation;
pub use token::IdentityClaims;
pub use token::IssuedToken;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenInvalid;
pub use token::TokenService;
