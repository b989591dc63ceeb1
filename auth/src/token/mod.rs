pub mod claims;
pub mod config;
pub mod errors;
pub mod service;

pub use claims::IdentityClaims;
pub use config::TokenConfig;
pub use errors::TokenError;
pub use errors::TokenInvalid;
pub use service::IssuedToken;
pub use service::TokenService;
