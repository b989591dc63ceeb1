use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::CredentialError;
use auth::IssuedToken;

use crate::domain::account::models::Account;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::SigninCommand;
use crate::account::errors::AccountError;
use crate::account::errors::DirectoryError;

/// Port for registration and signin.
#[async_trait]
pub trait AuthenticationUsecase: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Display name, validated email, and plaintext password
    ///
    /// # Returns
    /// Created account
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Directory` - Lookup or insert failed
    /// * `WeakPassword` - Password violates the policy
    /// * `Hashing` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Signed token and its expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or lookup failure
    /// * `TokenIssuanceFailed` - Token signing failed
    async fn authenticate(&self, command: SigninCommand) -> Result<IssuedToken, AccountError>;
}

/// Persistence operations for accounts.
///
/// Implementations must reject a second account with an existing email even
/// when two inserts race.
#[async_trait]
pub trait AccountDirectory: Send + Sync + 'static {
    /// Persist a new account, assigning its id and creation time.
    ///
    /// # Arguments
    /// * `account` - Account data to insert
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Unavailable` - Storage did not respond in time
    /// * `Database` - Storage operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError>;

    /// Retrieve account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage did not respond in time
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;
}

/// Credential checks the usecase delegates to: policy, hashing and token issuance.
pub trait CredentialAuthority: Send + Sync + 'static {
    /// Validate a new password and hash it for storage.
    fn hash_new_password(&self, password: &str) -> Result<String, CredentialError>;

    /// Verify a password against a stored hash and issue a token.
    fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
        email: &str,
    ) -> Result<IssuedToken, AuthenticationError>;
}

impl CredentialAuthority for Authenticator {
    fn hash_new_password(&self, password: &str) -> Result<String, CredentialError> {
        Authenticator::hash_new_password(self, password)
    }

    fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
        email: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        Authenticator::authenticate(self, password, stored_hash, account_id, email)
    }
}
