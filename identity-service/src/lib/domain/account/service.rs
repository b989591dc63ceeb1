use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;

use crate::domain::account::models::Account;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::SigninCommand;
use crate::account::errors::AccountError;
use crate::account::errors::DirectoryError;
use crate::account::ports::AccountDirectory;
use crate::account::ports::AuthenticationUsecase;
use crate::account::ports::CredentialAuthority;

/// Domain service implementation for registration and signin.
///
/// Concrete implementation of AuthenticationUsecase with dependency injection.
/// Holds no mutable state of its own; the directory is the only shared resource.
pub struct AuthenticationService<AD, CA = Authenticator>
where
    AD: AccountDirectory,
    CA: CredentialAuthority,
{
    directory: Arc<AD>,
    authenticator: Arc<CA>,
}

impl<AD, CA> AuthenticationService<AD, CA>
where
    AD: AccountDirectory,
    CA: CredentialAuthority,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Account persistence implementation
    /// * `authenticator` - Password policy, hashing, and token issuance
    pub fn new(directory: Arc<AD>, authenticator: Arc<CA>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }
}

#[async_trait]
impl<AD, CA> AuthenticationUsecase for AuthenticationService<AD, CA>
where
    AD: AccountDirectory,
    CA: CredentialAuthority,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        match self.directory.find_by_email(command.email.as_str()).await {
            Ok(Some(_)) => {
                return Err(AccountError::DuplicateEmail(command.email.to_string()));
            }
            Ok(None) => {}
            Err(e) => return Err(AccountError::Directory(e)),
        }

        let password_hash = self.authenticator.hash_new_password(&command.password)?;

        let account = NewAccount {
            display_name: command.display_name,
            email: command.email,
            password_hash,
        };

        // The directory has the final say on uniqueness: the lookup above can race.
        self.directory.create(account).await.map_err(|e| match e {
            DirectoryError::DuplicateEmail(email) => AccountError::DuplicateEmail(email),
            other => AccountError::Directory(other),
        })
    }

    async fn authenticate(&self, command: SigninCommand) -> Result<IssuedToken, AccountError> {
        let account = match self.directory.find_by_email(command.email.as_str()).await {
            Ok(Some(account)) => account,
            Ok(None) | Err(_) => return Err(AccountError::InvalidCredentials),
        };

        let issued = self.authenticator.authenticate(
            &command.password,
            &account.password_hash,
            &account.id.to_string(),
            account.email.as_str(),
        )?;

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use auth::AuthenticationError;
    use auth::CredentialError;
    use auth::CredentialHasher;
    use auth::HashingParams;
    use auth::PasswordError;
    use auth::PolicyViolation;
    use auth::TokenConfig;
    use auth::TokenError;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::AccountId;
    use crate::domain::account::models::EmailAddress;

    mock! {
        pub TestAccountDirectory {}

        #[async_trait]
        impl AccountDirectory for TestAccountDirectory {
            async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;
        }
    }

    mock! {
        pub TestCredentialAuthority {}

        impl CredentialAuthority for TestCredentialAuthority {
            fn hash_new_password(&self, password: &str) -> Result<String, CredentialError>;
            fn authenticate(
                &self,
                password: &str,
                stored_hash: &str,
                account_id: &str,
                email: &str,
            ) -> Result<IssuedToken, AuthenticationError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let config = TokenConfig::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes".to_vec(),
            TokenConfig::default_ttl(),
        )
        .unwrap();
        let hasher = CredentialHasher::with_params(HashingParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(Authenticator::with_hasher(&config, hasher))
    }

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value.to_string()).unwrap()
    }

    fn stored_account(authenticator: &Authenticator, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            display_name: "Ann".to_string(),
            email: email("ann@x.com"),
            password_hash: authenticator.hash_new_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command(password: &str) -> RegisterCommand {
        RegisterCommand::new("Ann".to_string(), email("ann@x.com"), password.to_string())
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut directory = MockTestAccountDirectory::new();

        directory
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .times(1)
            .returning(|_| Ok(None));

        directory
            .expect_create()
            .withf(|account| {
                account.display_name == "Ann"
                    && account.email.as_str() == "ann@x.com"
                    && account.password_hash.starts_with("$argon2id$")
                    && account.password_hash != "Secret1!"
            })
            .times(1)
            .returning(|account| {
                Ok(Account {
                    id: AccountId::new(),
                    display_name: account.display_name,
                    email: account.email,
                    password_hash: account.password_hash,
                    created_at: Utc::now(),
                })
            });

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let account = service
            .register(register_command("Secret1!"))
            .await
            .expect("Registration failed");

        assert_eq!(account.email.as_str(), "ann@x.com");
        assert_eq!(account.display_name, "Ann");
        assert!(!account.password_hash.is_empty());
        assert_ne!(account.password_hash, "Secret1!");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut directory = MockTestAccountDirectory::new();
        let existing = stored_account(&authenticator(), "Secret1!");

        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        directory.expect_create().times(0);

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("Secret1!")).await;
        assert_eq!(
            result.unwrap_err(),
            AccountError::DuplicateEmail("ann@x.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_lookup_failure_is_directory_error() {
        let mut directory = MockTestAccountDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(DirectoryError::Unavailable("pool timed out".to_string())));
        directory.expect_create().times(0);

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("Secret1!")).await;
        assert_eq!(
            result.unwrap_err(),
            AccountError::Directory(DirectoryError::Unavailable("pool timed out".to_string()))
        );
    }

    #[tokio::test]
    async fn test_register_weak_password_persists_nothing() {
        let mut directory = MockTestAccountDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        directory.expect_create().times(0);

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("Password123")).await;
        assert_eq!(
            result.unwrap_err(),
            AccountError::WeakPassword(PolicyViolation::MissingSymbol)
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_checked_before_password() {
        let mut directory = MockTestAccountDirectory::new();
        let existing = stored_account(&authenticator(), "Secret1!");

        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        directory.expect_create().times(0);

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("weak")).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_lost_race_is_duplicate_email() {
        let mut directory = MockTestAccountDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        directory.expect_create().times(1).returning(|account| {
            Err(DirectoryError::DuplicateEmail(
                account.email.as_str().to_string(),
            ))
        });

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("Secret1!")).await;
        assert_eq!(
            result.unwrap_err(),
            AccountError::DuplicateEmail("ann@x.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_insert_failure_is_directory_error() {
        let mut directory = MockTestAccountDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        directory
            .expect_create()
            .times(1)
            .returning(|_| Err(DirectoryError::Database("connection reset".to_string())));

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service.register(register_command("Secret1!")).await;
        assert!(matches!(
            result,
            Err(AccountError::Directory(DirectoryError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "Secret1!");
        let account_id = account.id;

        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthenticationService::new(Arc::new(directory), Arc::clone(&authenticator));

        let issued = service
            .authenticate(SigninCommand::new(email("ann@x.com"), "Secret1!".to_string()))
            .await
            .expect("Authentication failed");

        let claims = authenticator
            .validate_token(&issued.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.account_id, account_id.to_string());
        assert_eq!(claims.email, "ann@x.com");
        assert!(issued.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "Secret1!");

        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthenticationService::new(Arc::new(directory), authenticator);

        let result = service
            .authenticate(SigninCommand::new(email("ann@x.com"), "wrong".to_string()))
            .await;
        assert_eq!(result.unwrap_err(), AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, "Secret1!");

        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .returning(move |_| Ok(Some(account.clone())));
        directory
            .expect_find_by_email()
            .withf(|email| email == "noone@x.com")
            .returning(|_| Ok(None));
        directory
            .expect_find_by_email()
            .withf(|email| email == "broken@x.com")
            .returning(|_| Err(DirectoryError::Database("connection reset".to_string())));

        let service = AuthenticationService::new(Arc::new(directory), authenticator);

        let wrong_password = service
            .authenticate(SigninCommand::new(email("ann@x.com"), "wrong".to_string()))
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate(SigninCommand::new(email("noone@x.com"), "x".to_string()))
            .await
            .unwrap_err();
        let lookup_failure = service
            .authenticate(SigninCommand::new(email("broken@x.com"), "x".to_string()))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, AccountError::InvalidCredentials);
        assert_eq!(unknown_email, wrong_password);
        assert_eq!(lookup_failure, wrong_password);
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_stored_hash() {
        let mut account = stored_account(&authenticator(), "Secret1!");
        account.password_hash = "not-a-phc-string".to_string();

        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthenticationService::new(Arc::new(directory), authenticator());

        let result = service
            .authenticate(SigninCommand::new(email("ann@x.com"), "Secret1!".to_string()))
            .await;
        assert_eq!(result.unwrap_err(), AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_authenticate_token_issuance_failure() {
        let account = stored_account(&authenticator(), "Secret1!");
        let account_id = account.id.to_string();

        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let mut credentials = MockTestCredentialAuthority::new();
        credentials
            .expect_authenticate()
            .withf(move |password, _, id, email| {
                password == "Secret1!" && id == account_id && email == "ann@x.com"
            })
            .times(1)
            .returning(|_, _, _, _| {
                Err(AuthenticationError::TokenIssuance(TokenError::SigningFailed(
                    "key rejected".to_string(),
                )))
            });

        let service = AuthenticationService::new(Arc::new(directory), Arc::new(credentials));

        let result = service
            .authenticate(SigninCommand::new(email("ann@x.com"), "Secret1!".to_string()))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::TokenIssuanceFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_register_hashing_failure_persists_nothing() {
        let mut directory = MockTestAccountDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        directory.expect_create().times(0);

        let mut credentials = MockTestCredentialAuthority::new();
        credentials
            .expect_hash_new_password()
            .times(1)
            .returning(|_| {
                Err(CredentialError::Hashing(PasswordError::HashingFailed(
                    "out of memory".to_string(),
                )))
            });

        let service = AuthenticationService::new(Arc::new(directory), Arc::new(credentials));

        let result = service.register(register_command("Secret1!")).await;
        assert!(matches!(result.unwrap_err(), AccountError::Hashing(_)));
    }
}
