use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountDirectory;
use crate::account::errors::DirectoryError;

/// Process-local account directory.
///
/// Used when no database is configured and by tests. Accounts are keyed by
/// email; check-and-insert happens under one write guard.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(account.email.as_str()) {
            return Err(DirectoryError::DuplicateEmail(
                account.email.as_str().to_string(),
            ));
        }

        let created = Account {
            id: AccountId::new(),
            display_name: account.display_name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(created.email.as_str().to_string(), created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }
}
