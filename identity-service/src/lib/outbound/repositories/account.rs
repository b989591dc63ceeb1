use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountDirectory;
use crate::account::errors::DirectoryError;

const ACCOUNTS_EMAIL_KEY: &str = "accounts_email_key";

/// Account directory backed by PostgreSQL.
///
/// Email uniqueness is enforced by the `accounts_email_key` constraint, so
/// concurrent inserts for one email resolve with exactly one success.
pub struct PostgresAccountDirectory {
    pool: PgPool,
}

impl PostgresAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DirectoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            display_name: row.display_name,
            email: EmailAddress::new(row.email)
                .map_err(|e| DirectoryError::Database(format!("Stored email is invalid: {}", e)))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn directory_error(err: sqlx::Error) -> DirectoryError {
    match err {
        sqlx::Error::PoolTimedOut => DirectoryError::Unavailable(err.to_string()),
        _ => DirectoryError::Database(err.to_string()),
    }
}

#[async_trait]
impl AccountDirectory for PostgresAccountDirectory {
    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (display_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, display_name, email, password_hash, created_at
            "#,
        )
        .bind(&account.display_name)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(ACCOUNTS_EMAIL_KEY)
                {
                    return DirectoryError::DuplicateEmail(account.email.as_str().to_string());
                }
            }
            directory_error(e)
        })?;

        Account::try_from(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, display_name, email, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(directory_error)?;

        row.map(Account::try_from).transpose()
    }
}
