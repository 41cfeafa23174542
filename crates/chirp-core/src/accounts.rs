use std::sync::Arc;

use chirp_db::Database;
use chirp_db::models::AccountRow;
use chirp_types::models::Account;
use tracing::debug;

use crate::error::ServiceError;

/// Minimum password length accepted at registration, in characters.
pub const MIN_PASSWORD_CHARS: usize = 4;

pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account.
    ///
    /// The username must be non-empty and the password at least four
    /// characters long; both checks run before the store is touched. A
    /// username already present rejects with zero writes. On success the
    /// entity is re-read by its generated id, so the caller always sees
    /// the stored row.
    pub fn register(&self, username: &str, password: &str) -> Result<Account, ServiceError> {
        if username.is_empty() {
            return Err(ServiceError::EmptyUsername);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::PasswordTooShort);
        }

        if self.db.find_account_by_username(username)?.is_some() {
            debug!(username, "registration rejected: username taken");
            return Err(ServiceError::UsernameTaken(username.to_string()));
        }

        let id = self.db.insert_account(username, password)?;
        let row = self.db.find_account_by_id(id)?.ok_or_else(|| {
            ServiceError::Store(anyhow::anyhow!("account {id} missing after insert"))
        })?;

        Ok(account_from_row(row))
    }

    /// Look up the account whose username and password both match exactly
    /// (case-sensitive). No side effects.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Account, ServiceError> {
        let row = self
            .db
            .find_account_by_credentials(username, password)?
            .ok_or(ServiceError::BadCredentials)?;

        Ok(account_from_row(row))
    }
}

fn account_from_row(row: AccountRow) -> Account {
    Account {
        id: row.id,
        username: row.username,
        password: row.password,
    }
}
