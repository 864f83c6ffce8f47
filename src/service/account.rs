//! Account service
//!
//! Registration and login against the accounts table.

use std::sync::Arc;

use crate::data::{Account, Credentials, Database};
use crate::error::AppError;

/// Account service
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    /// Create new account service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account
    ///
    /// Input format is checked by the caller
    /// (see [`crate::service::validate_registration`]).
    ///
    /// # Errors
    /// [`AppError::Conflict`] if the username is already taken
    pub async fn register(&self, candidate: &Credentials) -> Result<Account, AppError> {
        if self
            .db
            .get_account_by_username(&candidate.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %candidate.username, "registration rejected: username taken");
            return Err(AppError::Conflict(format!(
                "username {:?} is already taken",
                candidate.username
            )));
        }

        // A racing registration between lookup and insert hits the unique index.
        let account = self
            .db
            .insert_account(&candidate.username, &candidate.password)
            .await?;

        crate::metrics::ACCOUNTS_REGISTERED_TOTAL.inc();
        tracing::info!(
            account_id = account.account_id,
            username = %account.username,
            "Account registered"
        );

        Ok(account)
    }

    /// Log in with a username and password
    ///
    /// Passwords are compared as stored plaintext, case-sensitively.
    ///
    /// # Errors
    /// [`AppError::Unauthorized`] if no account matches both fields
    pub async fn login(&self, credentials: &Credentials) -> Result<Account, AppError> {
        match self
            .db
            .get_account_by_credentials(&credentials.username, &credentials.password)
            .await?
        {
            Some(account) => {
                tracing::debug!(account_id = account.account_id, "Login succeeded");
                Ok(account)
            }
            None => {
                tracing::debug!(username = %credentials.username, "Login rejected");
                Err(AppError::Unauthorized)
            }
        }
    }
}
