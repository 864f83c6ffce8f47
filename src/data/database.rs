//! SQLite database operations
//!
//! All database access goes through this module.
//! Every method is a single statement against the pool.

use std::path::Path;
use std::time::Instant;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use super::models::*;
use crate::config::DEFAULT_MAX_CONNECTIONS;
use crate::error::AppError;
use crate::metrics::observe_db_query;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        Self::connect_with_max_connections(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size.
    pub async fn connect_with_max_connections(
        path: &Path,
        max_connections: u32,
    ) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Insert a new account and return it with its assigned id.
    ///
    /// A duplicate username surfaces as [`AppError::Conflict`].
    pub async fn insert_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        let started = Instant::now();
        let result = sqlx::query("INSERT INTO accounts (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await;
        observe_db_query("INSERT", "accounts", started.elapsed());

        let result = result.map_err(|error| match error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                AppError::Conflict(format!("username {username:?} is already taken"))
            }
            other => AppError::Database(other),
        })?;

        Ok(Account {
            account_id: result.last_insert_rowid(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Get account by username
    pub async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AppError> {
        let started = Instant::now();
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        observe_db_query("SELECT", "accounts", started.elapsed());

        Ok(account?)
    }

    /// Get the account whose username and password both match exactly
    pub async fn get_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError> {
        let started = Instant::now();
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM accounts WHERE username = ? AND password = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await;
        observe_db_query("SELECT", "accounts", started.elapsed());

        Ok(account?)
    }

    /// Check whether an account id exists
    pub async fn account_exists(&self, id: i64) -> Result<bool, AppError> {
        let started = Instant::now();
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        observe_db_query("SELECT", "accounts", started.elapsed());

        Ok(exists? != 0)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Insert a new message and return it with its assigned id
    pub async fn insert_message(&self, message: &NewMessage) -> Result<Message, AppError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"
            INSERT INTO messages (posted_by, message_text, time_posted_epoch)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(message.posted_by)
        .bind(&message.message_text)
        .bind(message.time_posted_epoch)
        .execute(&self.pool)
        .await;
        observe_db_query("INSERT", "messages", started.elapsed());

        let result = result?;
        Ok(Message {
            message_id: result.last_insert_rowid(),
            posted_by: message.posted_by,
            message_text: message.message_text.clone(),
            time_posted_epoch: message.time_posted_epoch,
        })
    }

    /// Get every message in id order
    pub async fn get_all_messages(&self) -> Result<Vec<Message>, AppError> {
        let started = Instant::now();
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;
        observe_db_query("SELECT", "messages", started.elapsed());

        Ok(messages?)
    }

    /// Get message by ID
    pub async fn get_message(&self, id: i64) -> Result<Option<Message>, AppError> {
        let started = Instant::now();
        let message = sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        observe_db_query("SELECT", "messages", started.elapsed());

        Ok(message?)
    }

    /// Get all messages posted by one account, in id order
    pub async fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<Message>, AppError> {
        let started = Instant::now();
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, posted_by, message_text, time_posted_epoch
            FROM messages
            WHERE posted_by = ?
            ORDER BY id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await;
        observe_db_query("SELECT", "messages", started.elapsed());

        Ok(messages?)
    }

    /// Overwrite the text of a message.
    ///
    /// # Returns
    /// Number of rows updated (0 when the id does not exist)
    pub async fn update_message_text(&self, id: i64, text: &str) -> Result<u64, AppError> {
        let started = Instant::now();
        let result = sqlx::query("UPDATE messages SET message_text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await;
        observe_db_query("UPDATE", "messages", started.elapsed());

        Ok(result?.rows_affected())
    }

    /// Delete message by ID
    ///
    /// # Returns
    /// Number of rows deleted (0 when the id does not exist)
    pub async fn delete_message(&self, id: i64) -> Result<u64, AppError> {
        let started = Instant::now();
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await;
        observe_db_query("DELETE", "messages", started.elapsed());

        Ok(result?.rows_affected())
    }
}
