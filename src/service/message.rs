//! Message service
//!
//! Validates and persists messages. Lookups that find nothing return
//! `None` or an empty list; only rejected input is an error.

use std::sync::Arc;

use super::validation::validate_message_text;
use crate::data::{Database, Message, NewMessage};
use crate::error::AppError;

/// Message service
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    /// Create new message service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Post a new message
    ///
    /// # Errors
    /// [`AppError::Validation`] if the text is blank or longer than 255
    /// characters, or if `posted_by` is not an existing account
    pub async fn post(&self, message: &NewMessage) -> Result<Message, AppError> {
        validate_message_text(&message.message_text)?;

        if !self.db.account_exists(message.posted_by).await? {
            tracing::debug!(posted_by = message.posted_by, "post rejected: unknown account");
            return Err(AppError::Validation(format!(
                "account {} does not exist",
                message.posted_by
            )));
        }

        let stored = self.db.insert_message(message).await?;

        crate::metrics::MESSAGES_POSTED_TOTAL.inc();
        tracing::info!(
            message_id = stored.message_id,
            posted_by = stored.posted_by,
            "Message posted"
        );

        Ok(stored)
    }

    /// Every message, oldest first
    pub async fn all(&self) -> Result<Vec<Message>, AppError> {
        self.db.get_all_messages().await
    }

    /// Get message by ID
    pub async fn get(&self, id: i64) -> Result<Option<Message>, AppError> {
        self.db.get_message(id).await
    }

    /// Delete message by ID
    ///
    /// # Returns
    /// `Some(1)` if a message was deleted, `None` if there was nothing to delete
    pub async fn delete(&self, id: i64) -> Result<Option<u64>, AppError> {
        let deleted = self.db.delete_message(id).await?;
        if deleted == 0 {
            tracing::debug!(message_id = id, "delete skipped: no such message");
            return Ok(None);
        }

        tracing::info!(message_id = id, "Message deleted");
        Ok(Some(deleted))
    }

    /// Replace the text of an existing message
    ///
    /// Author and timestamp are left untouched.
    ///
    /// # Returns
    /// Number of messages updated (always 1)
    ///
    /// # Errors
    /// [`AppError::Validation`] if the id does not exist or the text is invalid
    pub async fn patch(&self, id: i64, text: &str) -> Result<u64, AppError> {
        validate_message_text(text)?;

        let updated = self.db.update_message_text(id, text).await?;
        if updated == 0 {
            tracing::debug!(message_id = id, "patch rejected: no such message");
            return Err(AppError::Validation(format!("message {id} does not exist")));
        }

        tracing::info!(message_id = id, "Message text updated");
        Ok(updated)
    }

    /// All messages posted by an account
    ///
    /// An unknown account yields an empty list, same as an account
    /// without messages.
    pub async fn by_account(&self, account_id: i64) -> Result<Vec<Message>, AppError> {
        self.db.get_messages_by_account(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::data::Account;

    async fn create_test_db() -> (Arc<Database>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("service-message.db");
        let db = Database::connect(&db_path).await.unwrap();
        (Arc::new(db), temp_dir)
    }

    async fn seed_account(db: &Database, username: &str) -> Account {
        db.insert_account(username, "password").await.unwrap()
    }

    fn new_message(posted_by: i64, text: &str) -> NewMessage {
        NewMessage {
            posted_by,
            message_text: text.to_string(),
            time_posted_epoch: 1_669_947_792,
        }
    }

    #[tokio::test]
    async fn post_persists_message() {
        let (db, _temp_dir) = create_test_db().await;
        let account = seed_account(&db, "bob").await;
        let service = MessageService::new(db.clone());

        let message = service
            .post(&new_message(account.account_id, "hi"))
            .await
            .unwrap();
        assert_eq!(message.message_id, 1);
        assert_eq!(message.message_text, "hi");
        assert_eq!(message.posted_by, account.account_id);

        let persisted = db.get_message(message.message_id).await.unwrap();
        assert_eq!(persisted, Some(message));
    }

    #[tokio::test]
    async fn post_rejects_invalid_text_even_for_valid_author() {
        let (db, _temp_dir) = create_test_db().await;
        let account = seed_account(&db, "bob").await;
        let service = MessageService::new(db.clone());

        let too_long = "x".repeat(256);
        for text in ["", "   ", too_long.as_str()] {
            let error = service
                .post(&new_message(account.account_id, text))
                .await
                .expect_err("invalid text must be rejected");
            assert!(matches!(error, AppError::Validation(_)));
        }

        assert!(db.get_all_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_rejects_unknown_author() {
        let (db, _temp_dir) = create_test_db().await;
        let service = MessageService::new(db.clone());

        let error = service
            .post(&new_message(42, "hello"))
            .await
            .expect_err("unknown author must be rejected");
        assert!(matches!(error, AppError::Validation(message) if message.contains("42")));
        assert!(db.get_all_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_message_is_none() {
        let (db, _temp_dir) = create_test_db().await;
        let service = MessageService::new(db);

        assert!(service.get(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_twice_reports_then_skips() {
        let (db, _temp_dir) = create_test_db().await;
        let account = seed_account(&db, "bob").await;
        let service = MessageService::new(db);

        let message = service
            .post(&new_message(account.account_id, "bye"))
            .await
            .unwrap();

        assert_eq!(service.delete(message.message_id).await.unwrap(), Some(1));
        assert_eq!(service.delete(message.message_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn patch_updates_only_text() {
        let (db, _temp_dir) = create_test_db().await;
        let account = seed_account(&db, "bob").await;
        let service = MessageService::new(db);

        let original = service
            .post(&new_message(account.account_id, "hi"))
            .await
            .unwrap();

        let updated = service.patch(original.message_id, "hello").await.unwrap();
        assert_eq!(updated, 1);

        let patched = service.get(original.message_id).await.unwrap().unwrap();
        assert_eq!(patched.message_text, "hello");
        assert_eq!(patched.posted_by, original.posted_by);
        assert_eq!(patched.time_posted_epoch, original.time_posted_epoch);
    }

    #[tokio::test]
    async fn patch_rejects_missing_message_and_bad_text() {
        let (db, _temp_dir) = create_test_db().await;
        let account = seed_account(&db, "bob").await;
        let service = MessageService::new(db);

        let missing = service
            .patch(99, "hello")
            .await
            .expect_err("missing message must be rejected");
        assert!(matches!(missing, AppError::Validation(_)));

        let message = service
            .post(&new_message(account.account_id, "hi"))
            .await
            .unwrap();
        let blank = service
            .patch(message.message_id, " ")
            .await
            .expect_err("blank text must be rejected");
        assert!(matches!(blank, AppError::Validation(_)));

        let unchanged = service.get(message.message_id).await.unwrap().unwrap();
        assert_eq!(unchanged.message_text, "hi");
    }

    #[tokio::test]
    async fn by_account_filters_and_tolerates_unknown_accounts() {
        let (db, _temp_dir) = create_test_db().await;
        let alice = seed_account(&db, "alice").await;
        let bob = seed_account(&db, "bob").await;
        let service = MessageService::new(db);

        service
            .post(&new_message(alice.account_id, "from alice"))
            .await
            .unwrap();

        let alices = service.by_account(alice.account_id).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].message_text, "from alice");

        assert!(service.by_account(bob.account_id).await.unwrap().is_empty());
        assert!(service.by_account(12_345).await.unwrap().is_empty());
        assert_eq!(service.all().await.unwrap().len(), 1);
    }
}
