use std::sync::Arc;

use chirp_db::Database;
use chirp_db::models::MessageRow;
use chirp_types::models::Message;
use tracing::{debug, warn};

use crate::error::ServiceError;

/// Longest message text accepted, in characters.
pub const MAX_TEXT_CHARS: usize = 255;

pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a message on behalf of an existing account.
    ///
    /// Text constraints are checked first, with no I/O; only then is
    /// `posted_by` resolved against the account table. `posted_at` defaults
    /// to the current epoch second when the caller does not supply one.
    /// The returned entity is re-read from the store after the insert.
    pub fn create(
        &self,
        posted_by: i64,
        text: &str,
        posted_at: Option<i64>,
    ) -> Result<Message, ServiceError> {
        validate_text(text)?;

        if self.db.find_account_by_id(posted_by)?.is_none() {
            debug!(posted_by, "message rejected: unknown account");
            return Err(ServiceError::UnknownAccount(posted_by));
        }

        let posted_at = posted_at.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let id = self.db.insert_message(posted_by, text, posted_at)?;
        let row = self.db.find_message_by_id(id)?.ok_or_else(|| {
            ServiceError::Store(anyhow::anyhow!("message {id} missing after insert"))
        })?;

        Ok(message_from_row(row))
    }

    /// Direct lookup; absence is a valid result, never an error.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Message>, ServiceError> {
        Ok(self.db.find_message_by_id(id)?.map(message_from_row))
    }

    pub fn list_all(&self) -> Result<Vec<Message>, ServiceError> {
        let rows = self.db.list_messages()?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }

    /// All messages posted by `account_id`. An unknown account yields an
    /// empty list, not a rejection.
    pub fn list_by_account(&self, account_id: i64) -> Result<Vec<Message>, ServiceError> {
        let rows = self.db.list_messages_by_account(account_id)?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }

    /// Replace a message's text. `id`, `posted_by` and `posted_at` stay
    /// fixed. The update runs against the store directly; zero affected
    /// rows means the message no longer exists and the call is rejected.
    /// On success the full entity is re-read and returned.
    pub fn update(&self, id: i64, new_text: &str) -> Result<Message, ServiceError> {
        validate_text(new_text)?;

        let affected = self.db.update_message_text(id, new_text)?;
        if affected == 0 {
            debug!(id, "update rejected: no such message");
            return Err(ServiceError::UnknownMessage(id));
        }

        let row = self.db.find_message_by_id(id)?.ok_or_else(|| {
            ServiceError::Store(anyhow::anyhow!("message {id} missing after update"))
        })?;

        Ok(message_from_row(row))
    }

    /// Delete a message, idempotently. A missing id is a no-op that returns
    /// `None`; a present one is removed and returned as it existed before
    /// the delete. Every repeat of the call lands in one of those two
    /// outcome classes — never a fault.
    pub fn delete(&self, id: i64) -> Result<Option<Message>, ServiceError> {
        let Some(row) = self.db.find_message_by_id(id)? else {
            return Ok(None);
        };

        let affected = self.db.delete_message_by_id(id)?;
        if affected == 0 {
            // A concurrent delete won between our read and our delete. The
            // snapshot is still reported, keeping repeated deletes in the
            // same outcome class. Known consistency gap: the snapshot may
            // describe a row another request removed first.
            warn!(id, "message disappeared between existence read and delete");
        }

        Ok(Some(message_from_row(row)))
    }
}

fn validate_text(text: &str) -> Result<(), ServiceError> {
    if text.is_empty() {
        return Err(ServiceError::EmptyText);
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ServiceError::TextTooLong);
    }
    Ok(())
}

fn message_from_row(row: MessageRow) -> Message {
    Message {
        id: row.id,
        posted_by: row.posted_by,
        text: row.text,
        posted_at: row.posted_at,
    }
}
