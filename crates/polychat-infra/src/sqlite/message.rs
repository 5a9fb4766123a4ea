//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `polychat-core` using sqlx with
//! split read/write pools. One row per chat turn; feedback updates are
//! in-place overwrites; deletion is bulk-per-user only.

use polychat_core::repository::MessageRepository;
use polychat_types::error::RepositoryError;
use polychat_types::message::{ChatMessage, Feedback, MessageRole};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct MessageRow {
    id: String,
    user_id: String,
    role: String,
    content: String,
    model: Option<String>,
    timestamp: String,
    feedback: Option<String>,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            model: row.try_get("model")?,
            timestamp: row.try_get("timestamp")?,
            feedback: row.try_get("feedback")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(RepositoryError::Query)?;

        let feedback: Option<Feedback> = self
            .feedback
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(RepositoryError::Query)?;

        Ok(ChatMessage {
            id: parse_uuid(&self.id)?,
            user_id: self.user_id,
            role,
            content: self.content,
            model: self.model,
            timestamp: parse_datetime(&self.timestamp)?,
            feedback,
        })
    }
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_messages
               (id, user_id, role, content, model, timestamp, feedback)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(&message.user_id)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(&message.model)
        .bind(format_datetime(&message.timestamp))
        .bind(message.feedback.map(|f| f.to_string()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages
               WHERE user_id = ?
               ORDER BY timestamp ASC, id ASC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(r.into_message()?);
        }
        Ok(messages)
    }

    async fn update_feedback(
        &self,
        message_id: &Uuid,
        feedback: Feedback,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chat_messages SET feedback = ? WHERE id = ?")
            .bind(feedback.to_string())
            .bind(message_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
