//! MessageRepository trait definition.
//!
//! The full surface consumed against the chat-message table: insert,
//! select by user, feedback update by id, bulk delete by user.
//! Messages are never deleted individually.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use polychat_types::error::RepositoryError;
use polychat_types::message::{ChatMessage, Feedback};
use uuid::Uuid;

/// Repository trait for chat message persistence.
///
/// Implementations live in polychat-infra (e.g., `SqliteMessageRepository`).
pub trait MessageRepository: Send + Sync {
    /// Persist a new message.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all of a user's messages, ordered by timestamp ASC.
    fn get_messages(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Overwrite the feedback field of an existing message.
    ///
    /// Returns `RepositoryError::NotFound` when no row has this id.
    fn update_feedback(
        &self,
        message_id: &Uuid,
        feedback: Feedback,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete all of a user's messages. Returns the number of rows removed.
    fn delete_all(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
