//! Client-side chat session.
//!
//! Holds one user's ordered message history in memory, mirrored to the
//! persistence collaborator. A send is optimistic: the user message is
//! appended locally before anything else, then persisted, then exchanged.
//! When any of that fails, a synthetic apology message is appended
//! locally -- it is never persisted, carries no model id, and can never
//! receive feedback.
//!
//! The session is single-owner (`&mut self` throughout); two sessions for
//! the same user race independently and append in arrival order.

pub mod attachment;

pub use attachment::Attachment;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use polychat_types::error::{ClientError, RepositoryError};
use polychat_types::message::{ChatMessage, Feedback, MessageRole};

use crate::exchange::ExchangeRequest;
use crate::repository::MessageRepository;

/// Fixed text of the synthetic assistant message appended when an
/// exchange fails.
pub const APOLOGY_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Client side of the exchange contract.
///
/// Implementations live in polychat-infra (e.g., `HttpExchangeClient`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ExchangeClient: Send + Sync {
    /// Submit one exchange and return the assistant text.
    fn send(
        &self,
        request: &ExchangeRequest,
    ) -> impl std::future::Future<Output = Result<String, ClientError>> + Send;
}

/// One user's chat session.
pub struct ChatSession<R: MessageRepository, X: ExchangeClient> {
    user_id: String,
    messages: Vec<ChatMessage>,
    pending_attachment: Option<Attachment>,
    repo: R,
    exchange: X,
}

impl<R: MessageRepository, X: ExchangeClient> ChatSession<R, X> {
    pub fn new(user_id: impl Into<String>, repo: R, exchange: X) -> Self {
        Self {
            user_id: user_id.into(),
            messages: Vec::new(),
            pending_attachment: None,
            repo,
            exchange,
        }
    }

    /// The ordered in-memory history.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The attachment staged for the next send, if any.
    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// Stage an attachment for the next send, replacing any staged one.
    pub fn attach(&mut self, attachment: Attachment) {
        self.pending_attachment = Some(attachment);
    }

    /// Discard the staged attachment.
    pub fn clear_attachment(&mut self) {
        self.pending_attachment = None;
    }

    /// Replace the in-memory history with the persisted one.
    pub async fn load_history(&mut self) -> Result<(), RepositoryError> {
        self.messages = self.repo.get_messages(&self.user_id).await?;
        Ok(())
    }

    /// Submit one user input against the selected model.
    ///
    /// Returns `None` when there is nothing to send (empty input, no
    /// attachment). Otherwise returns the appended assistant message --
    /// either the model's reply or the synthetic apology.
    pub async fn send(&mut self, input: &str, model_id: &str) -> Option<&ChatMessage> {
        if input.is_empty() && self.pending_attachment.is_none() {
            return None;
        }

        // Fold the staged attachment into the outgoing content and
        // consume it, whatever happens next.
        let content = match self.pending_attachment.take() {
            Some(att) => format!("{input}\n\nFile Content:\n{}", att.text),
            None => input.to_string(),
        };

        let user_message = ChatMessage {
            id: Uuid::now_v7(),
            user_id: self.user_id.clone(),
            role: MessageRole::User,
            content: content.clone(),
            model: Some(model_id.to_string()),
            timestamp: Utc::now(),
            feedback: None,
        };

        // Optimistic append: the user sees their message immediately.
        self.messages.push(user_message.clone());

        let assistant_message = match self.run_exchange(&user_message, model_id).await {
            Ok(message) => message,
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "exchange failed, appending apology");
                Self::apology(&self.user_id)
            }
        };

        self.messages.push(assistant_message);
        self.messages.last()
    }

    /// Persist the user message, run the exchange, persist and return the
    /// assistant message.
    async fn run_exchange(
        &self,
        user_message: &ChatMessage,
        model_id: &str,
    ) -> Result<ChatMessage, SendError> {
        self.repo.save_message(user_message).await?;

        let request = ExchangeRequest {
            message: user_message.content.clone(),
            model: model_id.to_string(),
            user_id: self.user_id.clone(),
        };
        let reply = self.exchange.send(&request).await?;

        let assistant_message = ChatMessage {
            id: Uuid::now_v7(),
            user_id: self.user_id.clone(),
            role: MessageRole::Assistant,
            content: reply,
            model: Some(model_id.to_string()),
            timestamp: Utc::now(),
            feedback: None,
        };
        self.repo.save_message(&assistant_message).await?;

        Ok(assistant_message)
    }

    /// The local-only fallback message. `model: None` marks it synthetic.
    fn apology(user_id: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            role: MessageRole::Assistant,
            content: APOLOGY_REPLY.to_string(),
            model: None,
            timestamp: Utc::now(),
            feedback: None,
        }
    }

    /// Overwrite the feedback on a persisted assistant message, in memory
    /// and in the store. Last write wins.
    pub async fn record_feedback(
        &mut self,
        message_id: &Uuid,
        feedback: Feedback,
    ) -> Result<(), RepositoryError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == *message_id)
            .filter(|m| m.role == MessageRole::Assistant && !m.is_synthetic())
            .ok_or(RepositoryError::NotFound)?;

        message.feedback = Some(feedback);
        self.repo.update_feedback(message_id, feedback).await
    }

    /// Irreversibly delete all of this user's messages and reset local
    /// state. The caller is responsible for the confirmation gate.
    pub async fn clear(&mut self) -> Result<u64, RepositoryError> {
        let deleted = self.repo.delete_all(&self.user_id).await?;
        self.messages.clear();
        Ok(deleted)
    }
}

/// Internal error union for the send flow; both arms collapse into the
/// apology fallback.
#[derive(Debug, thiserror::Error)]
enum SendError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Client(#[from] ClientError),
}
