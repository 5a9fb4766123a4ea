//! Chat message types for Polychat.
//!
//! Messages belong to a single user (identified by the externally
//! authenticated `user_id`) and are ordered by `timestamp`. A message is
//! mutated only to attach feedback; deletion is bulk-per-user only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message within a conversation.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Reader reaction to an assistant message.
///
/// Recording feedback overwrites any prior value (last-write-wins);
/// no history of feedback changes is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Negative,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Positive => write!(f, "positive"),
            Feedback::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Feedback::Positive),
            "negative" => Ok(Feedback::Negative),
            other => Err(format!("invalid feedback value: '{other}'")),
        }
    }
}

/// A single message in a user's conversation history.
///
/// Invariant: every persisted assistant message carries the model id the
/// entitlement check approved for its exchange. An assistant message with
/// `model: None` is the client-side synthetic apology, which is never
/// persisted and never feedback-eligible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: String,
    pub role: MessageRole,
    pub content: String,
    /// Identifier of the responder this exchange used.
    pub model: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Reader reaction (assistant messages only).
    pub feedback: Option<Feedback>,
}

impl ChatMessage {
    /// Whether this is the synthetic, never-persisted apology message.
    pub fn is_synthetic(&self) -> bool {
        self.role == MessageRole::Assistant && self.model.is_none()
    }
}
