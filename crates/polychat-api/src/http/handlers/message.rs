//! Message history handlers for the dashboard surface.
//!
//! Endpoints for loading a user's history, persisting a turn, recording
//! feedback on an assistant turn, and bulk-clearing history.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use polychat_core::repository::MessageRepository;
use polychat_types::message::{ChatMessage, Feedback, MessageRole};

use crate::http::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / reply types
// ---------------------------------------------------------------------------

/// Request body for persisting a message row.
#[derive(Debug, Deserialize)]
pub struct SaveMessageRequest {
    /// Client-generated id; generated server-side when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub role: MessageRole,
    pub content: String,
    /// Model the exchange used.
    #[serde(default)]
    pub model: Option<String>,
    /// Client-side timestamp; now() when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

/// Request body for recording feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: Feedback,
}

/// Reply for the feedback endpoint.
#[derive(Debug, Serialize)]
pub struct FeedbackReply {
    pub id: Uuid,
    pub feedback: Feedback,
}

/// Reply for the bulk clear endpoint.
#[derive(Debug, Serialize)]
pub struct ClearReply {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users/{user_id}/messages - full history, timestamp order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = state.message_repo.get_messages(&user_id).await?;
    Ok(Json(messages))
}

/// POST /api/users/{user_id}/messages - persist one turn.
pub async fn save_message(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<SaveMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let message = ChatMessage {
        id: body.id.unwrap_or_else(Uuid::now_v7),
        user_id,
        role: body.role,
        content: body.content,
        model: body.model,
        timestamp: body.timestamp.unwrap_or_else(Utc::now),
        feedback: body.feedback,
    };

    state.message_repo.save_message(&message).await?;
    Ok(Json(message))
}

/// PUT /api/messages/{id}/feedback - overwrite feedback, last write wins.
pub async fn record_feedback(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackReply>, AppError> {
    state
        .message_repo
        .update_feedback(&message_id, body.feedback)
        .await?;

    Ok(Json(FeedbackReply {
        id: message_id,
        feedback: body.feedback,
    }))
}

/// DELETE /api/users/{user_id}/messages - irreversible bulk clear.
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ClearReply>, AppError> {
    let deleted = state.message_repo.delete_all(&user_id).await?;
    Ok(Json(ClearReply { deleted }))
}
