//! The chat exchange endpoint.
//!
//! POST /api/chat
//!
//! Body `{ "message": ..., "model": ..., "userId": ... }`; reply
//! `{ "message": ... }` on success or `{ "error": ... }` with status
//! 400/403/500. All three fields are required; the body-level `Option`s
//! turn absent JSON keys into the 400 taxonomy instead of a deserialize
//! rejection.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use polychat_core::exchange::ExchangeRequest;
use polychat_types::error::ExchangeError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

/// Success reply for the exchange endpoint.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// POST /api/chat - run one exchange.
pub async fn exchange(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let (Some(message), Some(model), Some(user_id)) = (body.message, body.model, body.user_id)
    else {
        return Err(ExchangeError::MissingFields.into());
    };

    let request = ExchangeRequest {
        message,
        model,
        user_id,
    };
    let reply = state.exchange_service.handle(&request).await?;

    Ok(Json(ChatReply { message: reply }))
}
