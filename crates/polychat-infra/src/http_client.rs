//! HTTP implementation of the exchange contract's client side.
//!
//! Speaks the wire format of `POST /api/chat`: JSON body
//! `{ "message": ..., "model": ..., "userId": ... }`, JSON reply
//! `{ "message": ... }` on success or `{ "error": ... }` with status
//! 400/403/500 on failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use polychat_core::exchange::ExchangeRequest;
use polychat_core::session::ExchangeClient;
use polychat_types::error::ClientError;

/// Exchange client targeting a running Polychat API server.
pub struct HttpExchangeClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    message: &'a str,
    model: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Deserialize)]
struct WireReply {
    message: String,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
}

impl HttpExchangeClient {
    /// Create a client for the server at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        // Mock responders hold replies for up to a second; real backends
        // longer. 60s keeps slow exchanges from hanging forever.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl ExchangeClient for HttpExchangeClient {
    async fn send(&self, request: &ExchangeRequest) -> Result<String, ClientError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = WireRequest {
            message: &request.message,
            model: &request.model,
            user_id: &request.user_id,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<WireError>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let reply = response
            .json::<WireReply>()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(reply.message)
    }
}
