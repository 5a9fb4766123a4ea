//! Checkout collaborator client.
//!
//! The payments platform is not reimplemented here; this client invokes
//! its create-checkout function with a price id and user id and returns
//! the redirect URL from the `{ "url": ... }` response.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use polychat_types::error::CheckoutError;

/// Client for the payments platform's create-checkout function.
pub struct CheckoutClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    price_id: &'a str,
    user_id: &'a str,
    return_url: &'a str,
}

#[derive(Deserialize)]
struct CheckoutReply {
    url: Option<String>,
}

impl CheckoutClient {
    /// Create a client for the checkout function at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a checkout session and return the redirect URL.
    pub async fn create_checkout(
        &self,
        price_id: &str,
        user_id: &str,
        return_url: &str,
    ) -> Result<String, CheckoutError> {
        let body = CheckoutRequest {
            price_id,
            user_id,
            return_url,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::Rejected(status.as_u16()));
        }

        let reply = response
            .json::<CheckoutReply>()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        reply.url.ok_or(CheckoutError::MissingUrl)
    }
}
