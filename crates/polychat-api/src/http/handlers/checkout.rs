//! Checkout handler.
//!
//! Proxies to the payments platform's create-checkout function and
//! returns the redirect URL. The platform itself is never reimplemented.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use polychat_types::error::CheckoutError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for creating a checkout session.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub user_id: String,
    pub return_url: String,
}

/// Reply carrying the payment platform's redirect URL.
#[derive(Debug, Serialize)]
pub struct CheckoutReply {
    pub url: String,
}

/// POST /api/checkout - create a checkout session.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutReply>, AppError> {
    let client = state.checkout.as_ref().ok_or(CheckoutError::NotConfigured)?;

    let url = client
        .create_checkout(&body.price_id, &body.user_id, &body.return_url)
        .await?;

    Ok(Json(CheckoutReply { url }))
}
