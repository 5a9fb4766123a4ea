use thiserror::Error;

/// Errors from repository operations (used by trait definitions in polychat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from a model responder backend.
///
/// The bundled mock responders never fail; this exists for the real
/// backends the `Responder` seam is designed to accept later.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("model backend unavailable: {0}")]
    Unavailable(String),

    #[error("model backend rejected the request: {0}")]
    Rejected(String),
}

/// Errors from the chat exchange handler.
///
/// Maps onto the wire taxonomy: missing fields (400), entitlement denied
/// (403), anything else (500).
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("missing required fields")]
    MissingFields,

    #[error("premium subscription required for this model")]
    EntitlementDenied,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Responder(#[from] ResponderError),
}

/// Errors from attachment intake.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("unsupported media type: '{0}' (only text/plain and application/pdf are accepted)")]
    Unsupported(String),

    #[error("attachment is not valid UTF-8 text")]
    InvalidText,
}

/// Errors from the client side of the exchange contract.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Errors from the checkout collaborator.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout endpoint is not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("checkout function returned status {0}")]
    Rejected(u16),

    #[error("no checkout URL returned")]
    MissingUrl,
}
