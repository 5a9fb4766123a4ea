//! Responder trait definition.
//!
//! This is the seam for model backends: a responder is a pure function of
//! (model id, message) producing response text. The bundled
//! implementations in [`mock`] simulate latency and echo the input; a
//! real backend is a drop-in replacement registered under the same id,
//! without touching the orchestration layer.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition); the
//! [`box_responder::BoxResponder`] wrapper provides object safety for the
//! id-keyed registry.

pub mod box_responder;
pub mod mock;
pub mod registry;

pub use box_responder::BoxResponder;
pub use registry::ResponderRegistry;

use polychat_types::error::ResponderError;

/// Maximum number of input characters echoed back by the mock responders.
const EXCERPT_CHARS: usize = 50;

/// Trait for model response backends.
pub trait Responder: Send + Sync {
    /// The catalog identifier this responder answers for.
    fn id(&self) -> &str;

    /// Produce response text for one user message.
    fn respond(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, ResponderError>> + Send;
}

/// Excerpt of the input used in mock responses: the first 50 characters,
/// with an ellipsis appended only when the input is longer.
pub(crate) fn excerpt(message: &str) -> String {
    let mut out: String = message.chars().take(EXCERPT_CHARS).collect();
    if message.chars().count() > EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}
