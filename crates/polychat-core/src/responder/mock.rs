//! Mock responder implementations.
//!
//! Each mock simulates backend latency with a fixed delay, then echoes an
//! excerpt of the input inside a templated reply. The reply text states
//! plainly that it is a stand-in; swapping in a real backend means
//! registering a different [`Responder`] under the same id.

use std::time::Duration;

use polychat_types::error::ResponderError;

use super::{Responder, excerpt};

/// Reply produced for any model id not present in the registry.
pub const FALLBACK_REPLY: &str = "I'm not sure how to respond to that.";

/// A simulated model backend.
///
/// Parameterized over the pieces that differ between the four mocked
/// models: the bracketed tag, the lead-in phrase, the persona named in
/// the boilerplate, the API named as the future real integration, and
/// the simulated latency.
pub struct MockResponder {
    id: &'static str,
    tag: &'static str,
    lead_in: &'static str,
    persona: &'static str,
    api: &'static str,
    delay: Duration,
}

impl MockResponder {
    /// The GPT-4 mock: 1000ms simulated latency.
    pub fn gpt4() -> Self {
        Self {
            id: "gpt-4",
            tag: "GPT-4",
            lead_in: "I've processed your request",
            persona: "GPT-4",
            api: "OpenAI",
            delay: Duration::from_millis(1000),
        }
    }

    /// The Claude 3 mock: 1000ms simulated latency.
    pub fn claude3() -> Self {
        Self {
            id: "claude-3",
            tag: "Claude",
            lead_in: "I've analyzed your message",
            persona: "Claude",
            api: "Anthropic",
            delay: Duration::from_millis(1000),
        }
    }

    /// The SEA-LION mock: 800ms simulated latency.
    pub fn sea_lion() -> Self {
        Self {
            id: "sea-lion",
            tag: "SEA-LION",
            lead_in: "Processing input",
            persona: "SEA-LION",
            api: "SEA-LION",
            delay: Duration::from_millis(800),
        }
    }

    /// The OLMo 2 mock: 800ms simulated latency.
    pub fn olmo2() -> Self {
        Self {
            id: "olmo-2",
            tag: "OLMo",
            lead_in: "Analyzing your query",
            persona: "OLMo 2",
            api: "OLMo",
            delay: Duration::from_millis(800),
        }
    }
}

impl Responder for MockResponder {
    fn id(&self) -> &str {
        self.id
    }

    async fn respond(&self, message: &str) -> Result<String, ResponderError> {
        // Simulated backend latency.
        tokio::time::sleep(self.delay).await;

        Ok(format!(
            "[{tag}] {lead_in}: \"{excerpt}\"\n\nHere's my response as {persona}. \
             In a real implementation, this would be the actual response from the {api} API.",
            tag = self.tag,
            lead_in = self.lead_in,
            excerpt = excerpt(message),
            persona = self.persona,
            api = self.api,
        ))
    }
}

/// Responder for unrecognized model ids: no delay, fixed reply.
pub struct FallbackResponder;

impl Responder for FallbackResponder {
    fn id(&self) -> &str {
        "fallback"
    }

    async fn respond(&self, _message: &str) -> Result<String, ResponderError> {
        Ok(FALLBACK_REPLY.to_string())
    }
}
