//! Responder registry for runtime model dispatch.
//!
//! A simple id-indexed registry of boxed responders with a fallback for
//! unrecognized model ids. Dispatching to an unknown id is never an
//! error: the fallback answers instead.

use std::collections::HashMap;

use polychat_types::error::ResponderError;

use super::BoxResponder;
use super::mock::{FallbackResponder, MockResponder};

/// Registry of available responders, indexed by model id.
pub struct ResponderRegistry {
    responders: HashMap<String, BoxResponder>,
    fallback: BoxResponder,
}

impl ResponderRegistry {
    /// Create a registry with the given fallback responder and no entries.
    pub fn new(fallback: BoxResponder) -> Self {
        Self {
            responders: HashMap::new(),
            fallback,
        }
    }

    /// Register a responder under its own id.
    ///
    /// If a responder with this id already exists, it is replaced.
    pub fn register(&mut self, responder: BoxResponder) {
        self.responders.insert(responder.id().to_string(), responder);
    }

    /// Look up a responder by model id.
    pub fn get(&self, id: &str) -> Option<&BoxResponder> {
        self.responders.get(id)
    }

    /// List all registered model ids.
    pub fn list_ids(&self) -> Vec<&str> {
        self.responders.keys().map(|s| s.as_str()).collect()
    }

    /// Dispatch a message to the responder registered for `model_id`,
    /// or to the fallback when the id is unrecognized.
    pub async fn respond(&self, model_id: &str, message: &str) -> Result<String, ResponderError> {
        match self.responders.get(model_id) {
            Some(responder) => responder.respond(message).await,
            None => self.fallback.respond(message).await,
        }
    }
}

impl Default for ResponderRegistry {
    /// The production wiring: the four catalog mocks plus the fallback.
    fn default() -> Self {
        let mut registry = Self::new(BoxResponder::new(FallbackResponder));
        registry.register(BoxResponder::new(MockResponder::gpt4()));
        registry.register(BoxResponder::new(MockResponder::claude3()));
        registry.register(BoxResponder::new(MockResponder::sea_lion()));
        registry.register(BoxResponder::new(MockResponder::olmo2()));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::mock::FALLBACK_REPLY;

    #[test]
    fn test_default_registry_covers_catalog() {
        let registry = ResponderRegistry::default();
        for id in ["gpt-4", "claude-3", "sea-lion", "olmo-2"] {
            assert!(registry.get(id).is_some(), "missing responder for {id}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_by_id() {
        let registry = ResponderRegistry::default();
        let reply = registry.respond("sea-lion", "hi").await.unwrap();
        assert!(reply.starts_with("[SEA-LION]"));
    }

    #[tokio::test]
    async fn test_unknown_id_uses_fallback_not_error() {
        let registry = ResponderRegistry::default();
        let reply = registry.respond("llama-9", "hi").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_register_replaces_existing() {
        let mut registry = ResponderRegistry::default();
        registry.register(BoxResponder::new(MockResponder::gpt4()));
        assert_eq!(
            registry.list_ids().iter().filter(|&&id| id == "gpt-4").count(),
            1
        );
    }
}
