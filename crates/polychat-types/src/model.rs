//! The static model catalog.
//!
//! Defined in code, not persisted. Premium entries require an active
//! subscription; identifiers not present in the catalog are treated as
//! non-premium and allowed by default (deliberate permissive policy).

use serde::Serialize;

/// One selectable model backend.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelEntry {
    /// Short identifier used on the wire and as the registry key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Whether an active subscription is required.
    pub premium: bool,
}

/// The catalog of selectable models.
pub const MODEL_CATALOG: &[ModelEntry] = &[
    ModelEntry {
        id: "gpt-4",
        name: "OpenAI GPT-4",
        premium: true,
    },
    ModelEntry {
        id: "claude-3",
        name: "Anthropic Claude 3",
        premium: true,
    },
    ModelEntry {
        id: "sea-lion",
        name: "SEA-LION",
        premium: false,
    },
    ModelEntry {
        id: "olmo-2",
        name: "OLMo 2",
        premium: false,
    },
];

/// Look up a catalog entry by identifier.
pub fn find(id: &str) -> Option<&'static ModelEntry> {
    MODEL_CATALOG.iter().find(|m| m.id == id)
}

/// Whether the given identifier is flagged premium.
///
/// Unknown identifiers are non-premium.
pub fn is_premium(id: &str) -> bool {
    find(id).is_some_and(|m| m.premium)
}
