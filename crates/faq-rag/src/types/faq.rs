//! Curated reference answers bypassing retrieval

use serde::{Deserialize, Serialize};

/// A canonical question with its curated reference answer.
///
/// Items are loaded once from the static catalog and immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreFaqItem {
    /// Stable integer id
    pub id: u32,
    /// Canonical question wording
    pub question: String,
    /// Curated answer returned verbatim on a route hit
    pub reference_answer: String,
    /// Source document labels backing the answer
    #[serde(default)]
    pub sources: Vec<String>,
    /// Whether the item participates in routing
    #[serde(default)]
    pub in_scope: bool,
}
