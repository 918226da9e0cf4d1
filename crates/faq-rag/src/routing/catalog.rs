//! Static FAQ catalog: reference answers plus declarative routing tables

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::CoreFaqItem;

/// Compiled-in default catalog
const DEFAULT_CATALOG: &str = include_str!("../../data/faq_catalog.json");

/// Items with an id above this are drafts and never routed to.
const MAX_ACTIVE_ID: u32 = 12;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<CoreFaqItem>,
    #[serde(default)]
    keyword_routes: BTreeMap<String, String>,
}

/// The loaded reference catalog, immutable at runtime.
///
/// The keyword table is data, not code: pattern → canonical question, so the
/// routing surface can be extended without touching the router.
#[derive(Debug)]
pub struct FaqCatalog {
    items: Vec<CoreFaqItem>,
    normalized_questions: Vec<String>,
    keyword_routes: BTreeMap<String, String>,
}

impl FaqCatalog {
    /// Load the compiled-in default catalog
    pub fn load_default() -> Result<Self> {
        Self::from_json(DEFAULT_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate catalog JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| Error::Catalog(format!("invalid catalog: {e}")))?;

        let mut items: Vec<CoreFaqItem> = file
            .items
            .into_iter()
            .filter(|item| item.in_scope && item.id <= MAX_ACTIVE_ID)
            .collect();
        items.sort_by_key(|item| item.id);

        let normalized_questions = items
            .iter()
            .map(|item| super::normalize_question(&item.question))
            .collect();

        Ok(Self {
            items,
            normalized_questions,
            keyword_routes: file.keyword_routes,
        })
    }

    /// Active reference items, ordered by id
    pub fn items(&self) -> &[CoreFaqItem] {
        &self.items
    }

    /// Normalized canonical questions, aligned with `items`
    pub fn normalized_questions(&self) -> &[String] {
        &self.normalized_questions
    }

    /// Declarative keyword → canonical-question table
    pub fn keyword_routes(&self) -> &BTreeMap<String, String> {
        &self.keyword_routes
    }

    /// Look up an item by its canonical question wording
    pub fn find_by_question(&self, canonical: &str) -> Option<&CoreFaqItem> {
        self.items.iter().find(|item| item.question == canonical)
    }
}
