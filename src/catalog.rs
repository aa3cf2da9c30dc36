// SPDX-License-Identifier: MPL-2.0
//! Prompt catalog loading.
//!
//! The catalog is a JSON array of prompt records bundled into the binary. A
//! file on disk with the same shape can replace it (`--data` or
//! `[gallery] data_path`). It is loaded once at startup and never mutated.
//!
//! ```json
//! [
//!   {
//!     "id": "p-001",
//!     "imageUrl": "https://example.com/p-001.jpg",
//!     "prompt": "a lighthouse at dusk, volumetric fog",
//!     "category": "Landscape",
//!     "tags": ["fog", "dusk"],
//!     "twitterUrl": "https://x.com/someone/status/1790000000000000000"
//!   }
//! ]
//! ```

use crate::domain::gallery::{distinct_categories, distinct_tags, PromptItem};
use crate::error::{CatalogError, Error, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "assets/data/"]
struct BundledData;

const BUNDLED_FILE: &str = "prompts.json";

/// On-disk record shape. Converted into [`PromptItem`] after validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    id: String,
    image_url: String,
    prompt: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    twitter_url: String,
}

impl From<RawItem> for PromptItem {
    fn from(raw: RawItem) -> Self {
        PromptItem::new(
            raw.id,
            raw.image_url,
            raw.prompt,
            raw.category,
            raw.tags,
            raw.twitter_url,
        )
    }
}

/// Where the catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
    /// Built in memory (tests, or the empty fallback).
    Memory,
}

/// The immutable, ordered list of prompt items plus its derived filter values.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<PromptItem>,
    categories: Vec<String>,
    tags: Vec<String>,
    source: CatalogSource,
}

impl Catalog {
    /// Loads the catalog bundled into the binary.
    pub fn bundled() -> std::result::Result<Self, CatalogError> {
        let file = BundledData::get(BUNDLED_FILE).ok_or(CatalogError::Missing)?;
        Self::from_json(file.data.as_ref(), CatalogSource::Bundled)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_json(&bytes, CatalogSource::File(path.to_path_buf())).map_err(Error::from)
    }

    /// Parses and validates a JSON catalog.
    pub fn from_json(bytes: &[u8], source: CatalogSource) -> std::result::Result<Self, CatalogError> {
        let raw: Vec<RawItem> =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut catalog = Self::from_items(raw.into_iter().map(PromptItem::from).collect())?;
        catalog.source = source;
        Ok(catalog)
    }

    /// Builds a catalog from items, checking id uniqueness and categories.
    pub fn from_items(items: Vec<PromptItem>) -> std::result::Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            if !ids.insert(item.id()) {
                return Err(CatalogError::DuplicateId(item.id().to_string()));
            }
            if item.category().trim().is_empty() {
                return Err(CatalogError::EmptyCategory(item.id().to_string()));
            }
        }

        Ok(Self {
            categories: distinct_categories(&items),
            tags: distinct_tags(&items),
            items,
            source: CatalogSource::Memory,
        })
    }

    /// A catalog with no items, used when loading fails.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            source: CatalogSource::Memory,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[PromptItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PromptItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&PromptItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct tags in first-seen order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }
}

/// Loads the catalog for this run.
///
/// Uses `data_path` when given, the bundled catalog otherwise. Returns an
/// empty catalog and a user-facing warning when loading fails, so the window
/// still opens.
pub fn load(data_path: Option<&Path>) -> (Catalog, Option<String>) {
    let result = match data_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::bundled().map_err(Error::from),
    };

    match result {
        Ok(catalog) => {
            log::info!(
                "loaded {} prompts ({} categories, {} tags) from {:?}",
                catalog.len(),
                catalog.categories().len(),
                catalog.tags().len(),
                catalog.source()
            );
            (catalog, None)
        }
        Err(err) => {
            log::warn!("failed to load catalog: {}", err);
            let message = match &err {
                Error::Catalog(catalog_err) => catalog_err.user_message(),
                _ => CatalogError::Missing.user_message(),
            };
            (Catalog::empty(), Some(message.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TWO_ITEMS: &str = r#"[
        {"id": "a", "imageUrl": "a.png", "prompt": "first", "category": "Portrait",
         "tags": ["soft"], "twitterUrl": "https://x.com/u/status/1"},
        {"id": "b", "imageUrl": "b.png", "prompt": "second", "category": "Landscape"}
    ]"#;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = Catalog::bundled().expect("bundled catalog should load");
        assert!(!catalog.is_empty());
        assert_eq!(catalog.source(), &CatalogSource::Bundled);
        assert!(catalog.items().iter().all(|i| !i.category().is_empty()));
    }

    #[test]
    fn parses_camel_case_records_and_defaults() {
        let catalog = Catalog::from_json(TWO_ITEMS.as_bytes(), CatalogSource::Memory).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.get(0).unwrap();
        assert_eq!(first.image_url(), "a.png");
        assert_eq!(first.post_url(), "https://x.com/u/status/1");

        let second = catalog.find("b").unwrap();
        assert!(second.tags().is_empty());
        assert_eq!(second.post_url(), "");
    }

    #[test]
    fn derived_filter_values_follow_first_seen_order() {
        let catalog = Catalog::from_json(TWO_ITEMS.as_bytes(), CatalogSource::Memory).unwrap();
        assert_eq!(catalog.categories(), &["Portrait", "Landscape"]);
        assert_eq!(catalog.tags(), &["soft"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let items = vec![
            PromptItem::new("x", "", "", "A", vec![], ""),
            PromptItem::new("x", "", "", "B", vec![], ""),
        ];
        assert_eq!(
            Catalog::from_items(items).unwrap_err(),
            CatalogError::DuplicateId("x".into())
        );
    }

    #[test]
    fn blank_category_is_rejected() {
        let items = vec![PromptItem::new("x", "", "", "  ", vec![], "")];
        assert_eq!(
            Catalog::from_items(items).unwrap_err(),
            CatalogError::EmptyCategory("x".into())
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json(b"{\"id\": 1}", CatalogSource::Memory).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn load_from_file_records_source() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("prompts.json");
        fs::write(&path, TWO_ITEMS).expect("write");

        let (catalog, warning) = load(Some(&path));
        assert!(warning.is_none());
        assert_eq!(catalog.source(), &CatalogSource::File(path));
    }

    #[test]
    fn load_failure_falls_back_to_empty_catalog_with_warning() {
        let dir = tempdir().expect("temp dir");
        let (catalog, warning) = load(Some(&dir.path().join("missing.json")));
        assert!(catalog.is_empty());
        assert!(warning.is_some());
    }
}
