// SPDX-License-Identifier: MPL-2.0
//! Gallery filter engine.
//!
//! Pure functions deriving the category and tag sets from the catalog and the
//! visible subset for a given selection, plus a memoizing wrapper used by the
//! view so the grid is only recomputed when the selection changes.
//!
//! # Available Types
//!
//! - [`FilterSelection`]: Active category and tag (both optional)
//! - [`FilterMode`]: Whether category and tag combine or replace each other
//! - [`FilterCache`]: Memoized visible indices for the current selection

use super::item::PromptItem;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Filter Mode
// =============================================================================

/// How a category selection and a tag selection interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Both filters may be active at once; an item must match both (AND).
    #[default]
    Combined,
    /// Selecting a category clears the tag and vice versa.
    Exclusive,
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combined" => Ok(FilterMode::Combined),
            "exclusive" => Ok(FilterMode::Exclusive),
            other => Err(format!("invalid filter_mode: {}", other)),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Combined => f.write_str("combined"),
            FilterMode::Exclusive => f.write_str("exclusive"),
        }
    }
}

// =============================================================================
// Filter Selection
// =============================================================================

/// The user's active filters. `None` means "no filter" for that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct FilterSelection {
    category: Option<String>,
    tag: Option<String>,
}

impl FilterSelection {
    /// Creates a selection with no active filter (shows everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Sets the active category. In exclusive mode an active tag is cleared.
    pub fn select_category(&mut self, category: Option<String>, mode: FilterMode) {
        if mode == FilterMode::Exclusive && category.is_some() {
            self.tag = None;
        }
        self.category = category;
    }

    /// Sets the active tag. In exclusive mode an active category is cleared.
    pub fn select_tag(&mut self, tag: Option<String>, mode: FilterMode) {
        if mode == FilterMode::Exclusive && tag.is_some() {
            self.category = None;
        }
        self.tag = tag;
    }

    /// Returns `true` if any filter is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.tag.is_some()
    }

    /// Resets all filters ("show all").
    pub fn clear(&mut self) {
        self.category = None;
        self.tag = None;
    }

    /// Returns `true` if `item` passes every active filter.
    #[must_use]
    pub fn matches(&self, item: &PromptItem) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| c == item.category());
        let tag_ok = self.tag.as_deref().is_none_or(|t| item.has_tag(t));
        category_ok && tag_ok
    }
}

// =============================================================================
// Derivations
// =============================================================================

/// Distinct categories in first-seen order.
#[must_use]
pub fn distinct_categories(items: &[PromptItem]) -> Vec<String> {
    first_seen(items.iter().map(PromptItem::category))
}

/// Distinct tags in first-seen order (items in order, tags in listed order).
#[must_use]
pub fn distinct_tags(items: &[PromptItem]) -> Vec<String> {
    first_seen(
        items
            .iter()
            .flat_map(|item| item.tags().iter().map(String::as_str)),
    )
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

/// Items passing `selection`, in their original relative order.
#[must_use]
pub fn visible_items<'a>(items: &'a [PromptItem], selection: &FilterSelection) -> Vec<&'a PromptItem> {
    items.iter().filter(|item| selection.matches(item)).collect()
}

// =============================================================================
// Memoization
// =============================================================================

/// Caches the indices of visible items for the last selection.
///
/// The catalog is immutable for the process lifetime, so the cache key is the
/// selection plus the catalog length (a different catalog is a different key).
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(FilterSelection, usize)>,
    indices: Vec<usize>,
    recomputations: usize,
}

impl FilterCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the indices into `items` that pass `selection`, recomputing
    /// only when the selection or the catalog changed since the last call.
    pub fn visible_indices(&mut self, items: &[PromptItem], selection: &FilterSelection) -> &[usize] {
        let fresh = matches!(&self.key, Some((sel, len)) if sel == selection && *len == items.len());
        if !fresh {
            self.indices = items
                .iter()
                .enumerate()
                .filter(|(_, item)| selection.matches(item))
                .map(|(idx, _)| idx)
                .collect();
            self.key = Some((selection.clone(), items.len()));
            self.recomputations += 1;
        }
        &self.indices
    }

    /// Indices from the last computation, without revalidating.
    #[must_use]
    pub fn cached(&self) -> &[usize] {
        &self.indices
    }

    /// Number of times the visible set was actually recomputed.
    #[must_use]
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, tags: &[&str]) -> PromptItem {
        PromptItem::new(
            id,
            format!("https://img.example/{id}.png"),
            format!("prompt {id}"),
            category,
            tags.iter().map(|t| t.to_string()).collect(),
            format!("https://x.com/user/status/{}", id.len()),
        )
    }

    fn sample() -> Vec<PromptItem> {
        vec![
            item("1", "Portrait", &["soft", "film"]),
            item("2", "Landscape", &["night"]),
            item("3", "Portrait", &["night", "neon"]),
            item("4", "Anime", &[]),
            item("5", "Landscape", &["film"]),
        ]
    }

    fn ids(items: &[&PromptItem]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    // -------------------------------------------------------------------------
    // Derivations
    // -------------------------------------------------------------------------

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        assert_eq!(
            distinct_categories(&sample()),
            vec!["Portrait", "Landscape", "Anime"]
        );
    }

    #[test]
    fn tags_are_distinct_in_first_seen_order() {
        assert_eq!(
            distinct_tags(&sample()),
            vec!["soft", "film", "night", "neon"]
        );
    }

    #[test]
    fn derivations_of_empty_catalog_are_empty() {
        assert!(distinct_categories(&[]).is_empty());
        assert!(distinct_tags(&[]).is_empty());
    }

    // -------------------------------------------------------------------------
    // Visible items
    // -------------------------------------------------------------------------

    #[test]
    fn no_filter_returns_everything_in_order() {
        let items = sample();
        let visible = visible_items(&items, &FilterSelection::new());
        assert_eq!(ids(&visible), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn category_filter_preserves_relative_order() {
        let items = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("Landscape".into()), FilterMode::Combined);

        let visible = visible_items(&items, &selection);
        assert_eq!(ids(&visible), vec!["2", "5"]);
        assert!(visible.iter().all(|i| i.category() == "Landscape"));
    }

    #[test]
    fn tag_filter_matches_membership() {
        let items = sample();
        let mut selection = FilterSelection::new();
        selection.select_tag(Some("night".into()), FilterMode::Combined);

        assert_eq!(ids(&visible_items(&items, &selection)), vec!["2", "3"]);
    }

    #[test]
    fn combined_mode_requires_both_predicates() {
        let items = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("Portrait".into()), FilterMode::Combined);
        selection.select_tag(Some("night".into()), FilterMode::Combined);

        assert_eq!(selection.category(), Some("Portrait"));
        assert_eq!(ids(&visible_items(&items, &selection)), vec!["3"]);
    }

    #[test]
    fn exclusive_mode_replaces_the_other_filter() {
        let mut selection = FilterSelection::new();
        selection.select_category(Some("Portrait".into()), FilterMode::Exclusive);
        selection.select_tag(Some("film".into()), FilterMode::Exclusive);
        assert_eq!(selection.category(), None);
        assert_eq!(selection.tag(), Some("film"));

        selection.select_category(Some("Anime".into()), FilterMode::Exclusive);
        assert_eq!(selection.tag(), None);
        assert_eq!(selection.category(), Some("Anime"));
    }

    #[test]
    fn clearing_one_dimension_keeps_the_other_in_exclusive_mode() {
        let mut selection = FilterSelection::new();
        selection.select_tag(Some("film".into()), FilterMode::Exclusive);
        selection.select_category(None, FilterMode::Exclusive);
        assert_eq!(selection.tag(), Some("film"));
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let items = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("Abstract".into()), FilterMode::Combined);
        assert!(visible_items(&items, &selection).is_empty());
    }

    #[test]
    fn clear_resets_to_show_all() {
        let items = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("Anime".into()), FilterMode::Combined);
        selection.select_tag(Some("film".into()), FilterMode::Combined);
        assert!(selection.is_active());

        selection.clear();
        assert!(!selection.is_active());
        assert_eq!(visible_items(&items, &selection).len(), items.len());
    }

    #[test]
    fn every_selection_yields_an_order_preserving_subsequence() {
        let items = sample();
        let mut categories: Vec<Option<String>> =
            distinct_categories(&items).into_iter().map(Some).collect();
        categories.push(None);
        let mut tags: Vec<Option<String>> = distinct_tags(&items).into_iter().map(Some).collect();
        tags.push(None);

        for category in &categories {
            for tag in &tags {
                let mut selection = FilterSelection::new();
                selection.select_category(category.clone(), FilterMode::Combined);
                selection.select_tag(tag.clone(), FilterMode::Combined);

                let visible = visible_items(&items, &selection);
                let positions: Vec<usize> = visible
                    .iter()
                    .map(|v| items.iter().position(|i| i.id() == v.id()).unwrap())
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
                assert!(visible.iter().all(|v| selection.matches(v)));
            }
        }
    }

    // -------------------------------------------------------------------------
    // FilterCache
    // -------------------------------------------------------------------------

    #[test]
    fn cache_skips_recomputation_for_same_selection() {
        let items = sample();
        let selection = FilterSelection::new();
        let mut cache = FilterCache::new();

        assert_eq!(cache.visible_indices(&items, &selection), &[0, 1, 2, 3, 4]);
        let _ = cache.visible_indices(&items, &selection);
        assert_eq!(cache.recomputations(), 1);
    }

    #[test]
    fn cache_recomputes_when_selection_changes() {
        let items = sample();
        let mut selection = FilterSelection::new();
        let mut cache = FilterCache::new();
        let _ = cache.visible_indices(&items, &selection);

        selection.select_category(Some("Anime".into()), FilterMode::Combined);
        assert_eq!(cache.visible_indices(&items, &selection), &[3]);
        assert_eq!(cache.cached(), &[3]);
        assert_eq!(cache.recomputations(), 2);
    }

    #[test]
    fn filter_mode_parses_case_insensitively() {
        assert_eq!("Exclusive".parse::<FilterMode>(), Ok(FilterMode::Exclusive));
        assert_eq!(" combined ".parse::<FilterMode>(), Ok(FilterMode::Combined));
        assert!("either".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::Exclusive.to_string(), "exclusive");
    }
}
