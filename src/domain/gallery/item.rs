// SPDX-License-Identifier: MPL-2.0
//! The prompt catalog entry.

use std::borrow::Cow;

/// Suffix appended to a truncated card prompt.
pub const CARD_ELLIPSIS: &str = "...";

/// One gallery entry: image, generation prompt, category, tags and the
/// link to the social post it was published in.
///
/// Items are immutable once loaded; fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptItem {
    id: String,
    image_url: String,
    prompt: String,
    category: String,
    tags: Vec<String>,
    post_url: String,
}

impl PromptItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        prompt: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
        post_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            prompt: prompt.into(),
            category: category.into(),
            tags,
            post_url: post_url.into(),
        }
    }

    /// Unique identifier, used as the list key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Image reference (URL or local path), never rewritten.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// The full, untruncated prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// URL of the social post this prompt was published in. May be empty.
    #[must_use]
    pub fn post_url(&self) -> &str {
        &self.post_url
    }

    /// Prompt text as shown on a grid card.
    #[must_use]
    pub fn card_prompt(&self, max_chars: usize) -> Cow<'_, str> {
        card_excerpt(&self.prompt, max_chars)
    }
}

/// Returns the first `max_chars` characters of `prompt` followed by
/// [`CARD_ELLIPSIS`] when the prompt is longer, or the prompt unchanged.
///
/// Counts Unicode scalar values so multi-byte text is never split.
#[must_use]
pub fn card_excerpt(prompt: &str, max_chars: usize) -> Cow<'_, str> {
    match prompt.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{}", &prompt[..byte_idx], CARD_ELLIPSIS)),
        None => Cow::Borrowed(prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_prompt(prompt: &str) -> PromptItem {
        PromptItem::new("p1", "img.png", prompt, "Portrait", vec![], "")
    }

    #[test]
    fn short_prompt_is_borrowed_unchanged() {
        let excerpt = card_excerpt("a cat in the rain", 120);
        assert!(matches!(excerpt, Cow::Borrowed(_)));
        assert_eq!(excerpt, "a cat in the rain");
    }

    #[test]
    fn prompt_of_exact_limit_is_not_truncated() {
        let prompt = "x".repeat(120);
        assert_eq!(card_excerpt(&prompt, 120), prompt.as_str());
    }

    #[test]
    fn long_prompt_shows_limit_plus_ellipsis() {
        let prompt: String = (0..150).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let item = item_with_prompt(&prompt);

        let card = item.card_prompt(120);
        assert_eq!(card.chars().count(), 120 + CARD_ELLIPSIS.len());
        assert!(card.ends_with(CARD_ELLIPSIS));
        assert_eq!(&card[..120], &prompt[..120]);

        // The full text stays available for the modal and copy.
        assert_eq!(item.prompt().chars().count(), 150);
        assert_eq!(item.prompt(), prompt);
    }

    #[test]
    fn multibyte_prompt_is_cut_on_char_boundary() {
        let prompt = "夜".repeat(130);
        let excerpt = card_excerpt(&prompt, 120);
        assert_eq!(excerpt.chars().filter(|c| *c == '夜').count(), 120);
        assert!(excerpt.ends_with(CARD_ELLIPSIS));
    }

    #[test]
    fn has_tag_checks_membership() {
        let item = PromptItem::new(
            "p1",
            "img.png",
            "prompt",
            "Landscape",
            vec!["night".into(), "city".into()],
            "",
        );
        assert!(item.has_tag("city"));
        assert!(!item.has_tag("forest"));
    }
}
