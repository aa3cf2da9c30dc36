// SPDX-License-Identifier: MPL-2.0
//! oEmbed-backed embed library.
//!
//! The provider answers `GET <endpoint>?url=<post>` with JSON whose `html`
//! field carries a blockquote like:
//!
//! ```html
//! <blockquote class="twitter-tweet"><p lang="en" dir="ltr">text</p>
//! &mdash; Name (@handle) <a href="https://twitter.com/handle/status/1">May 1, 2024</a></blockquote>
//! ```
//!
//! That markup is turned into an [`EmbeddedPost`].

use super::loader::EmbedScript;
use super::mount::permalink_for;
use super::{EmbedError, EmbedLibrary, EmbedOptions, EmbedResult, EmbeddedPost};
use crate::config::defaults::EMBED_REQUEST_TIMEOUT_SECS;
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const SCRIPT_MARKER: &str = "oembed-client";

/// Bootstrap that builds the HTTP client for an oEmbed endpoint.
#[derive(Debug, Clone)]
pub struct OEmbedScript {
    endpoint: String,
}

impl OEmbedScript {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl EmbedScript for OEmbedScript {
    fn marker(&self) -> &str {
        SCRIPT_MARKER
    }

    fn load(&self) -> BoxFuture<'static, Result<Arc<dyn EmbedLibrary>, EmbedError>> {
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(EMBED_REQUEST_TIMEOUT_SECS))
                .user_agent(concat!("prompt_gallery/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| EmbedError::LibraryUnavailable(e.to_string()))?;
            let library: Arc<dyn EmbedLibrary> = Arc::new(OEmbedLibrary { client, endpoint });
            Ok(library)
        })
    }
}

#[derive(Debug, Clone)]
pub struct OEmbedLibrary {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    html: String,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl EmbedLibrary for OEmbedLibrary {
    fn create_embed(&self, post_id: &str, options: &EmbedOptions) -> BoxFuture<'static, EmbedResult> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let post_id = post_id.to_string();
        let options = *options;

        Box::pin(async move {
            let target = permalink_for(&post_id);
            let response = client
                .get(&endpoint)
                .query(&[
                    ("url", target.as_str()),
                    ("theme", options.theme.as_str()),
                    ("align", options.align.as_str()),
                    ("dnt", if options.dnt { "true" } else { "false" }),
                    ("omit_script", "true"),
                ])
                .send()
                .await
                .map_err(|e| EmbedError::Render(e.to_string()))?;

            // Deleted, protected and unknown posts come back as 403/404.
            if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::FORBIDDEN) {
                log::debug!("post {} not available ({})", post_id, response.status());
                return Ok(None);
            }
            let response = response
                .error_for_status()
                .map_err(|e| EmbedError::Render(e.to_string()))?;
            let body: OEmbedResponse = response
                .json()
                .await
                .map_err(|e| EmbedError::Render(e.to_string()))?;

            let permalink = body.url.unwrap_or(target);
            let mut post = parse_blockquote(&body.html, &post_id, &permalink);
            if let (Some(post), Some(name)) = (post.as_mut(), body.author_name) {
                if post.author_name.is_empty() {
                    post.author_name = name;
                }
            }
            Ok(post)
        })
    }
}

/// Extracts the post content from oEmbed blockquote markup.
///
/// Returns `None` when the markup holds neither text nor an author line.
pub fn parse_blockquote(html: &str, post_id: &str, permalink: &str) -> Option<EmbeddedPost> {
    let fragment = Html::parse_fragment(html);
    let quote_selector = Selector::parse("blockquote").ok()?;
    let paragraph_selector = Selector::parse("p").ok()?;
    let blockquote = fragment.select(&quote_selector).next()?;

    let paragraphs: Vec<String> = blockquote
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    let mut attribution = String::new();
    let mut date = None;
    for child in blockquote.children() {
        if let Some(text) = child.value().as_text() {
            attribution.push_str(text);
        } else if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() == "a" {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    date = Some(text);
                }
            }
        }
    }
    let (author_name, author_handle) = parse_attribution(&attribution);

    if paragraphs.is_empty() && author_name.is_empty() {
        return None;
    }

    Some(EmbeddedPost {
        post_id: post_id.to_string(),
        author_name,
        author_handle,
        paragraphs,
        date,
        permalink: permalink.to_string(),
    })
}

/// Splits `— Name (@handle)` into its parts.
fn parse_attribution(raw: &str) -> (String, Option<String>) {
    let line = raw
        .trim()
        .trim_start_matches(['—', '-'])
        .trim();

    match (line.rfind("(@"), line.ends_with(')')) {
        (Some(start), true) => {
            let name = line[..start].trim().to_string();
            let handle = line[start + 2..line.len() - 1].trim().to_string();
            (name, (!handle.is_empty()).then_some(handle))
        }
        _ => (line.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<blockquote class="twitter-tweet" data-theme="dark"><p lang="en" dir="ltr">A lighthouse at dusk<br>volumetric fog</p><p>second line</p>&mdash; Prompt Gallery (@promptgallery) <a href="https://twitter.com/promptgallery/status/1790000000000000001?ref_src=twsrc%5Etfw">May 14, 2024</a></blockquote>"#;

    #[test]
    fn parses_paragraphs_author_and_date() {
        let post = parse_blockquote(MARKUP, "1790000000000000001", "https://x.com/p/status/1")
            .expect("post");
        assert_eq!(post.paragraphs.len(), 2);
        assert!(post.paragraphs[0].starts_with("A lighthouse at dusk"));
        assert_eq!(post.paragraphs[1], "second line");
        assert_eq!(post.author_name, "Prompt Gallery");
        assert_eq!(post.author_handle.as_deref(), Some("promptgallery"));
        assert_eq!(post.date.as_deref(), Some("May 14, 2024"));
        assert_eq!(post.permalink, "https://x.com/p/status/1");
    }

    #[test]
    fn empty_markup_is_empty_result() {
        assert!(parse_blockquote("", "1", "u").is_none());
        assert!(parse_blockquote("<blockquote></blockquote>", "1", "u").is_none());
    }

    #[test]
    fn attribution_without_handle_keeps_name() {
        assert_eq!(
            parse_attribution(" — Someone "),
            ("Someone".to_string(), None)
        );
        assert_eq!(
            parse_attribution("— A (B) (@ab)"),
            ("A (B)".to_string(), Some("ab".to_string()))
        );
    }

    #[tokio::test]
    async fn script_builds_a_library() {
        let script = OEmbedScript::new("http://127.0.0.1:9/oembed");
        assert_eq!(script.marker(), SCRIPT_MARKER);
        assert!(script.load().await.is_ok());
    }
}
