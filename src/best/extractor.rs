use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::heuristics::{parse_entry_text, EntryFields, HeuristicRules};
use super::models::PostRecord;
use crate::config::Config;
use crate::constants::{sentinel, BEST_POST_LINK_PATH, DEFAULT_SITE_ORIGIN, MAX_POSTS};

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid link selector for path {path:?}: {message}")]
    InvalidSelector { path: String, message: String },
}

/// Why a single candidate link was skipped.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("anchor has no href")]
    MissingHref,
    #[error("invalid post link {link:?}")]
    InvalidLink {
        link: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for [`BestPostExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    /// Origin prepended to relative links, without trailing slash.
    pub site_origin: String,
    /// Path fragment identifying best-post links.
    pub link_path: String,
    pub max_posts: usize,
    pub rules: HeuristicRules,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            link_path: BEST_POST_LINK_PATH.to_string(),
            max_posts: MAX_POSTS,
            rules: HeuristicRules::default(),
        }
    }
}

impl ExtractorSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_origin: config.site_origin.trim_end_matches('/').to_string(),
            max_posts: config.max_posts,
            ..Self::default()
        }
    }
}

/// Turns the best-posts list markup into [`PostRecord`]s.
#[derive(Debug)]
pub struct BestPostExtractor {
    link_selector: Selector,
    settings: ExtractorSettings,
}

impl BestPostExtractor {
    /// Build an extractor, compiling the link selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the link path cannot be expressed as a selector.
    pub fn new(settings: ExtractorSettings) -> Result<Self, ExtractorError> {
        let css = format!(r#"a[href*="{}"]"#, settings.link_path.replace('"', "\\\""));
        let link_selector =
            Selector::parse(&css).map_err(|e| ExtractorError::InvalidSelector {
                path: settings.link_path.clone(),
                message: format!("{e:?}"),
            })?;

        Ok(Self {
            link_selector,
            settings,
        })
    }

    /// Extract up to `max_posts` posts in document order.
    ///
    /// Candidates that fail are logged and skipped; ranks stay contiguous.
    #[must_use]
    pub fn extract(&self, html: &str) -> Vec<PostRecord> {
        let document = Html::parse_document(html);
        let mut posts = Vec::new();

        let candidates = document
            .select(&self.link_selector)
            .take(self.settings.max_posts);

        for (position, anchor) in candidates.enumerate() {
            match self.extract_candidate(&anchor) {
                Ok((link, fields)) => {
                    let rank = u32::try_from(posts.len() + 1).unwrap_or(u32::MAX);
                    posts.push(into_record(rank, link, fields));
                }
                Err(e) => {
                    warn!(position, error = ?e, "Skipping best-post candidate");
                }
            }
        }

        debug!(count = posts.len(), "Extracted best posts");
        posts
    }

    fn extract_candidate(
        &self,
        anchor: &ElementRef<'_>,
    ) -> Result<(String, EntryFields), CandidateError> {
        let href = anchor
            .value()
            .attr("href")
            .ok_or(CandidateError::MissingHref)?;
        let link = self.absolute_link(href)?;

        let raw_text = collapsed_text(anchor);
        Ok((link, parse_entry_text(&raw_text, &self.settings.rules)))
    }

    /// Prefix relative hrefs with the site origin.
    ///
    /// Hrefs that already carry a scheme are passed through unchanged.
    fn absolute_link(&self, href: &str) -> Result<String, CandidateError> {
        let href = href.trim();
        let link = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{href}", self.settings.site_origin)
        };

        Url::parse(&link).map_err(|source| CandidateError::InvalidLink {
            link: link.clone(),
            source,
        })?;
        Ok(link)
    }
}

/// Text nodes of an element, trimmed and joined by single spaces.
fn collapsed_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn into_record(rank: u32, link: String, fields: EntryFields) -> PostRecord {
    PostRecord {
        rank,
        title: fields.title,
        author: fields.author.unwrap_or_else(|| sentinel::AUTHOR.to_string()),
        posted_time: fields
            .posted_time
            .unwrap_or_else(|| sentinel::POSTED_TIME.to_string()),
        view_count: fields
            .view_count
            .unwrap_or_else(|| sentinel::VIEW_COUNT.to_string()),
        like_count: fields
            .like_count
            .unwrap_or_else(|| sentinel::LIKE_COUNT.to_string()),
        comment_count: fields
            .comment_count
            .unwrap_or_else(|| sentinel::COMMENT_COUNT.to_string()),
        link,
    }
}
