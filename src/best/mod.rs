//! Best-posts board scraping.
//!
//! [`BoardFetcher`] downloads and decodes the listing, [`BestPostExtractor`]
//! turns the markup into [`PostRecord`]s, and [`BestPostCollector`] runs the
//! two once per request.

pub mod decode;
pub mod extractor;
pub mod fetcher;
pub mod heuristics;
pub mod models;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

pub use extractor::{BestPostExtractor, CandidateError, ExtractorError, ExtractorSettings};
pub use fetcher::{BoardFetcher, FetchError, FetchedPage};
pub use heuristics::{parse_entry_text, EntryFields, HeuristicRules};
pub use models::{PostRecord, ResultEnvelope};

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to fetch best posts page")]
    Fetch(#[from] FetchError),
    #[error("extraction task failed")]
    Worker(#[from] tokio::task::JoinError),
}

/// Errors building a [`BestPostCollector`].
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Fetcher(#[from] FetchError),
    #[error(transparent)]
    Extractor(#[from] ExtractorError),
}

/// Fetch + extract, one attempt per call, nothing cached.
#[derive(Debug, Clone)]
pub struct BestPostCollector {
    fetcher: BoardFetcher,
    extractor: Arc<BestPostExtractor>,
}

impl BestPostCollector {
    #[must_use]
    pub fn new(fetcher: BoardFetcher, extractor: BestPostExtractor) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
        }
    }

    /// Build the fetcher and extractor from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or link selector cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let fetcher = BoardFetcher::from_config(config)?;
        let extractor = BestPostExtractor::new(ExtractorSettings::from_config(config))?;
        Ok(Self::new(fetcher, extractor))
    }

    /// Fetch the board and extract its posts.
    ///
    /// Parsing runs on the blocking pool; the parsed DOM is not `Send`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Fetch`] on any network failure and
    /// [`CollectError::Worker`] if extraction panics.
    pub async fn collect(&self) -> Result<Vec<PostRecord>, CollectError> {
        let page = self.fetcher.fetch().await?;
        debug!(
            declared = page.declared_charset,
            decoded_as = page.decoded_as,
            "Best posts page fetched"
        );

        let extractor = Arc::clone(&self.extractor);
        let posts = tokio::task::spawn_blocking(move || extractor.extract(&page.html)).await?;

        info!(url = %self.fetcher.url(), count = posts.len(), "Collected best posts");
        Ok(posts)
    }
}
