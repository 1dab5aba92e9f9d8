//! Engine facade tying the index cache, matcher, mapper and session together.
//!
//! The only asynchronous boundary is page text extraction. The caller hands
//! extracted fragments over with [`HighlightEngine::load_page`] whenever they
//! arrive. Everything after that is synchronous and CPU-bound. Computation
//! and publication are split so callers can run [`HighlightEngine::compute`]
//! on any thread and report back with [`HighlightEngine::complete`].

use super::mapper::{check_viewport_transform, to_rects_with_config};
use super::session::{
    CompletionOutcome, HighlightSession, HighlightTicket, PublishedHighlight, SessionStatus,
};
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::geometry::{Matrix, Rect};
use crate::search::{find_span_with_config, SearchQuery};
use crate::text::{normalize_with_config, PageIndexCache, PageTextIndex, RawFragment};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe highlight engine.
#[derive(Debug, Default)]
pub struct HighlightEngine {
    config: HighlightConfig,
    cache: PageIndexCache,
    session: Mutex<HighlightSession>,
}

impl HighlightEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    ///
    /// Fails with [`InvalidConfig`](crate::Error::InvalidConfig) when the configuration does not
    /// pass [`HighlightConfig::validate`].
    pub fn with_config(config: HighlightConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: PageIndexCache::new(),
            session: Mutex::new(HighlightSession::new()),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// The shared page index cache.
    pub fn cache(&self) -> &PageIndexCache {
        &self.cache
    }

    /// Extraction for `page` finished; index its fragments.
    ///
    /// Identical fragments reuse the cached index.
    pub fn load_page(&self, page: u32, fragments: &[RawFragment]) -> Arc<PageTextIndex> {
        self.cache.get_or_build(page, fragments)
    }

    /// Issue a new generation for `query`, superseding any in-flight one.
    pub fn submit(&self, query: SearchQuery) -> HighlightTicket {
        self.lock_session().submit(query)
    }

    /// Run normalization, matching and mapping for a ticket.
    ///
    /// Pure with respect to the session: nothing is published. Every failure
    /// mode (no extracted text, rejected query, no match, unusable transform)
    /// yields an empty list.
    pub fn compute(&self, ticket: &HighlightTicket, page_to_viewport: &Matrix) -> Vec<Rect> {
        let page = ticket.page();
        let Some(index) = self.cache.get(page) else {
            log::debug!("No extracted text for page {}; nothing to highlight", page);
            return Vec::new();
        };
        if index.is_empty() {
            log::debug!("Page {} has no text runs; nothing to highlight", page);
            return Vec::new();
        }

        if let Err(e) = check_viewport_transform(page_to_viewport) {
            log::warn!("Skipping highlight on page {}: {}", page, e);
            return Vec::new();
        }

        let query = match normalize_with_config(ticket.query().text(), &self.config) {
            Ok(query) => query,
            Err(e) => {
                log::debug!("{}", e);
                return Vec::new();
            },
        };

        let span = find_span_with_config(&index, &query, &self.config);
        if !span.is_match() {
            log::debug!("No match for {:?} on page {}", query.as_str(), page);
        }
        to_rects_with_config(&index, &span, page_to_viewport, &self.config)
    }

    /// Offer a finished computation to the session.
    pub fn complete(&self, ticket: &HighlightTicket, rects: Vec<Rect>) -> CompletionOutcome {
        self.lock_session().complete(ticket, rects)
    }

    /// Submit, compute and complete in one call.
    pub fn highlight(&self, query: SearchQuery, page_to_viewport: &Matrix) -> CompletionOutcome {
        let ticket = self.submit(query);
        let rects = self.compute(&ticket, page_to_viewport);
        self.complete(&ticket, rects)
    }

    /// True when `ticket` has not been superseded yet.
    pub fn is_current(&self, ticket: &HighlightTicket) -> bool {
        self.lock_session().is_current(ticket)
    }

    /// Drop the current request and any shown highlight.
    pub fn clear(&self) {
        self.lock_session().clear();
    }

    /// Session state.
    pub fn status(&self) -> SessionStatus {
        self.lock_session().status()
    }

    /// Snapshot of the highlight to draw.
    pub fn published(&self) -> Option<PublishedHighlight> {
        self.lock_session().published().cloned()
    }

    fn lock_session(&self) -> MutexGuard<'_, HighlightSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
