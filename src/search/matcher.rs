//! Tiered snippet matching.
//!
//! Citation snippets are frequently truncated or slightly reworded upstream,
//! so an exact search alone misses too often. The matcher tries the full
//! phrase first and then progressively shorter word prefixes:
//!
//! 1. full normalized query
//! 2. first four words (query longer than `four_word_min_chars`)
//! 3. first two words (query longer than `two_word_min_chars`)
//!
//! The first tier that finds anything wins; within a tier the leftmost
//! occurrence wins.

use crate::config::HighlightConfig;
use crate::text::{NormalizedQuery, PageTextIndex};
use serde::{Deserialize, Serialize};

/// Which fallback strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The complete normalized query
    FullPhrase,
    /// The first four words of the query
    FourWordPrefix,
    /// The first two words of the query
    TwoWordPrefix,
}

/// Matched character range expressed in runs.
///
/// The end offset is exclusive: `end_char_offset_in_run` is one past the last
/// highlighted character of run `end_run_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanBounds {
    /// Run holding the first matched character
    pub start_run_index: usize,
    /// Offset of the first matched character within its run
    pub start_char_offset_in_run: usize,
    /// Run holding the last matched character
    pub end_run_index: usize,
    /// Offset just past the last matched character within its run
    pub end_char_offset_in_run: usize,
}

/// Outcome of [`find_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchSpan {
    /// No tier found the query on the page
    NoMatch,
    /// A tier matched
    Found {
        /// Tier that matched
        tier: MatchTier,
        /// Matched range
        bounds: SpanBounds,
    },
}

impl MatchSpan {
    /// True unless this is [`MatchSpan::NoMatch`].
    pub fn is_match(&self) -> bool {
        matches!(self, MatchSpan::Found { .. })
    }

    /// Tier that matched, if any.
    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            MatchSpan::Found { tier, .. } => Some(*tier),
            MatchSpan::NoMatch => None,
        }
    }

    /// Matched range, if any.
    pub fn bounds(&self) -> Option<SpanBounds> {
        match self {
            MatchSpan::Found { bounds, .. } => Some(*bounds),
            MatchSpan::NoMatch => None,
        }
    }
}

/// Find the query on the page with the default tier thresholds.
///
/// # Examples
///
/// ```
/// use snippet_highlight::search::{find_span, MatchTier};
/// use snippet_highlight::text::{build_index, normalize, RawFragment};
///
/// let index = build_index(&[
///     RawFragment::at("The quick", 72.0, 700.0, 12.0),
///     RawFragment::at("brown fox jumps", 72.0, 686.0, 12.0),
/// ]);
/// let span = find_span(&index, &normalize("quick brown").unwrap());
/// assert_eq!(span.tier(), Some(MatchTier::FullPhrase));
/// ```
pub fn find_span(index: &PageTextIndex, query: &NormalizedQuery) -> MatchSpan {
    find_span_with_config(index, query, &HighlightConfig::default())
}

/// Find the query on the page, trying each tier in priority order.
pub fn find_span_with_config(
    index: &PageTextIndex,
    query: &NormalizedQuery,
    config: &HighlightConfig,
) -> MatchSpan {
    if index.is_empty() {
        return MatchSpan::NoMatch;
    }

    for (tier, needle) in tier_needles(query, config) {
        let Some((start, end)) = index.find_folded(&needle) else {
            log::trace!("Tier {:?} missed for {:?}", tier, needle);
            continue;
        };

        return match resolve_bounds(index, start, end) {
            Some(bounds) => {
                log::debug!(
                    "Tier {:?} matched {:?} at chars {}..{} (runs {}..={})",
                    tier,
                    needle,
                    start,
                    end,
                    bounds.start_run_index,
                    bounds.end_run_index
                );
                MatchSpan::Found { tier, bounds }
            },
            None => {
                log::warn!("Match at chars {}..{} does not resolve to runs", start, end);
                MatchSpan::NoMatch
            },
        };
    }

    MatchSpan::NoMatch
}

/// Candidate needles in priority order, skipping repeats of a needle that
/// has already been tried.
fn tier_needles(query: &NormalizedQuery, config: &HighlightConfig) -> Vec<(MatchTier, String)> {
    let mut needles = vec![(MatchTier::FullPhrase, query.as_str().to_string())];
    let len = query.char_len();

    if len > config.four_word_min_chars {
        needles.push((MatchTier::FourWordPrefix, query.prefix_words(4)));
    }
    if len > config.two_word_min_chars {
        needles.push((MatchTier::TwoWordPrefix, query.prefix_words(2)));
    }

    let mut unique: Vec<(MatchTier, String)> = Vec::with_capacity(needles.len());
    for (tier, needle) in needles {
        if !unique.iter().any(|(_, seen)| *seen == needle) {
            unique.push((tier, needle));
        }
    }
    unique
}

/// Translate a full-text range `[start, end)` into run coordinates.
fn resolve_bounds(index: &PageTextIndex, start: usize, end: usize) -> Option<SpanBounds> {
    if end <= start {
        return None;
    }
    let (start_run_index, start_char_offset_in_run) = index.locate_offset(start)?;
    let (end_run_index, last_offset) = index.locate_offset(end - 1)?;
    Some(SpanBounds {
        start_run_index,
        start_char_offset_in_run,
        end_run_index,
        end_char_offset_in_run: last_offset + 1,
    })
}
