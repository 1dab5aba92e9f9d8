//! Query normalization.
//!
//! Queries and page text are compared in one canonical form: lower-case,
//! whitespace runs collapsed to a single space. Both sides fold characters
//! through [`fold_char`] so offsets in the folded page text stay one-to-one
//! with the original characters.

use crate::config::HighlightConfig;
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Lower-case a single character without changing the character count.
///
/// Characters whose lower-case form expands to several code points keep only
/// the first one.
pub(crate) fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// A query in canonical form, ready for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedQuery {
    text: String,
    char_len: usize,
}

impl NormalizedQuery {
    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// The first `n` space-delimited words, joined by single spaces.
    pub fn prefix_words(&self, n: usize) -> String {
        self.text.split(' ').take(n).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalize with the default configuration.
///
/// # Examples
///
/// ```
/// use snippet_highlight::text::normalize;
///
/// let q = normalize("  Revenue   GREW\n12 percent ").unwrap();
/// assert_eq!(q.as_str(), "revenue grew 12 percent");
///
/// assert!(normalize(" a ").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<NormalizedQuery> {
    normalize_with_config(raw, &HighlightConfig::default())
}

/// Lower-case, trim, collapse whitespace, truncate, then enforce the
/// minimum length.
pub fn normalize_with_config(raw: &str, config: &HighlightConfig) -> Result<NormalizedQuery> {
    let lowered: String = raw.chars().map(fold_char).collect();
    let collapsed = WHITESPACE_RUN.replace_all(lowered.trim(), " ");

    let truncated: String = collapsed.chars().take(config.max_query_chars).collect();
    // A cut right after a word leaves a dangling separator.
    let text = truncated.trim_end().to_string();
    let char_len = text.chars().count();

    if char_len < config.min_query_chars {
        log::trace!("Rejecting query {:?}: {} chars after normalization", raw, char_len);
        return Err(Error::QueryRejected {
            length: char_len,
            minimum: config.min_query_chars,
        });
    }

    Ok(NormalizedQuery { text, char_len })
}
