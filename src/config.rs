//! Configuration for snippet matching and highlight geometry.
//!
//! The tier thresholds are heuristics tuned for short citation snippets,
//! so they are kept here as tunable values rather than baked into the matcher.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound on normalized query length, in characters.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 100;

/// Default lower bound on normalized query length, in characters (inclusive).
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Queries longer than this may fall back to their first four words.
pub const DEFAULT_FOUR_WORD_MIN_CHARS: usize = 10;

/// Queries longer than this may fall back to their first two words.
pub const DEFAULT_TWO_WORD_MIN_CHARS: usize = 5;

/// Average glyph advance as a fraction of the font size.
pub const DEFAULT_CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Smallest width/height of an emitted rectangle, in device pixels.
pub const DEFAULT_MIN_RECT_SIZE: f32 = 3.0;

/// How a matched span is turned into rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectMode {
    /// One bounding box around every contributing run
    #[default]
    Single,
    /// One box per baseline, for matches that wrap across lines
    PerLine,
}

/// Highlight engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Normalized queries are truncated to this many characters.
    pub max_query_chars: usize,

    /// Normalized queries shorter than this are rejected.
    pub min_query_chars: usize,

    /// Four-word-prefix tier applies when the query is longer than this.
    pub four_word_min_chars: usize,

    /// Two-word-prefix tier applies when the query is longer than this.
    pub two_word_min_chars: usize,

    /// Proportional-width approximation: advance = font_size * factor.
    pub char_width_factor: f32,

    /// Minimum visible rectangle size in device pixels.
    pub min_rect_size: f32,

    /// Rectangle output mode.
    pub rect_mode: RectMode,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            four_word_min_chars: DEFAULT_FOUR_WORD_MIN_CHARS,
            two_word_min_chars: DEFAULT_TWO_WORD_MIN_CHARS,
            char_width_factor: DEFAULT_CHAR_WIDTH_FACTOR,
            min_rect_size: DEFAULT_MIN_RECT_SIZE,
            rect_mode: RectMode::Single,
        }
    }

    /// Set the query truncation length.
    pub fn with_max_query_chars(mut self, value: usize) -> Self {
        self.max_query_chars = value;
        self
    }

    /// Set the minimum accepted query length.
    pub fn with_min_query_chars(mut self, value: usize) -> Self {
        self.min_query_chars = value;
        self
    }

    /// Set both prefix-tier thresholds.
    pub fn with_tier_thresholds(mut self, four_word: usize, two_word: usize) -> Self {
        self.four_word_min_chars = four_word;
        self.two_word_min_chars = two_word;
        self
    }

    /// Set the glyph advance factor.
    pub fn with_char_width_factor(mut self, value: f32) -> Self {
        self.char_width_factor = value;
        self
    }

    /// Set the minimum rectangle size.
    pub fn with_min_rect_size(mut self, value: f32) -> Self {
        self.min_rect_size = value;
        self
    }

    /// Set the rectangle output mode.
    pub fn with_rect_mode(mut self, mode: RectMode) -> Self {
        self.rect_mode = mode;
        self
    }

    /// Check that the values can be used together.
    pub fn validate(&self) -> Result<()> {
        if self.min_query_chars == 0 {
            return Err(Error::InvalidConfig("min_query_chars must be at least 1".to_string()));
        }
        if self.max_query_chars < self.min_query_chars {
            return Err(Error::InvalidConfig(format!(
                "max_query_chars ({}) is below min_query_chars ({})",
                self.max_query_chars, self.min_query_chars
            )));
        }
        if !(self.char_width_factor.is_finite() && self.char_width_factor > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "char_width_factor must be positive, got {}",
                self.char_width_factor
            )));
        }
        if !(self.min_rect_size.is_finite() && self.min_rect_size >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_rect_size must be non-negative, got {}",
                self.min_rect_size
            )));
        }
        Ok(())
    }
}
