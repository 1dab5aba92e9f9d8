//! Positioned text runs.
//!
//! A run is one fragment of extracted text with a baseline origin and a font
//! size, both in page space. Glyph widths are not available from the
//! extractor, so horizontal extents use a proportional-width approximation:
//! every character advances `font_size * char_width_factor`.

use serde::{Deserialize, Serialize};

/// A fragment as handed over by the page text extractor.
///
/// `transform` is the six-element text matrix `[a, b, c, d, e, f]`; the
/// translation part is the baseline origin and the scale part carries the
/// font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Extracted text, possibly empty or whitespace-only
    pub text: String,
    /// Text matrix in page space
    pub transform: [f32; 6],
}

impl RawFragment {
    /// Create a fragment from text and a full text matrix.
    pub fn new(text: impl Into<String>, transform: [f32; 6]) -> Self {
        Self {
            text: text.into(),
            transform,
        }
    }

    /// Create an upright fragment at `(x, y)` with the given font size.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::text::RawFragment;
    ///
    /// let frag = RawFragment::at("Hello", 72.0, 700.0, 12.0);
    /// assert_eq!(frag.transform, [12.0, 0.0, 0.0, 12.0, 72.0, 700.0]);
    /// ```
    pub fn at(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self::new(text, [font_size, 0.0, 0.0, font_size, x, y])
    }
}

/// One run of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Run text (never whitespace-only)
    pub text: String,
    /// Baseline origin X in page space
    pub origin_x: f32,
    /// Baseline origin Y in page space (y grows upward)
    pub origin_y: f32,
    /// Font size in page units, always positive
    pub font_size: f32,
    /// Position in the page's run sequence
    pub index: usize,
    char_count: usize,
}

impl TextRun {
    /// Convert an extracted fragment into a run.
    ///
    /// Returns `None` for fragments that cannot be highlighted: whitespace-only
    /// text, a non-finite transform, or a zero font size.
    pub fn from_fragment(fragment: &RawFragment, index: usize) -> Option<Self> {
        if fragment.text.trim().is_empty() {
            return None;
        }
        let t = &fragment.transform;
        if !t.iter().all(|v| v.is_finite()) {
            log::debug!("Skipping fragment {:?}: non-finite transform {:?}", fragment.text, t);
            return None;
        }

        let font_size = if t[0] != 0.0 { t[0].abs() } else { t[3].abs() };
        if font_size <= 0.0 {
            log::debug!("Skipping fragment {:?}: zero font size", fragment.text);
            return None;
        }

        Some(Self {
            char_count: fragment.text.chars().count(),
            text: fragment.text.clone(),
            origin_x: t[4],
            origin_y: t[5],
            font_size,
            index,
        })
    }

    /// Number of characters (not bytes) in the run.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Approximate advance of a single character.
    pub fn char_advance(&self, char_width_factor: f32) -> f32 {
        self.font_size * char_width_factor
    }

    /// Approximate width of the whole run.
    pub fn width(&self, char_width_factor: f32) -> f32 {
        self.char_advance(char_width_factor) * self.char_count as f32
    }

    /// X position of the boundary before character `char_offset`.
    pub fn x_at(&self, char_offset: usize, char_width_factor: f32) -> f32 {
        self.origin_x + char_offset as f32 * self.char_advance(char_width_factor)
    }
}
