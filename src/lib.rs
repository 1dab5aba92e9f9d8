// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Snippet Highlight
//!
//! Locate short, possibly approximate citation snippets in the extracted text
//! of a rendered page and compute the viewport rectangles that cover them.
//!
//! ## Pipeline
//!
//! 1. **Text index** ([`text`]): positioned fragments from the page extractor
//!    become ordered [`TextRun`](text::TextRun)s, a joined full text and a
//!    run-start offset table.
//! 2. **Normalization** ([`text::normalize`]): lower-case, trim, collapse
//!    whitespace, truncate to 100 characters, reject anything under 2.
//! 3. **Tiered matching** ([`search`]): full phrase, then four-word prefix,
//!    then two-word prefix.
//! 4. **Geometry** ([`highlight::mapper`]): span → page-space box → viewport
//!    rectangle, clamped to stay drawable.
//! 5. **Session** ([`highlight::session`]): generation counting so a slow,
//!    stale computation never overwrites a newer highlight.
//!
//! Unmatched snippets, image-only pages and rejected queries all end in an
//! empty rectangle list. The engine does not panic on them.
//!
//! ## Quick Start
//!
//! ```
//! use snippet_highlight::geometry::Matrix;
//! use snippet_highlight::highlight::HighlightEngine;
//! use snippet_highlight::search::SearchQuery;
//! use snippet_highlight::text::RawFragment;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = HighlightEngine::new();
//! engine.load_page(2, &[
//!     RawFragment::at("Revenue grew 12 percent in Q3 2023 ending", 72.0, 700.0, 11.0),
//! ]);
//!
//! let query = SearchQuery::new("Revenue grew 12 percent in Q4...", 2)?;
//! engine.highlight(query, &Matrix::page_to_viewport(1.25, 792.0));
//!
//! let shown = engine.published().expect("a result was applied");
//! assert_eq!(shown.page, 2);
//! assert_eq!(shown.rects.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry
pub mod geometry;

// Page text and query normalization
pub mod text;

// Snippet matching
pub mod search;

// Rectangles and request sessions
pub mod highlight;

// Re-exports
pub use config::{HighlightConfig, RectMode};
pub use error::{Error, Result};
pub use geometry::{Matrix, Rect};
pub use highlight::{
    to_rects, CompletionOutcome, HighlightEngine, HighlightRect, HighlightSession,
    HighlightTicket, PublishedHighlight, SessionStatus,
};
pub use search::{find_span, MatchSpan, MatchTier, SearchQuery, SpanBounds};
pub use text::{build_index, normalize, NormalizedQuery, PageTextIndex, RawFragment, TextRun};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
