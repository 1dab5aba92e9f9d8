//! Highlight geometry and the request session.
//!
//! - [`mapper`] turns a matched span into viewport rectangles
//! - [`session`] decides which computation result is allowed on screen
//! - [`engine`] wires both to the page index cache
//!
//! ## Example
//!
//! ```
//! use snippet_highlight::geometry::Matrix;
//! use snippet_highlight::highlight::{CompletionOutcome, HighlightEngine};
//! use snippet_highlight::search::SearchQuery;
//! use snippet_highlight::text::RawFragment;
//!
//! let engine = HighlightEngine::new();
//! engine.load_page(0, &[
//!     RawFragment::at("The quick", 72.0, 700.0, 12.0),
//!     RawFragment::at("brown fox jumps", 72.0, 686.0, 12.0),
//! ]);
//!
//! let viewport = Matrix::page_to_viewport(1.5, 792.0);
//! let outcome = engine.highlight(SearchQuery::new("quick brown", 0).unwrap(), &viewport);
//! assert_eq!(outcome, CompletionOutcome::Applied);
//! assert_eq!(engine.published().unwrap().rects.len(), 1);
//! ```

pub mod engine;
pub mod mapper;
pub mod session;

pub use engine::HighlightEngine;
pub use mapper::{check_viewport_transform, to_rects, to_rects_with_config};
pub use session::{
    CompletionOutcome, HighlightSession, HighlightTicket, PublishedHighlight, SessionStatus,
};

/// Viewport-space highlight rectangle.
pub type HighlightRect = crate::geometry::Rect;
