//! Locating citation snippets in page text.
//!
//! The search works on a [`PageTextIndex`](crate::text::PageTextIndex) and a
//! normalized query, and reports the matched range in terms of runs so the
//! highlight mapper can turn it into geometry.
//!
//! ## Example
//!
//! ```
//! use snippet_highlight::search::{find_span, MatchTier};
//! use snippet_highlight::text::{build_index, normalize, RawFragment};
//!
//! let index = build_index(&[RawFragment::at(
//!     "Revenue grew 12 percent in Q3 2023 ending",
//!     72.0,
//!     700.0,
//!     12.0,
//! )]);
//! let query = normalize("Revenue grew 12 percent in Q4...").unwrap();
//! assert_eq!(find_span(&index, &query).tier(), Some(MatchTier::FourWordPrefix));
//! ```

mod matcher;
mod query;

pub use matcher::{find_span, find_span_with_config, MatchSpan, MatchTier, SpanBounds};
pub use query::SearchQuery;
