//! Page text: runs, the per-page index, query normalization and the shared
//! index cache.

pub mod cache;
pub mod index;
pub mod normalize;
pub mod run;

pub use cache::PageIndexCache;
pub use index::{build_index, fragment_fingerprint, PageTextIndex};
pub use normalize::{normalize, normalize_with_config, NormalizedQuery};
pub use run::{RawFragment, TextRun};
