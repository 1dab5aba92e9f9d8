//! Shared cache of page text indexes.
//!
//! Entries are `Arc`s that are replaced wholesale when a page is
//! re-extracted. A reader holding an older `Arc` keeps a complete, consistent
//! index. Nothing is ever mutated in place.

use super::index::{build_index, fragment_fingerprint, PageTextIndex};
use super::run::RawFragment;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Page-number-keyed cache of [`PageTextIndex`].
#[derive(Debug, Default)]
pub struct PageIndexCache {
    entries: RwLock<HashMap<u32, Arc<PageTextIndex>>>,
}

impl PageIndexCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current index for `page`, if extraction has completed.
    pub fn get(&self, page: u32) -> Option<Arc<PageTextIndex>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page)
            .cloned()
    }

    /// Build an index from `fragments` and make it the current one for `page`.
    pub fn insert(&self, page: u32, fragments: &[RawFragment]) -> Arc<PageTextIndex> {
        let index = Arc::new(build_index(fragments));
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page, Arc::clone(&index));
        index
    }

    /// Return the cached index when it was built from identical fragments,
    /// otherwise rebuild it.
    pub fn get_or_build(&self, page: u32, fragments: &[RawFragment]) -> Arc<PageTextIndex> {
        if let Some(existing) = self.get(page) {
            if existing.fingerprint() == fragment_fingerprint(fragments) {
                return existing;
            }
            log::debug!("Page {} text changed, rebuilding index", page);
        }
        self.insert(page, fragments)
    }

    /// Drop the index for `page`. Returns true when an entry existed.
    pub fn invalidate(&self, page: u32) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&page)
            .is_some()
    }

    /// Drop every cached index.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when no page is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
