//! Highlight requests as emitted by the citation step.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A snippet to highlight on a zero-based page.
///
/// The text is whatever the upstream system produced: at most ~100
/// characters, possibly cut mid-word. It is normalized later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    page: u32,
}

impl SearchQuery {
    /// Validate the page number and build a query.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::search::SearchQuery;
    ///
    /// let q = SearchQuery::new("quick brown", 3).unwrap();
    /// assert_eq!(q.page(), 3);
    /// assert!(SearchQuery::new("quick brown", -1).is_err());
    /// ```
    pub fn new(text: impl Into<String>, page: i64) -> Result<Self> {
        let page = u32::try_from(page).map_err(|_| Error::InvalidPageNumber(page))?;
        Ok(Self {
            text: text.into(),
            page,
        })
    }

    /// Raw snippet text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Target page.
    pub fn page(&self) -> u32 {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_pages() {
        assert!(matches!(SearchQuery::new("x", -5), Err(Error::InvalidPageNumber(-5))));
        assert!(SearchQuery::new("x", i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_keeps_raw_text() {
        let q = SearchQuery::new("  Raw TEXT  ", 0).unwrap();
        assert_eq!(q.text(), "  Raw TEXT  ");
        assert_eq!(q.page(), 0);
    }
}
