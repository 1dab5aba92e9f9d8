//! Per-page text index.
//!
//! The index joins run texts with single spaces into one full-text string and
//! remembers where each run starts. All offsets are character offsets. For
//! matching it also keeps a folded copy of the full text (see
//! [`crate::text::normalize`]) plus a table mapping each folded character
//! back to its full-text position.

use super::normalize::fold_char;
use super::run::{RawFragment, TextRun};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Ordered runs of one page plus the derived full text.
///
/// Immutable once built. A re-extracted page gets a new index.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTextIndex {
    runs: Vec<TextRun>,
    full_text: String,
    full_len: usize,
    run_starts: Vec<usize>,
    folded: String,
    folded_to_full: Vec<usize>,
    fingerprint: u64,
}

/// Build the index for one page from extractor output.
///
/// Whitespace-only and unusable fragments are dropped; the remaining runs
/// are numbered in extraction order. Empty input yields an empty index that
/// never matches anything.
///
/// # Examples
///
/// ```
/// use snippet_highlight::text::{build_index, RawFragment};
///
/// let index = build_index(&[
///     RawFragment::at("The quick", 72.0, 700.0, 12.0),
///     RawFragment::at("   ", 150.0, 700.0, 12.0),
///     RawFragment::at("brown fox", 150.0, 700.0, 12.0),
/// ]);
/// assert_eq!(index.full_text(), "The quick brown fox");
/// assert_eq!(index.run_start_offset(1), Some(10));
/// ```
pub fn build_index(fragments: &[RawFragment]) -> PageTextIndex {
    let runs: Vec<TextRun> = fragments
        .iter()
        .filter_map({
            let mut next = 0usize;
            move |frag| {
                let run = TextRun::from_fragment(frag, next)?;
                next += 1;
                Some(run)
            }
        })
        .collect();

    let mut full_text = String::new();
    let mut run_starts = Vec::with_capacity(runs.len());
    let mut cursor = 0usize;
    for (i, run) in runs.iter().enumerate() {
        if i > 0 {
            full_text.push(' ');
            cursor += 1;
        }
        run_starts.push(cursor);
        full_text.push_str(&run.text);
        cursor += run.char_count();
    }

    let (folded, folded_to_full) = fold_text(&full_text);

    log::debug!(
        "Built page text index: {} runs kept of {} fragments, {} chars",
        runs.len(),
        fragments.len(),
        cursor
    );

    PageTextIndex {
        runs,
        full_text,
        full_len: cursor,
        run_starts,
        folded,
        folded_to_full,
        fingerprint: fragment_fingerprint(fragments),
    }
}

/// Content hash of a fragment list, used to detect re-extraction.
pub fn fragment_fingerprint(fragments: &[RawFragment]) -> u64 {
    let mut hasher = DefaultHasher::new();
    fragments.len().hash(&mut hasher);
    for frag in fragments {
        frag.text.hash(&mut hasher);
        for v in frag.transform {
            v.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Lower-case and collapse whitespace, keeping a back-map to source offsets.
fn fold_text(full_text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(full_text.len());
    let mut map = Vec::with_capacity(full_text.len());
    let mut after_space = true;

    for (i, ch) in full_text.chars().enumerate() {
        if ch.is_whitespace() {
            if after_space {
                continue;
            }
            folded.push(' ');
            after_space = true;
        } else {
            folded.push(fold_char(ch));
            after_space = false;
        }
        map.push(i);
    }

    (folded, map)
}

impl PageTextIndex {
    /// Runs in extraction order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Run texts joined by single spaces.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Length of the full text in characters.
    pub fn char_len(&self) -> usize {
        self.full_len
    }

    /// True when the page has no usable text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Character offset where run `run_index` starts in the full text.
    pub fn run_start_offset(&self, run_index: usize) -> Option<usize> {
        self.run_starts.get(run_index).copied()
    }

    /// Lower-cased, whitespace-collapsed full text used for matching.
    pub fn folded_text(&self) -> &str {
        &self.folded
    }

    /// Fingerprint of the fragment list this index was built from.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Resolve a full-text character offset to `(run_index, offset_in_run)`.
    ///
    /// Returns `None` past the end of the text and for the separator spaces
    /// between runs, which belong to no run.
    pub fn locate_offset(&self, offset: usize) -> Option<(usize, usize)> {
        let run_index = self.run_starts.partition_point(|&start| start <= offset).checked_sub(1)?;
        let in_run = offset - self.run_starts[run_index];
        if in_run < self.runs[run_index].char_count() {
            Some((run_index, in_run))
        } else {
            None
        }
    }

    /// Find the leftmost occurrence of an already-folded needle.
    ///
    /// Returns the matched range `[start, end)` in full-text character offsets.
    pub fn find_folded(&self, needle: &str) -> Option<(usize, usize)> {
        let needle_len = needle.chars().count();
        if needle_len == 0 {
            return None;
        }
        let byte_start = self.folded.find(needle)?;
        let folded_start = self.folded[..byte_start].chars().count();
        let folded_last = folded_start + needle_len - 1;

        let start = *self.folded_to_full.get(folded_start)?;
        let last = *self.folded_to_full.get(folded_last)?;
        Some((start, last + 1))
    }
}
