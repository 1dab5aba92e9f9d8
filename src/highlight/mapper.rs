//! Span-to-rectangle mapping.
//!
//! Each run touched by a match contributes a horizontal slice in page space:
//! the first and last runs are cut at the matched character offsets, runs in
//! between contribute their full width. Vertically a run covers
//! `[origin_y - font_size, origin_y]`. Slices are merged into a bounding box
//! (or one box per baseline), projected into the viewport and clamped so the
//! result is always drawable.

use crate::config::{HighlightConfig, RectMode};
use crate::error::{Error, Result};
use crate::geometry::{Matrix, Rect};
use crate::search::MatchSpan;
use crate::text::PageTextIndex;

/// Page-space extent contributed by one run.
#[derive(Debug, Clone, Copy)]
struct Slice {
    x0: f32,
    x1: f32,
    bottom: f32,
    baseline: f32,
    font_size: f32,
}

impl Slice {
    /// Page-space box of the slice. `Rect` edges are order-agnostic, so the
    /// y-up page box unions the same way a viewport box does.
    fn bounds(&self) -> Rect {
        Rect::from_corners(self.x0, self.bottom, self.x1, self.baseline)
    }
}

/// Check that a page-to-viewport transform can produce rectangles.
pub fn check_viewport_transform(transform: &Matrix) -> Result<()> {
    if !transform.is_finite() {
        return Err(Error::InvalidTransform(format!("non-finite components: {:?}", transform)));
    }
    if !transform.is_invertible() {
        return Err(Error::InvalidTransform(format!("singular matrix: {:?}", transform)));
    }
    Ok(())
}

/// Map a span to viewport rectangles with the default configuration.
///
/// # Examples
///
/// ```
/// use snippet_highlight::geometry::Matrix;
/// use snippet_highlight::highlight::to_rects;
/// use snippet_highlight::search::find_span;
/// use snippet_highlight::text::{build_index, normalize, RawFragment};
///
/// let index = build_index(&[RawFragment::at("see ab here", 0.0, 700.0, 10.0)]);
/// let span = find_span(&index, &normalize("ab").unwrap());
/// let rects = to_rects(&index, &span, &Matrix::page_to_viewport(1.0, 792.0));
/// assert_eq!(rects.len(), 1);
/// assert!((rects[0].x - 24.0).abs() < 1e-3);
/// assert!((rects[0].width - 12.0).abs() < 1e-3);
/// ```
pub fn to_rects(index: &PageTextIndex, span: &MatchSpan, page_to_viewport: &Matrix) -> Vec<Rect> {
    to_rects_with_config(index, span, page_to_viewport, &HighlightConfig::default())
}

/// Map a span to viewport rectangles.
///
/// `NoMatch` yields an empty list. A span produced by
/// [`find_span`](crate::search::find_span) on the same index yields one
/// rectangle in [`RectMode::Single`], or one per line in
/// [`RectMode::PerLine`].
pub fn to_rects_with_config(
    index: &PageTextIndex,
    span: &MatchSpan,
    page_to_viewport: &Matrix,
    config: &HighlightConfig,
) -> Vec<Rect> {
    let Some(bounds) = span.bounds() else {
        return Vec::new();
    };

    let runs = index.runs();
    if bounds.end_run_index >= runs.len() || bounds.start_run_index > bounds.end_run_index {
        log::warn!(
            "Span runs {}..={} out of range for page with {} runs",
            bounds.start_run_index,
            bounds.end_run_index,
            runs.len()
        );
        return Vec::new();
    }

    let factor = config.char_width_factor;
    let slices: Vec<Slice> = (bounds.start_run_index..=bounds.end_run_index)
        .map(|i| {
            let run = &runs[i];
            let x0 = if i == bounds.start_run_index {
                run.x_at(bounds.start_char_offset_in_run, factor)
            } else {
                run.origin_x
            };
            let x1 = if i == bounds.end_run_index {
                run.x_at(bounds.end_char_offset_in_run, factor)
            } else {
                run.origin_x + run.width(factor)
            };
            Slice {
                x0,
                x1,
                bottom: run.origin_y - run.font_size,
                baseline: run.origin_y,
                font_size: run.font_size,
            }
        })
        .collect();

    let boxes = match config.rect_mode {
        RectMode::Single => merge_all(&slices),
        RectMode::PerLine => merge_by_line(&slices),
    };

    boxes
        .iter()
        .map(|page_box| project(page_box, page_to_viewport, config.min_rect_size))
        .collect()
}

fn merge_all(slices: &[Slice]) -> Vec<Rect> {
    slices
        .iter()
        .map(Slice::bounds)
        .reduce(|acc, next| acc.union(&next))
        .into_iter()
        .collect()
}

/// Consecutive slices whose baselines are within half a font size share a line.
fn merge_by_line(slices: &[Slice]) -> Vec<Rect> {
    let mut lines: Vec<(Rect, f32, f32)> = Vec::new();
    for slice in slices {
        let same_line = lines.last().is_some_and(|(_, baseline, size)| {
            (slice.baseline - baseline).abs() < 0.5 * slice.font_size.max(*size)
        });
        match lines.last_mut() {
            Some((bounds, _, size)) if same_line => {
                *bounds = bounds.union(&slice.bounds());
                *size = size.max(slice.font_size);
            },
            _ => {
                lines.push((slice.bounds(), slice.baseline, slice.font_size));
            },
        }
    }
    lines.into_iter().map(|(bounds, _, _)| bounds).collect()
}

/// Project a page-space box into the viewport and clamp it.
fn project(bounds: &Rect, transform: &Matrix, min_size: f32) -> Rect {
    let p0 = transform.transform_point(bounds.x, bounds.y);
    let p1 = transform.transform_point(bounds.right(), bounds.bottom());
    let raw = Rect::from_corners(p0.x, p0.y, p1.x, p1.y);

    // f32::max discards NaN, so degenerate input still lands on a finite rect.
    let x = raw.x.max(0.0);
    let y = raw.y.max(0.0);
    Rect::new(x, y, (raw.right() - x).max(min_size), (raw.bottom() - y).max(min_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{find_span, SpanBounds};
    use crate::text::{build_index, normalize, RawFragment};

    const PAGE_HEIGHT: f32 = 800.0;

    fn viewport() -> Matrix {
        Matrix::page_to_viewport(1.0, PAGE_HEIGHT)
    }

    fn found(start_run: usize, start: usize, end_run: usize, end: usize) -> MatchSpan {
        MatchSpan::Found {
            tier: crate::search::MatchTier::FullPhrase,
            bounds: SpanBounds {
                start_run_index: start_run,
                start_char_offset_in_run: start,
                end_run_index: end_run,
                end_char_offset_in_run: end,
            },
        }
    }

    #[test]
    fn test_no_match_yields_nothing() {
        let index = build_index(&[RawFragment::at("text", 0.0, 100.0, 10.0)]);
        assert!(to_rects(&index, &MatchSpan::NoMatch, &viewport()).is_empty());
    }

    #[test]
    fn test_single_run_partial() {
        let index = build_index(&[RawFragment::at("hello world", 100.0, 700.0, 10.0)]);
        let rects = to_rects(&index, &found(0, 6, 0, 11), &viewport());
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!((r.x - 136.0).abs() < 1e-3);
        assert!((r.width - 30.0).abs() < 1e-3);
        // Page y 690..700 flips to viewport 100..110.
        assert!((r.y - 100.0).abs() < 1e-3);
        assert!((r.height - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_multi_run_bounding_box() {
        let index = build_index(&[
            RawFragment::at("The quick", 72.0, 700.0, 12.0),
            RawFragment::at("middle run", 72.0, 686.0, 12.0),
            RawFragment::at("brown fox jumps", 72.0, 672.0, 12.0),
        ]);
        let rects = to_rects(&index, &found(0, 4, 2, 5), &viewport());
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        // Middle run spans its full width from origin_x.
        assert!((r.x - 72.0).abs() < 1e-3);
        assert!((r.right() - (72.0 + 10.0 * 7.2)).abs() < 1e-3);
        assert!((r.y - (PAGE_HEIGHT - 700.0)).abs() < 1e-3);
        assert!((r.bottom() - (PAGE_HEIGHT - 660.0)).abs() < 1e-3);
    }

    #[test]
    fn test_per_line_mode() {
        let index = build_index(&[
            RawFragment::at("first line", 72.0, 700.0, 12.0),
            RawFragment::at("continues", 140.0, 700.5, 12.0),
            RawFragment::at("second line", 72.0, 686.0, 12.0),
        ]);
        let config = HighlightConfig::new().with_rect_mode(RectMode::PerLine);
        let rects = to_rects_with_config(&index, &found(0, 6, 2, 6), &viewport(), &config);
        assert_eq!(rects.len(), 2);
        assert!(rects[0].y < rects[1].y);
    }

    #[test]
    fn test_clamps_to_viewport_origin() {
        let index = build_index(&[RawFragment::at("edge", -20.0, 805.0, 10.0)]);
        let rects = to_rects(&index, &found(0, 0, 0, 4), &viewport());
        let r = rects[0];
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
        assert!(r.width >= 0.0 && r.height >= 0.0);
    }

    #[test]
    fn test_min_size_for_degenerate_span() {
        let index = build_index(&[RawFragment::at("tiny", 10.0, 100.0, 0.5)]);
        let rects = to_rects(&index, &found(0, 0, 0, 1), &viewport());
        assert_eq!(rects[0].width, 3.0);
        assert_eq!(rects[0].height, 3.0);
    }

    #[test]
    fn test_nan_transform_still_finite() {
        let index = build_index(&[RawFragment::at("text", 10.0, 100.0, 10.0)]);
        let bad = Matrix::from_array([f32::NAN; 6]);
        let rects = to_rects(&index, &found(0, 0, 0, 4), &bad);
        assert_eq!(rects.len(), 1);
        assert!(rects[0].x.is_finite() && rects[0].width.is_finite());
        assert!(check_viewport_transform(&bad).is_err());
        assert!(check_viewport_transform(&viewport()).is_ok());
    }

    #[test]
    fn test_out_of_range_span_is_ignored() {
        let index = build_index(&[RawFragment::at("text", 10.0, 100.0, 10.0)]);
        assert!(to_rects(&index, &found(0, 0, 3, 1), &viewport()).is_empty());
    }

    #[test]
    fn test_scale_applies() {
        let index = build_index(&[RawFragment::at("see ab here", 0.0, 700.0, 10.0)]);
        let span = find_span(&index, &normalize("ab").unwrap());
        let rects = to_rects(&index, &span, &Matrix::page_to_viewport(2.0, 792.0));
        assert!((rects[0].x - 48.0).abs() < 1e-3);
        assert!((rects[0].width - 24.0).abs() < 1e-3);
        assert!((rects[0].height - 20.0).abs() < 1e-3);
    }
}
