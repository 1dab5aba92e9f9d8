//! Geometric primitives shared by the index, the mapper and the renderer.
//!
//! Two coordinate spaces are in play:
//! - **page space**: page units, origin bottom-left, y grows upward
//! - **viewport space**: device pixels, origin top-left, y grows downward
//!
//! [`Matrix`] carries points from the first to the second.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

/// An axis-aligned rectangle, top-left anchored.
///
/// Highlight output uses this type in viewport space, where the engine
/// guarantees `x, y >= 0` and `width, height >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two opposite corners, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::geometry::Rect;
    ///
    /// let rect = Rect::from_corners(110.0, 20.0, 10.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let left = x0.min(x1);
        let top = y0.min(y1);
        Self {
            x: left,
            y: top,
            width: x0.max(x1) - left,
            height: y0.max(y1) - top,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Compute the union of this rectangle with another.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

/// A 2D affine transform `[a b c d e f]`.
///
/// Points map as `x' = a*x + c*y + e`, `y' = b*x + d*y + f`. This matches the
/// six-element arrays produced by page text extractors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Build from the `[a, b, c, d, e, f]` array layout.
    pub fn from_array(m: [f32; 6]) -> Self {
        Self {
            a: m[0],
            b: m[1],
            c: m[2],
            d: m[3],
            e: m[4],
            f: m[5],
        }
    }

    /// Page space to viewport space for a page `page_height` units tall,
    /// rendered at `scale` pixels per unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippet_highlight::geometry::Matrix;
    ///
    /// let m = Matrix::page_to_viewport(2.0, 792.0);
    /// let top_left = m.transform_point(0.0, 792.0);
    /// assert_eq!(top_left.x, 0.0);
    /// assert_eq!(top_left.y, 0.0);
    ///
    /// let baseline = m.transform_point(100.0, 700.0);
    /// assert_eq!(baseline.x, 200.0);
    /// assert_eq!(baseline.y, 184.0);
    /// ```
    pub fn page_to_viewport(scale: f32, page_height: f32) -> Self {
        Self::from_array([scale, 0.0, 0.0, -scale, 0.0, page_height * scale])
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }

    /// Get the determinant of this matrix.
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Check if this matrix is invertible.
    ///
    /// Any non-zero finite determinant counts, so heavily downscaled
    /// viewports still map points.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}
