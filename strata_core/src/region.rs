// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel rectangles.
//!
//! [`PixelRect`] is the unit of work for clearing, compositing, and
//! presentation. It is half-open, so `PixelRect::new(0, 0, 4, 4)` covers
//! sixteen pixels. Rectangles may extend past (or lie entirely outside) a
//! buffer; every raster operation clips against the buffer bounds first.

use core::fmt;

/// An axis-aligned, half-open rectangle `[x0, x1) × [y0, y1)` in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl PixelRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its edges.
    #[inline]
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle from an origin and a size.
    ///
    /// Edges saturate at `i32::MAX`.
    #[must_use]
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x.saturating_add_unsigned(width),
            y1: y.saturating_add_unsigned(height),
        }
    }

    /// Creates the rectangle `(0, 0, width, height)`, the bounds of a raster
    /// of that size.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::from_origin_size(0, 0, width, height)
    }

    /// Converts a `kurbo` rectangle, rounding outward to the pixel grid so
    /// the result covers every pixel the input touches.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int `as` saturates, which is the clipping we want"
    )]
    #[must_use]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        let r = rect.abs().expand();
        Self::new(r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32)
    }

    /// Converts to a `kurbo` rectangle.
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }

    /// Width in pixels, zero for inverted rectangles.
    #[inline]
    #[must_use]
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0).max(0).unsigned_abs()
    }

    /// Height in pixels, zero for inverted rectangles.
    #[inline]
    #[must_use]
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0).max(0).unsigned_abs()
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Returns `true` if the pixel at `(x, y)` lies inside.
    #[must_use]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Returns the overlap of two rectangles, or [`ZERO`](Self::ZERO) if they
    /// are disjoint.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let r = Self::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        if r.is_empty() { Self::ZERO } else { r }
    }

    /// Returns the smallest rectangle containing both. Empty inputs are
    /// ignored.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }
}

impl From<kurbo::Rect> for PixelRect {
    fn from(rect: kurbo::Rect) -> Self {
        Self::from_kurbo(rect)
    }
}

impl fmt::Debug for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PixelRect({}, {})-({}, {})",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_of_inverted_rect_is_zero() {
        let r = PixelRect::new(10, 10, 5, 20);
        assert!(r.is_empty());
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 10);
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let bounds = PixelRect::from_size(100, 50);
        let r = PixelRect::new(-10, 40, 30, 90);
        assert_eq!(r.intersect(bounds), PixelRect::new(0, 40, 30, 50));
    }

    #[test]
    fn intersect_of_disjoint_rects_is_zero() {
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(20, 20, 30, 30);
        assert_eq!(a.intersect(b), PixelRect::ZERO);
    }

    #[test]
    fn union_skips_empty_inputs() {
        let a = PixelRect::new(5, 5, 10, 10);
        assert_eq!(a.union(PixelRect::ZERO), a);
        assert_eq!(PixelRect::ZERO.union(a), a);
        assert_eq!(
            a.union(PixelRect::new(0, 8, 2, 20)),
            PixelRect::new(0, 5, 10, 20)
        );
    }

    #[test]
    fn from_kurbo_rounds_outward() {
        let r = PixelRect::from_kurbo(kurbo::Rect::new(0.5, 1.2, 9.1, 9.0));
        assert_eq!(r, PixelRect::new(0, 1, 10, 9));
    }

    #[test]
    fn from_kurbo_normalizes_flipped_rect() {
        let r = PixelRect::from(kurbo::Rect::new(8.0, 8.0, 2.0, 2.0));
        assert_eq!(r, PixelRect::new(2, 2, 8, 8));
    }

    #[test]
    fn from_origin_size_saturates() {
        let r = PixelRect::from_origin_size(i32::MAX - 1, 0, 10, 1);
        assert_eq!(r.x1, i32::MAX);
        assert_eq!(r.width(), 1);
    }

    #[test]
    fn contains_is_half_open() {
        let r = PixelRect::new(0, 0, 2, 2);
        assert!(r.contains(0, 0));
        assert!(r.contains(1, 1));
        assert!(!r.contains(2, 1));
        assert!(!r.contains(-1, 0));
    }
}
