// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Premultiplied RGBA8 rasters and the kernels that operate on them.
//!
//! A [`PixelBuffer`] is row-major and tightly packed: pixel `(x, y)` lives at
//! index `y * width + x`. Color channels are premultiplied by alpha, so a
//! pixel with `a == 0` must have `r == g == b == 0`.
//!
//! All rectangle-taking operations clip against the buffer bounds (and, for
//! two-buffer operations, against the source bounds as well). Writes outside
//! the raster are no-ops.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::error::Error;
use crate::region::PixelRect;

/// A single premultiplied RGBA8 pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a pixel from already-premultiplied channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a pixel from straight (non-premultiplied) channels.
    #[must_use]
    pub fn from_straight(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(mul_div255(r, a), mul_div255(g, a), mul_div255(b, a), a)
    }

    /// Composites `self` over `dst` with premultiplied source-over:
    /// `out = src + dst * (1 - src.a)`.
    #[inline]
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            255 => self,
            0 if self == Self::TRANSPARENT => dst,
            sa => {
                let inv = 255 - sa;
                Self::new(
                    self.r.saturating_add(mul_div255(dst.r, inv)),
                    self.g.saturating_add(mul_div255(dst.g, inv)),
                    self.b.saturating_add(mul_div255(dst.b, inv)),
                    sa.saturating_add(mul_div255(dst.a, inv)),
                )
            }
        }
    }
}

/// `round(a * b / 255)` without division.
#[inline]
fn mul_div255(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 128;
    u8::try_from((t + (t >> 8)) >> 8).unwrap_or(u8::MAX)
}

/// An owned, premultiplied RGBA8 raster.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; pixel_count(width, height)],
        }
    }

    /// Creates a buffer from raw premultiplied RGBA8 bytes.
    ///
    /// Returns [`Error::BufferSize`] if `bytes` is not exactly
    /// `width * height * 4` long.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, Error> {
        let expected = pixel_count(width, height).saturating_mul(4);
        if bytes.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice::<u8, Rgba>(bytes).to_vec(),
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rectangle `(0, 0, width, height)`.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    /// Returns the pixels in row-major order.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns the pixels in row-major order, mutably.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Returns the raw RGBA8 bytes (stride `width * 4`).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns the raw RGBA8 bytes mutably.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes the pixel at `(x, y)`. Returns `false` (and writes nothing)
    /// outside the bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Overwrites every pixel in `rect` with `color`.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let Some((xs, ys)) = spans(rect.intersect(self.bounds())) else {
            return;
        };
        let stride = self.width as usize;
        for y in ys {
            let row = y * stride;
            self.pixels[row + xs.start..row + xs.end].fill(color);
        }
    }

    /// Sets every pixel in `rect` to transparent.
    pub fn clear_rect(&mut self, rect: PixelRect) {
        self.fill_rect(rect, Rgba::TRANSPARENT);
    }

    /// Sets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Copies `src` into `self`, top-left aligned, overwriting the overlap.
    ///
    /// Pixels of `self` outside `src`'s extent are left untouched.
    pub fn copy_from(&mut self, src: &Self) {
        let w = self.width.min(src.width) as usize;
        let h = self.height.min(src.height) as usize;
        let (dst_stride, src_stride) = (self.width as usize, src.width as usize);
        for y in 0..h {
            let d = y * dst_stride;
            let s = y * src_stride;
            self.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
        }
    }

    /// Returns a new `width × height` buffer holding the top-left overlap of
    /// `self`, transparent elsewhere.
    #[must_use]
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        out.copy_from(self);
        out
    }

    /// Composites `src` over `self` within `rect` (source-over).
    ///
    /// Both buffers share the same coordinate space; `rect` is clipped to the
    /// bounds of each.
    pub fn composite_over(&mut self, src: &Self, rect: PixelRect) {
        let clipped = rect.intersect(self.bounds()).intersect(src.bounds());
        let Some((xs, ys)) = spans(clipped) else {
            return;
        };
        let (dst_stride, src_stride) = (self.width as usize, src.width as usize);
        for y in ys {
            let d = y * dst_stride;
            let s = y * src_stride;
            let dst_row = &mut self.pixels[d + xs.start..d + xs.end];
            let src_row = &src.pixels[s + xs.start..s + xs.end];
            for (dp, sp) in dst_row.iter_mut().zip(src_row) {
                *dp = sp.over(*dp);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

/// Saturating: oversized dimensions never wrap to a small count.
fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

/// Converts a rectangle already clipped to a buffer (so non-negative) into
/// column and row index ranges. `None` when empty.
fn spans(rect: PixelRect) -> Option<(Range<usize>, Range<usize>)> {
    if rect.is_empty() {
        return None;
    }
    let xs = rect.x0.unsigned_abs() as usize..rect.x1.unsigned_abs() as usize;
    let ys = rect.y0.unsigned_abs() as usize..rect.y1.unsigned_abs() as usize;
    Some((xs, ys))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 255);

    fn assert_close(actual: Rgba, expected: Rgba) {
        let channels = |p: Rgba| [p.r, p.g, p.b, p.a];
        for (a, e) in channels(actual).into_iter().zip(channels(expected)) {
            assert!(
                a.abs_diff(e) <= 1,
                "pixel {actual:?} differs from {expected:?} by more than 1"
            );
        }
    }

    #[test]
    fn new_buffer_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.pixels().len(), 6);
        assert!(buf.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
        assert_eq!(buf.as_bytes().len(), 24);
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert_eq!(
            PixelBuffer::from_bytes(2, 2, &[0; 15]),
            Err(Error::BufferSize {
                expected: 16,
                actual: 15
            })
        );
        let buf = PixelBuffer::from_bytes(1, 1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.pixel(0, 0), Some(Rgba::new(1, 2, 3, 4)));
    }

    #[test]
    fn from_bytes_rejects_oversized_dimensions() {
        assert_eq!(
            PixelBuffer::from_bytes(u32::MAX, u32::MAX, &[0; 4]),
            Err(Error::BufferSize {
                expected: pixel_count(u32::MAX, u32::MAX).saturating_mul(4),
                actual: 4
            })
        );
    }

    #[test]
    fn pixel_access_out_of_bounds() {
        let mut buf = PixelBuffer::new(2, 2);
        assert!(!buf.set_pixel(2, 0, RED));
        assert_eq!(buf.pixel(0, 2), None);
        assert!(buf.set_pixel(1, 1, RED));
        assert_eq!(buf.pixel(1, 1), Some(RED));
        assert_eq!(buf.as_bytes()[12..16], [255, 0, 0, 255]);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(PixelRect::new(-2, 2, 2, 10), RED);
        assert_eq!(buf.pixel(0, 2), Some(RED));
        assert_eq!(buf.pixel(1, 3), Some(RED));
        assert_eq!(buf.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.pixel(0, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_outside_is_noop() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(PixelRect::new(10, 10, 20, 20), RED);
        buf.fill_rect(PixelRect::new(-5, -5, 0, 0), RED);
        assert!(buf.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn from_straight_premultiplies() {
        assert_eq!(
            Rgba::from_straight(255, 100, 0, 128),
            Rgba::new(128, 50, 0, 128)
        );
        assert_eq!(Rgba::from_straight(200, 200, 200, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn half_blue_over_red() {
        let half_blue = Rgba::from_straight(0, 0, 255, 128);
        // out = src + dst * (1 - 128/255)
        assert_close(half_blue.over(RED), Rgba::new(127, 0, 128, 255));
    }

    #[test]
    fn opaque_over_replaces_and_transparent_over_keeps() {
        assert_eq!(BLUE.over(RED), BLUE);
        assert_eq!(Rgba::TRANSPARENT.over(RED), RED);
        assert_eq!(RED.over(Rgba::TRANSPARENT), RED);
    }

    #[test]
    fn composite_over_respects_rect() {
        let mut dst = PixelBuffer::new(4, 4);
        dst.fill_rect(dst.bounds(), RED);
        let mut src = PixelBuffer::new(4, 4);
        src.fill_rect(src.bounds(), BLUE);

        dst.composite_over(&src, PixelRect::new(1, 1, 3, 3));
        assert_eq!(dst.pixel(0, 0), Some(RED));
        assert_eq!(dst.pixel(1, 1), Some(BLUE));
        assert_eq!(dst.pixel(2, 2), Some(BLUE));
        assert_eq!(dst.pixel(3, 3), Some(RED));
    }

    #[test]
    fn composite_over_clips_to_smaller_source() {
        let mut dst = PixelBuffer::new(4, 4);
        let mut src = PixelBuffer::new(2, 2);
        src.fill_rect(src.bounds(), BLUE);
        dst.composite_over(&src, PixelRect::new(-10, -10, 10, 10));
        assert_eq!(dst.pixel(1, 1), Some(BLUE));
        assert_eq!(dst.pixel(2, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn copy_from_overwrites_overlap_only() {
        let mut big = PixelBuffer::new(4, 3);
        big.fill_rect(big.bounds(), BLUE);
        let mut small = PixelBuffer::new(2, 2);
        small.set_pixel(1, 1, RED);

        big.copy_from(&small);
        // Source-copy: transparent source pixels overwrite.
        assert_eq!(big.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(big.pixel(1, 1), Some(RED));
        assert_eq!(big.pixel(2, 0), Some(BLUE));
        assert_eq!(big.pixel(0, 2), Some(BLUE));
    }

    #[test]
    fn resized_keeps_top_left() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.set_pixel(0, 0, RED);
        buf.set_pixel(3, 3, BLUE);

        let smaller = buf.resized(2, 2);
        assert_eq!(smaller.width(), 2);
        assert_eq!(smaller.pixel(0, 0), Some(RED));

        let larger = smaller.resized(6, 5);
        assert_eq!(larger.pixel(0, 0), Some(RED));
        assert_eq!(larger.pixel(3, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(larger.pixel(5, 4), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn zero_sized_buffer_is_valid() {
        let mut buf = PixelBuffer::new(0, 7);
        assert!(buf.pixels().is_empty());
        assert!(buf.bounds().is_empty());
        buf.fill_rect(PixelRect::new(0, 0, 10, 10), RED);
        assert_eq!(buf.pixel(0, 0), None);
    }
}
