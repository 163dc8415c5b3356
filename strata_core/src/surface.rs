// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Destination contract for composited output.
//!
//! A destination owns the final raster and knows how to show it: a window
//! backend copies it to the screen, an offscreen target keeps it, a test
//! double records what was asked of it. The stack only writes pixels into
//! [`buffer_mut`](DestinationSurface::buffer_mut) and then calls
//! [`present`](DestinationSurface::present) with the region it touched.
//!
//! Layer buffers always match the destination's [`bounds`](DestinationSurface::bounds)
//! at the time it was bound. If a destination changes size on its own, rebind
//! it with [`LayerStack::set_destination`](crate::layer::LayerStack::set_destination)
//! so the layers follow.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::buffer::PixelBuffer;
use crate::region::PixelRect;

/// A sink for composited pixels.
pub trait DestinationSurface {
    /// Returns the destination raster.
    fn buffer(&self) -> &PixelBuffer;

    /// Returns the destination raster for compositing.
    fn buffer_mut(&mut self) -> &mut PixelBuffer;

    /// Signals that `region` holds freshly composited pixels.
    ///
    /// `region` is passed through exactly as the caller requested it and may
    /// extend past [`bounds`](Self::bounds).
    fn present(&mut self, region: PixelRect);

    /// The rectangle `(0, 0, width, height)` of the destination raster.
    fn bounds(&self) -> PixelRect {
        self.buffer().bounds()
    }
}

impl<T: DestinationSurface + ?Sized> DestinationSurface for &mut T {
    fn buffer(&self) -> &PixelBuffer {
        (**self).buffer()
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        (**self).buffer_mut()
    }

    fn present(&mut self, region: PixelRect) {
        (**self).present(region);
    }
}

impl<T: DestinationSurface + ?Sized> DestinationSurface for Box<T> {
    fn buffer(&self) -> &PixelBuffer {
        (**self).buffer()
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        (**self).buffer_mut()
    }

    fn present(&mut self, region: PixelRect) {
        (**self).present(region);
    }
}

/// An in-memory destination that records every presented region.
#[derive(Clone, Debug, Default)]
pub struct OffscreenSurface {
    buffer: PixelBuffer,
    presented: Vec<PixelRect>,
}

impl OffscreenSurface {
    /// Creates a transparent `width × height` surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_buffer(PixelBuffer::new(width, height))
    }

    /// Wraps an existing raster.
    #[must_use]
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            presented: Vec::new(),
        }
    }

    /// Replaces the raster with a `width × height` one, keeping the top-left
    /// overlap.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.buffer = self.buffer.resized(width, height);
    }

    /// Regions passed to [`present`](DestinationSurface::present), oldest
    /// first.
    #[must_use]
    pub fn presented(&self) -> &[PixelRect] {
        &self.presented
    }

    /// Drains the presented-region log.
    pub fn take_presented(&mut self) -> Vec<PixelRect> {
        core::mem::take(&mut self.presented)
    }

    /// Consumes the surface, returning its raster.
    #[must_use]
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

impl DestinationSurface for OffscreenSurface {
    fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    fn present(&mut self, region: PixelRect) {
        self.presented.push(region);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::buffer::Rgba;

    #[test]
    fn offscreen_records_presents_in_order() {
        let mut surface = OffscreenSurface::new(8, 8);
        surface.present(PixelRect::new(0, 0, 1, 1));
        surface.present(PixelRect::new(-4, 2, 100, 3));
        assert_eq!(
            surface.presented(),
            &[PixelRect::new(0, 0, 1, 1), PixelRect::new(-4, 2, 100, 3)]
        );
        assert_eq!(surface.take_presented().len(), 2);
        assert!(surface.presented().is_empty());
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut surface = OffscreenSurface::new(4, 4);
        surface.buffer_mut().set_pixel(1, 1, Rgba::WHITE);
        surface.resize(2, 8);
        assert_eq!(surface.bounds(), PixelRect::new(0, 0, 2, 8));
        assert_eq!(surface.buffer().pixel(1, 1), Some(Rgba::WHITE));
    }

    #[test]
    fn borrowed_and_boxed_forward() {
        fn present_twice(dest: &mut impl DestinationSurface) {
            let bounds = dest.bounds();
            dest.present(bounds);
            dest.present(bounds);
        }

        let mut surface = OffscreenSurface::new(3, 2);
        present_twice(&mut &mut surface);
        assert_eq!(surface.presented(), &vec![PixelRect::new(0, 0, 3, 2); 2][..]);

        let mut boxed: Box<dyn DestinationSurface> = Box::new(OffscreenSurface::new(5, 5));
        present_twice(&mut boxed);
        assert_eq!(boxed.bounds(), PixelRect::from_size(5, 5));
    }
}
