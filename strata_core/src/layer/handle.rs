// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed single-layer handle.

use super::id::LayerId;
use super::stack::{LayerFlags, LayerStack};
use crate::buffer::PixelBuffer;
use crate::error::Error;
use crate::region::PixelRect;
use crate::surface::DestinationSurface;

/// A layer together with the stack that owns it.
///
/// Created by [`LayerStack::layer`], which validates the id once. The handle
/// borrows the stack exclusively, so the layer cannot be removed out from
/// under it and its operations need no further checks.
/// [`remove`](Self::remove) consumes the handle.
///
/// ```
/// use strata_core::buffer::Rgba;
/// use strata_core::layer::LayerStack;
/// use strata_core::region::PixelRect;
/// use strata_core::surface::OffscreenSurface;
///
/// let mut stack = LayerStack::new();
/// stack.set_destination(OffscreenSurface::new(8, 8));
/// let id = stack.push()?;
///
/// let mut layer = stack.layer(id)?;
/// layer.buffer_mut().fill_rect(PixelRect::new(0, 0, 4, 4), Rgba::BLACK);
/// layer.flush(PixelRect::new(0, 0, 8, 8))?;
/// layer.remove();
///
/// assert!(!stack.is_alive(id));
/// # Ok::<(), strata_core::Error>(())
/// ```
pub struct Layer<'a, D> {
    stack: &'a mut LayerStack<D>,
    id: LayerId,
}

impl<D> core::fmt::Debug for Layer<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<'a, D> Layer<'a, D> {
    pub(crate) fn new(stack: &'a mut LayerStack<D>, id: LayerId) -> Self {
        Self { stack, id }
    }

    /// This layer's id, usable after the handle is dropped.
    #[inline]
    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Returns the layer's pixels.
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.stack.buffer[self.id.idx as usize]
    }

    /// Returns the layer's pixels for drawing.
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.stack.buffer[self.id.idx as usize]
    }

    /// Returns the layer's flags.
    #[must_use]
    pub fn flags(&self) -> LayerFlags {
        self.stack.flags[self.id.idx as usize]
    }

    /// Sets the layer's flags.
    pub fn set_flags(&mut self, flags: LayerFlags) {
        self.stack.flags[self.id.idx as usize] = flags;
    }

    /// Moves the layer to the top of the render order.
    pub fn raise_to_front(&mut self) {
        self.stack.raise_slot(self.id.idx);
    }

    /// Removes the layer from its stack and releases its buffer.
    pub fn remove(self) {
        self.stack.remove_slot(self.id.idx);
    }

    /// Returns `true` if this layer renders last.
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.stack.top == self.id.idx
    }
}

impl<D: DestinationSurface> Layer<'_, D> {
    /// Flushes the owning stack; see [`LayerStack::flush`].
    pub fn flush(&mut self, region: PixelRect) -> Result<(), Error> {
        self.stack.flush(region)
    }
}
