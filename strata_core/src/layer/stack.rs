// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-array layer storage with allocation, ordering, and compositing.

use alloc::vec::Vec;
use core::fmt;

use super::handle::Layer;
use super::id::{INVALID, LayerId};
use super::traverse::Layers;
use crate::buffer::PixelBuffer;
use crate::error::Error;
use crate::region::PixelRect;
use crate::surface::DestinationSurface;
use crate::trace::{DestinationBoundEvent, FlushBeginEvent, FlushEndEvent, Tracer};

/// Per-layer boolean flags.
///
/// Setting [`hidden`](Self::hidden) suppresses the layer during compositing.
/// Its buffer and position are kept, so unhiding restores it on the next
/// flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer is skipped by compositing.
    pub hidden: bool,
}

/// An ordered stack of transparent layers bound to a destination surface.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Removed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The stack starts *unbound*: [`push`](Self::push) and
/// [`flush`](Self::flush) return [`Error::NoDestination`] until
/// [`set_destination`](Self::set_destination) is called. Once bound, a stack
/// stays bound; rebinding only swaps (and resizes to) the new destination.
pub struct LayerStack<D> {
    destination: Option<D>,

    // -- Render order (bottom to top) --
    pub(crate) below: Vec<u32>,
    pub(crate) above: Vec<u32>,
    pub(crate) bottom: u32,
    pub(crate) top: u32,

    // -- Per-layer state --
    pub(crate) buffer: Vec<PixelBuffer>,
    pub(crate) flags: Vec<LayerFlags>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) slots: u32,
    pub(crate) live: u32,

    flush_index: u64,
}

impl<D> fmt::Debug for LayerStack<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerStack")
            .field("bound", &self.destination.is_some())
            .field("layers", &self.live)
            .field("slots", &self.slots)
            .field("flush_index", &self.flush_index)
            .finish_non_exhaustive()
    }
}

impl<D> Default for LayerStack<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> LayerStack<D> {
    /// Creates an empty, unbound stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            destination: None,
            below: Vec::new(),
            above: Vec::new(),
            bottom: INVALID,
            top: INVALID,
            buffer: Vec::new(),
            flags: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            slots: 0,
            live: 0,
            flush_index: 0,
        }
    }

    // -- Destination --

    /// Returns `true` once a destination has been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.destination.is_some()
    }

    /// Returns the bound destination.
    #[must_use]
    pub fn destination(&self) -> Option<&D> {
        self.destination.as_ref()
    }

    /// Returns the bound destination mutably.
    ///
    /// If the destination is resized through this reference, layers follow
    /// on the next [`push`](Self::push) or [`flush`](Self::flush), keeping
    /// their top-left content as on a rebind.
    pub fn destination_mut(&mut self) -> Option<&mut D> {
        self.destination.as_mut()
    }

    /// Number of flushes completed so far.
    #[must_use]
    pub fn flush_count(&self) -> u64 {
        self.flush_index
    }

    // -- Queries --

    /// Number of layers in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live as usize
    }

    /// Returns `true` if the stack holds no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns whether the given handle refers to a layer still in the stack.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        self.generation.get(id.idx as usize) == Some(&id.generation)
    }

    /// Returns an iterator over the layers in render order, bottom first.
    #[must_use]
    pub fn layers(&self) -> Layers<'_, D> {
        Layers::new(self)
    }

    /// The topmost layer (rendered last).
    #[must_use]
    pub fn top(&self) -> Option<LayerId> {
        self.id_at(self.top)
    }

    /// The bottommost layer (rendered first).
    #[must_use]
    pub fn bottom(&self) -> Option<LayerId> {
        self.id_at(self.bottom)
    }

    /// Returns a borrowed handle for one layer.
    pub fn layer(&mut self, id: LayerId) -> Result<Layer<'_, D>, Error> {
        self.validate(id)?;
        Ok(Layer::new(self, id))
    }

    // -- Per-layer operations --

    /// Returns the layer's pixels.
    pub fn buffer(&self, id: LayerId) -> Result<&PixelBuffer, Error> {
        self.validate(id)?;
        Ok(&self.buffer[id.idx as usize])
    }

    /// Returns the layer's pixels for drawing.
    pub fn buffer_mut(&mut self, id: LayerId) -> Result<&mut PixelBuffer, Error> {
        self.validate(id)?;
        Ok(&mut self.buffer[id.idx as usize])
    }

    /// Returns the layer's flags.
    pub fn flags(&self, id: LayerId) -> Result<LayerFlags, Error> {
        self.validate(id)?;
        Ok(self.flags[id.idx as usize])
    }

    /// Sets the layer's flags.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) -> Result<(), Error> {
        self.validate(id)?;
        self.flags[id.idx as usize] = flags;
        Ok(())
    }

    /// Removes a layer from the stack and releases its buffer.
    ///
    /// The handle (and every copy of it) becomes stale.
    pub fn remove(&mut self, id: LayerId) -> Result<(), Error> {
        self.validate(id)?;
        self.remove_slot(id.idx);
        Ok(())
    }

    /// Moves a layer to the top of the render order without touching its
    /// pixels. Raising the top layer is a no-op.
    pub fn raise_to_front(&mut self, id: LayerId) -> Result<(), Error> {
        self.validate(id)?;
        self.raise_slot(id.idx);
        Ok(())
    }

    // -- Internal helpers --

    /// Returns [`Error::StaleLayer`] if the handle was removed.
    pub(crate) fn validate(&self, id: LayerId) -> Result<(), Error> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(Error::StaleLayer(id))
        }
    }

    pub(crate) fn id_at(&self, idx: u32) -> Option<LayerId> {
        (idx != INVALID).then(|| LayerId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Allocates a slot holding `buffer`, linked at the top.
    fn allocate(&mut self, buffer: PixelBuffer) -> u32 {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on removal.
            self.buffer[idx as usize] = buffer;
            self.flags[idx as usize] = LayerFlags::default();
            idx
        } else {
            let idx = self.slots;
            self.slots += 1;
            self.below.push(INVALID);
            self.above.push(INVALID);
            self.buffer.push(buffer);
            self.flags.push(LayerFlags::default());
            self.generation.push(0);
            idx
        };
        self.link_top(idx);
        self.live += 1;
        idx
    }

    pub(crate) fn remove_slot(&mut self, idx: u32) {
        self.unlink(idx);
        // Drop the pixels now rather than when the slot is reused.
        self.buffer[idx as usize] = PixelBuffer::default();
        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] = self.generation[idx as usize].wrapping_add(1);
        self.free_list.push(idx);
        self.live -= 1;
    }

    pub(crate) fn raise_slot(&mut self, idx: u32) {
        if self.top == idx {
            return;
        }
        self.unlink(idx);
        self.link_top(idx);
    }

    /// Appends `idx` (currently unlinked) above the current top.
    fn link_top(&mut self, idx: u32) {
        self.below[idx as usize] = self.top;
        self.above[idx as usize] = INVALID;
        if self.top == INVALID {
            self.bottom = idx;
        } else {
            self.above[self.top as usize] = idx;
        }
        self.top = idx;
    }

    /// Removes `idx` from the render order.
    fn unlink(&mut self, idx: u32) {
        let below = self.below[idx as usize];
        let above = self.above[idx as usize];

        if below == INVALID {
            self.bottom = above;
        } else {
            self.above[below as usize] = above;
        }

        if above == INVALID {
            self.top = below;
        } else {
            self.below[above as usize] = below;
        }

        self.below[idx as usize] = INVALID;
        self.above[idx as usize] = INVALID;
    }
}

impl<D: DestinationSurface> LayerStack<D> {
    /// Bounds of the bound destination.
    #[must_use]
    pub fn bounds(&self) -> Option<PixelRect> {
        self.destination.as_ref().map(DestinationSurface::bounds)
    }

    /// Binds (or rebinds) the destination and returns the previous one.
    ///
    /// Every layer gets a new buffer sized to `dest`'s bounds holding the
    /// top-left overlap of its old pixels, copied without blending. Content
    /// past the new bounds is dropped; newly exposed area is transparent.
    pub fn set_destination(&mut self, dest: D) -> Option<D> {
        self.set_destination_traced(dest, &mut Tracer::none())
    }

    /// Like [`set_destination`](Self::set_destination), emitting a
    /// [`DestinationBoundEvent`].
    pub fn set_destination_traced(&mut self, dest: D, tracer: &mut Tracer<'_>) -> Option<D> {
        let bounds = dest.bounds();
        let layers_resized = self.fit_layers(bounds);
        let previous = self.destination.replace(dest);
        tracer.destination_bound(&DestinationBoundEvent {
            bounds,
            previous: previous.as_ref().map(DestinationSurface::bounds),
            layers_resized,
        });
        previous
    }

    /// Adds a fully transparent layer at the top of the render order.
    ///
    /// Returns [`Error::NoDestination`] if no destination is bound, since the
    /// layer's size is unknown.
    pub fn push(&mut self) -> Result<LayerId, Error> {
        let bounds = self.bounds().ok_or(Error::NoDestination)?;
        self.fit_layers(bounds);
        let idx = self.allocate(PixelBuffer::new(bounds.width(), bounds.height()));
        Ok(LayerId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Composites every visible layer into the destination within `region`
    /// and presents it.
    ///
    /// The region is first cleared to transparent in the destination, then
    /// each layer is composited over it bottom to top with source-over.
    /// Clearing and compositing clip to the destination bounds; `present`
    /// receives `region` unchanged.
    ///
    /// Returns [`Error::NoDestination`] without touching anything if no
    /// destination is bound.
    pub fn flush(&mut self, region: PixelRect) -> Result<(), Error> {
        self.flush_traced(region, &mut Tracer::none())
    }

    /// Flushes the whole destination.
    pub fn flush_all(&mut self) -> Result<(), Error> {
        let bounds = self.bounds().ok_or(Error::NoDestination)?;
        self.flush(bounds)
    }

    /// Like [`flush`](Self::flush), emitting flush begin/end events and, with
    /// `trace-rich`, one event per composited layer.
    pub fn flush_traced(
        &mut self,
        region: PixelRect,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), Error> {
        let bounds = self.bounds().ok_or(Error::NoDestination)?;
        self.fit_layers(bounds);
        let Some(dest) = self.destination.as_mut() else {
            return Err(Error::NoDestination);
        };
        let flush_index = self.flush_index;
        tracer.flush_begin(&FlushBeginEvent {
            flush_index,
            region,
        });

        let target = dest.buffer_mut();
        let clipped = region.intersect(target.bounds());
        target.clear_rect(clipped);

        let mut layers_composited = 0;
        let mut layers_hidden = 0;
        let mut idx = self.bottom;
        while idx != INVALID {
            #[cfg(feature = "trace-rich")]
            let cur = idx;
            let slot = idx as usize;
            idx = self.above[slot];
            if self.flags[slot].hidden {
                layers_hidden += 1;
                continue;
            }
            if !clipped.is_empty() {
                target.composite_over(&self.buffer[slot], clipped);
            }
            #[cfg(feature = "trace-rich")]
            tracer.layer_composited(&crate::trace::LayerCompositedEvent {
                flush_index,
                layer: LayerId {
                    idx: cur,
                    generation: self.generation[slot],
                },
                depth: layers_composited + layers_hidden,
            });
            layers_composited += 1;
        }

        dest.present(region);
        self.flush_index += 1;
        tracer.flush_end(&FlushEndEvent {
            flush_index,
            region,
            clipped,
            layers_composited,
            layers_hidden,
        });
        Ok(())
    }

    /// Resizes every layer whose buffer differs from `bounds`, keeping the
    /// top-left overlap. Returns the number of buffers reallocated.
    fn fit_layers(&mut self, bounds: PixelRect) -> u32 {
        let (width, height) = (bounds.width(), bounds.height());
        let mut resized = 0;
        let mut idx = self.bottom;
        while idx != INVALID {
            let buffer = &mut self.buffer[idx as usize];
            if buffer.width() != width || buffer.height() != height {
                *buffer = buffer.resized(width, height);
                resized += 1;
            }
            idx = self.above[idx as usize];
        }
        resized
    }
}
