// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for stack operations.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! stack calls while binding destinations and flushing. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Traced entry points are
//! [`LayerStack::flush_traced`](crate::layer::LayerStack::flush_traced) and
//! [`LayerStack::set_destination_traced`](crate::layer::LayerStack::set_destination_traced).
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`LayerCompositedEvent`] and the
//!   corresponding `TraceSink` method.

use crate::region::PixelRect;

#[cfg(feature = "trace-rich")]
use crate::layer::LayerId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a destination is bound and every layer resized to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestinationBoundEvent {
    /// Bounds of the newly bound destination.
    pub bounds: PixelRect,
    /// Bounds of the previous destination, if one was bound.
    pub previous: Option<PixelRect>,
    /// Number of layer buffers reallocated to the new size.
    pub layers_resized: u32,
}

/// Marks the beginning of a flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushBeginEvent {
    /// Monotonic flush counter for the stack.
    pub flush_index: u64,
    /// Region as requested by the caller.
    pub region: PixelRect,
}

/// Marks the end of a flush, after the destination was asked to present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushEndEvent {
    /// Monotonic flush counter for the stack.
    pub flush_index: u64,
    /// Region as requested by the caller (and passed to `present`).
    pub region: PixelRect,
    /// Region actually cleared and composited, clipped to the destination.
    pub clipped: PixelRect,
    /// Layers composited into the destination.
    pub layers_composited: u32,
    /// Hidden layers skipped.
    pub layers_hidden: u32,
}

/// Emitted once per layer composited during a flush.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerCompositedEvent {
    /// Flush this composite belongs to.
    pub flush_index: u64,
    /// The layer composited.
    pub layer: LayerId,
    /// Position in render order, counting from the bottom.
    pub depth: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a [`LayerStack`](crate::layer::LayerStack).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a destination is bound.
    fn on_destination_bound(&mut self, e: &DestinationBoundEvent) {
        _ = e;
    }

    /// Called before a flush clears the destination.
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        _ = e;
    }

    /// Called after a flush presented its region.
    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        _ = e;
    }

    /// Called for each composited layer (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_layer_composited(&mut self, e: &LayerCompositedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DestinationBoundEvent`].
    #[inline]
    pub fn destination_bound(&mut self, e: &DestinationBoundEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_destination_bound(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushBeginEvent`].
    #[inline]
    pub fn flush_begin(&mut self, e: &FlushBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushEndEvent`].
    #[inline]
    pub fn flush_end(&mut self, e: &FlushEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerCompositedEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn layer_composited(&mut self, e: &LayerCompositedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_layer_composited(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
