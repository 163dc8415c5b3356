// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stack data model.
//!
//! A *layer* is one transparent raster in a [`LayerStack`]. Each layer has:
//!
//! - An identity ([`LayerId`]), a generational handle that becomes stale when
//!   the layer is removed, so a removed handle reports
//!   [`Error::StaleLayer`](crate::Error::StaleLayer) instead of touching
//!   whichever layer later reuses the slot.
//! - A position in render order. Layers form a doubly linked list through the
//!   stack's slot arrays, bottom to top, so removal and
//!   [raise-to-front](LayerStack::raise_to_front) are O(1).
//! - A [`PixelBuffer`](crate::buffer::PixelBuffer) sized to the bound
//!   destination, drawn into by the caller through
//!   [`buffer_mut`](LayerStack::buffer_mut).
//! - [`LayerFlags`]; a hidden layer keeps its pixels and position but is
//!   skipped by compositing.
//!
//! # Render order
//!
//! [`push`](LayerStack::push) appends at the top. [`flush`](LayerStack::flush)
//! composites from the bottom up, so the top layer wins wherever layers
//! overlap. [`layers`](LayerStack::layers) iterates in the same bottom-to-top
//! order.
//!
//! # Handles
//!
//! Every operation is available on the stack keyed by [`LayerId`]. For code
//! that works on one layer at a time, [`LayerStack::layer`] returns a
//! borrowed [`Layer`] that carries the id and the stack together.

mod handle;
mod id;
mod stack;
mod traverse;

pub use handle::Layer;
pub use id::LayerId;
pub use stack::{LayerFlags, LayerStack};
pub use traverse::Layers;
