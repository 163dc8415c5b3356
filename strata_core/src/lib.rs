// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stack and source-over compositing into a destination surface.
//!
//! `strata_core` manages an ordered stack of equally sized, transparent
//! raster layers and flattens them into a caller-provided destination on
//! demand. It is `no_std` compatible (with `alloc`) and stores layers in
//! slot arrays addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   LayerStack::set_destination(dest)        (resizes every layer buffer)
//!       │
//!       ▼
//!   LayerStack::push() ──► LayerId ──► buffer_mut(id)   (caller draws)
//!       │
//!       ▼
//!   LayerStack::flush(region)
//!       ├─ clear region in destination
//!       ├─ composite layers bottom → top (source-over)
//!       └─ DestinationSurface::present(region)
//! ```
//!
//! **[`layer`]** — [`LayerStack`](layer::LayerStack), generational
//! [`LayerId`](layer::LayerId) handles, and the borrowed
//! [`Layer`](layer::Layer) handle.
//!
//! **[`buffer`]** — [`PixelBuffer`](buffer::PixelBuffer), a premultiplied
//! RGBA8 raster with clipped fill, copy, and compositing kernels.
//!
//! **[`region`]** — [`PixelRect`](region::PixelRect), integer pixel
//! rectangles with `kurbo` interop.
//!
//! **[`surface`]** — The [`DestinationSurface`](surface::DestinationSurface)
//! trait and an [`OffscreenSurface`](surface::OffscreenSurface) that records
//! presented regions.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! stack instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Example
//!
//! ```
//! use strata_core::buffer::Rgba;
//! use strata_core::layer::LayerStack;
//! use strata_core::region::PixelRect;
//! use strata_core::surface::{DestinationSurface, OffscreenSurface};
//!
//! let mut stack = LayerStack::new();
//! stack.set_destination(OffscreenSurface::new(64, 64));
//!
//! let background = stack.push()?;
//! stack
//!     .buffer_mut(background)?
//!     .fill_rect(PixelRect::new(0, 0, 64, 64), Rgba::WHITE);
//!
//! stack.flush(PixelRect::new(0, 0, 32, 32))?;
//! let dest = stack.destination().unwrap();
//! assert_eq!(dest.buffer().pixel(4, 4), Some(Rgba::WHITE));
//! assert_eq!(dest.buffer().pixel(40, 40), Some(Rgba::TRANSPARENT));
//! # Ok::<(), strata_core::Error>(())
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   composite events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod buffer;
mod error;
pub mod layer;
pub mod region;
pub mod surface;
pub mod trace;

pub use error::Error;
