// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by stack and buffer operations.

use crate::layer::LayerId;

/// Errors reported by [`LayerStack`](crate::layer::LayerStack) and
/// [`PixelBuffer`](crate::buffer::PixelBuffer).
///
/// Every variant is a caller-side misuse; none of them is transient, so
/// retrying the same call without changing state fails the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The stack has no destination bound, so layer size is unknown and there
    /// is nothing to composite into.
    #[error("layer stack has no destination bound")]
    NoDestination,
    /// The layer was removed from its stack.
    #[error("stale layer handle {0:?}")]
    StaleLayer(LayerId),
    /// Raw pixel data does not match the requested dimensions.
    #[error("pixel data is {actual} bytes, expected {expected}")]
    BufferSize {
        /// Byte length implied by `width * height * 4`.
        expected: usize,
        /// Byte length actually provided.
        actual: usize,
    },
}
