// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer handles.

use core::fmt;

/// End-of-list marker for the `below`/`above` render-order links.
pub(crate) const INVALID: u32 = u32::MAX;

/// Names one layer of a [`LayerStack`](super::LayerStack).
///
/// A `LayerId` is plain data: copying it does not borrow the stack. Removing
/// the layer bumps its slot's generation, so an old id keeps failing with
/// [`Error::StaleLayer`](crate::Error::StaleLayer) even after a later
/// [`push`](super::LayerStack::push) reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl LayerId {
    /// Slot the layer lives in. Slots are recycled, so this alone does not
    /// identify a layer over time.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// How many times the slot had been vacated when this id was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({}@gen{})", self.idx, self.generation)
    }
}
