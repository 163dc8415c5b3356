// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-order traversal.

use super::id::{INVALID, LayerId};
use super::stack::LayerStack;

/// An iterator over the layers of a stack, bottom to top.
///
/// Created by [`LayerStack::layers`]. Reverse it to walk top to bottom, e.g.
/// for hit testing.
pub struct Layers<'a, D> {
    stack: &'a LayerStack<D>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<D> core::fmt::Debug for Layers<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Layers")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, D> Layers<'a, D> {
    pub(crate) fn new(stack: &'a LayerStack<D>) -> Self {
        Self {
            stack,
            front: stack.bottom,
            back: stack.top,
            remaining: stack.len(),
        }
    }
}

impl<D> Iterator for Layers<'_, D> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.remaining == 0 || self.front == INVALID {
            return None;
        }
        let idx = self.front;
        self.front = self.stack.above[idx as usize];
        self.remaining -= 1;
        self.stack.id_at(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<D> DoubleEndedIterator for Layers<'_, D> {
    fn next_back(&mut self) -> Option<LayerId> {
        if self.remaining == 0 || self.back == INVALID {
            return None;
        }
        let idx = self.back;
        self.back = self.stack.below[idx as usize];
        self.remaining -= 1;
        self.stack.id_at(idx)
    }
}

impl<D> ExactSizeIterator for Layers<'_, D> {}
