// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event, in
//! arrival order, as a [`RecordedEvent`]. The log feeds
//! [`chrome::export`](crate::chrome::export) or direct assertions in tests.

use strata_core::trace::{
    DestinationBoundEvent, FlushBeginEvent, FlushEndEvent, LayerCompositedEvent, TraceSink,
};

/// A single recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_destination_bound`].
    DestinationBound(DestinationBoundEvent),
    /// See [`TraceSink::on_flush_begin`].
    FlushBegin(FlushBeginEvent),
    /// See [`TraceSink::on_flush_end`].
    FlushEnd(FlushEndEvent),
    /// See [`TraceSink::on_layer_composited`].
    LayerComposited(LayerCompositedEvent),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the completed flushes, oldest first.
    pub fn flushes(&self) -> impl Iterator<Item = &FlushEndEvent> + '_ {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::FlushEnd(end) => Some(end),
            _ => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_destination_bound(&mut self, e: &DestinationBoundEvent) {
        self.events.push(RecordedEvent::DestinationBound(*e));
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.events.push(RecordedEvent::FlushBegin(*e));
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        self.events.push(RecordedEvent::FlushEnd(*e));
    }

    fn on_layer_composited(&mut self, e: &LayerCompositedEvent) {
        self.events.push(RecordedEvent::LayerComposited(*e));
    }
}

#[cfg(test)]
mod tests {
    use strata_core::buffer::Rgba;
    use strata_core::layer::{LayerFlags, LayerStack};
    use strata_core::region::PixelRect;
    use strata_core::surface::OffscreenSurface;
    use strata_core::trace::Tracer;

    use super::*;

    #[test]
    fn records_a_traced_session() {
        let mut rec = RecorderSink::new();
        let mut stack = LayerStack::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            stack.set_destination_traced(OffscreenSurface::new(4, 4), &mut tracer);
        }
        let bottom = stack.push().unwrap();
        let hidden = stack.push().unwrap();
        let top = stack.push().unwrap();
        stack
            .buffer_mut(bottom)
            .unwrap()
            .fill_rect(PixelRect::from_size(4, 4), Rgba::BLACK);
        stack.set_flags(hidden, LayerFlags { hidden: true }).unwrap();

        let mut tracer = Tracer::new(&mut rec);
        stack
            .flush_traced(PixelRect::from_size(4, 4), &mut tracer)
            .unwrap();
        drop(tracer);

        let events = rec.events();
        assert_eq!(events.len(), 5, "bind, begin, 2 layers, end: {events:?}");
        assert!(matches!(events[0], RecordedEvent::DestinationBound(_)));
        assert!(matches!(events[1], RecordedEvent::FlushBegin(_)));
        assert_eq!(
            events[2],
            RecordedEvent::LayerComposited(LayerCompositedEvent {
                flush_index: 0,
                layer: bottom,
                depth: 0,
            })
        );
        assert_eq!(
            events[3],
            RecordedEvent::LayerComposited(LayerCompositedEvent {
                flush_index: 0,
                layer: top,
                depth: 2,
            })
        );

        let flushes: Vec<_> = rec.flushes().collect();
        assert_eq!(flushes.len(), 1);
        assert_eq!(flushes[0].layers_composited, 2);
        assert_eq!(flushes[0].layers_hidden, 1);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut rec = RecorderSink::new();
        rec.on_flush_begin(&FlushBeginEvent {
            flush_index: 0,
            region: PixelRect::ZERO,
        });
        assert_eq!(rec.events().len(), 1);
        rec.clear();
        assert!(rec.into_events().is_empty());
    }
}
