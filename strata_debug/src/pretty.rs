// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::region::PixelRect;
use strata_core::trace::{
    DestinationBoundEvent, FlushBeginEvent, FlushEndEvent, LayerCompositedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn rect(r: PixelRect) -> String {
    format!("{},{} {}x{}", r.x0, r.y0, r.width(), r.height())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_destination_bound(&mut self, e: &DestinationBoundEvent) {
        let previous = e.previous.map_or_else(|| "none".to_owned(), rect);
        let _ = writeln!(
            self.writer,
            "[bind] bounds={} previous={previous} resized={}",
            rect(e.bounds),
            e.layers_resized,
        );
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[flush:begin] flush={} region={}",
            e.flush_index,
            rect(e.region),
        );
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        let _ = writeln!(
            self.writer,
            "[flush:end] flush={} clipped={} composited={} hidden={}",
            e.flush_index,
            rect(e.clipped),
            e.layers_composited,
            e.layers_hidden,
        );
    }

    fn on_layer_composited(&mut self, e: &LayerCompositedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer] flush={} layer={:?} depth={}",
            e.flush_index, e.layer, e.depth,
        );
    }
}
