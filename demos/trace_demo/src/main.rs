// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered-drawing session with trace output.
//!
//! Drives a [`LayerStack`] against an [`OffscreenSurface`] the way a small
//! paint tool would: a background, a sketch layer, and an annotation layer,
//! with a reorder, a hide, a resize, and a removal between flushes. Every
//! event is pretty-printed to stderr and recorded; the recording is written
//! as Chrome trace JSON to the path given as the first argument, if any.
//!
//! ```sh
//! cargo run -p trace_demo -- trace.json
//! ```

use std::fs::File;
use std::io::BufWriter;

use strata_core::buffer::Rgba;
use strata_core::layer::{LayerFlags, LayerStack};
use strata_core::region::PixelRect;
use strata_core::surface::{DestinationSurface, OffscreenSurface};
use strata_core::trace::{
    DestinationBoundEvent, FlushBeginEvent, FlushEndEvent, LayerCompositedEvent, TraceSink,
    Tracer,
};
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

/// Forwards every event to both a pretty printer and a recorder.
#[derive(Debug)]
struct TeeSink {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for TeeSink {
    fn on_destination_bound(&mut self, e: &DestinationBoundEvent) {
        self.pretty.on_destination_bound(e);
        self.recorder.on_destination_bound(e);
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.pretty.on_flush_begin(e);
        self.recorder.on_flush_begin(e);
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        self.pretty.on_flush_end(e);
        self.recorder.on_flush_end(e);
    }

    fn on_layer_composited(&mut self, e: &LayerCompositedEvent) {
        self.pretty.on_layer_composited(e);
        self.recorder.on_layer_composited(e);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sink = TeeSink {
        pretty: PrettyPrintSink::stderr(),
        recorder: RecorderSink::new(),
    };

    let mut stack = LayerStack::new();
    stack.set_destination_traced(
        OffscreenSurface::new(WIDTH, HEIGHT),
        &mut Tracer::new(&mut sink),
    );

    let background = stack.push()?;
    stack
        .buffer_mut(background)?
        .fill_rect(PixelRect::from_size(WIDTH, HEIGHT), Rgba::WHITE);

    let sketch = stack.push()?;
    for i in 0..100 {
        let r = PixelRect::from_origin_size(20 + i, 20 + i, 4, 4);
        stack
            .buffer_mut(sketch)?
            .fill_rect(r, Rgba::from_straight(30, 30, 30, 200));
    }

    let notes = stack.push()?;
    stack.buffer_mut(notes)?.fill_rect(
        kurbo_region(60.5, 40.2, 180.0, 90.7),
        Rgba::from_straight(255, 220, 0, 128),
    );

    stack.flush_traced(
        PixelRect::from_size(WIDTH, HEIGHT),
        &mut Tracer::new(&mut sink),
    )?;

    // Sketch over the notes, then redraw only the damaged area.
    let damage = kurbo_region(60.5, 40.2, 180.0, 90.7);
    stack.layer(sketch)?.raise_to_front();
    stack.flush_traced(damage, &mut Tracer::new(&mut sink))?;

    stack.set_flags(notes, LayerFlags { hidden: true })?;
    stack.flush_traced(damage, &mut Tracer::new(&mut sink))?;

    // The window shrank: layers follow, keeping their top-left content.
    stack.set_destination_traced(
        OffscreenSurface::new(WIDTH / 2, HEIGHT / 2),
        &mut Tracer::new(&mut sink),
    );
    stack.layer(notes)?.remove();
    stack.flush_traced(
        PixelRect::new(-50, -50, 1000, 1000),
        &mut Tracer::new(&mut sink),
    )?;

    if let Some(dest) = stack.destination() {
        eprintln!(
            "presented {} region(s); pixel (30, 30) = {:?}",
            dest.presented().len(),
            dest.buffer().pixel(30, 30),
        );
    }

    if let Some(path) = std::env::args().nth(1) {
        let mut writer = BufWriter::new(File::create(&path)?);
        strata_debug::chrome::export(sink.recorder.events(), &mut writer)?;
        eprintln!("wrote Chrome trace to {path}");
    }

    Ok(())
}

/// Snaps a fractional editor-space rectangle out to the pixel grid.
fn kurbo_region(x0: f64, y0: f64, x1: f64, y1: f64) -> PixelRect {
    kurbo::Rect::new(x0, y0, x1, y1).into()
}
