// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! The stack has no clock, so timestamps are event ordinals: event `n` sits
//! at `n` microseconds. Flushes show up as nested begin/end slices with their
//! composited layers as instants inside.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::region::PixelRect;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(recorded: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::with_capacity(recorded.len());

    for (ts, event) in recorded.iter().enumerate() {
        match event {
            RecordedEvent::DestinationBound(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DestinationBound",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "bounds": rect(e.bounds),
                        "previous": e.previous.map(rect),
                        "layers_resized": e.layers_resized,
                    }
                }));
            }
            RecordedEvent::FlushBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Flush",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "flush_index": e.flush_index,
                        "region": rect(e.region),
                    }
                }));
            }
            RecordedEvent::FlushEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Flush",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "flush_index": e.flush_index,
                        "clipped": rect(e.clipped),
                        "layers_composited": e.layers_composited,
                        "layers_hidden": e.layers_hidden,
                    }
                }));
            }
            RecordedEvent::LayerComposited(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerComposited",
                    "cat": "Layer",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "flush_index": e.flush_index,
                        "layer": e.layer.index(),
                        "generation": e.layer.generation(),
                        "depth": e.depth,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn rect(r: PixelRect) -> [i32; 4] {
    [r.x0, r.y0, r.x1, r.y1]
}
