// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes events from a [`RecorderSink`](super::recorder::RecorderSink)
//! as [Chrome Trace Event Format][spec] JSON.
//!
//! Frames become complete (`"X"`) events spanning to the next frame, so the
//! timeline shows frame pacing directly. Rebuilds and teardowns carry no
//! timestamp of their own and are placed at the most recent known time.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use backdrop_core::time::HostTime;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a Chrome Trace Event Format JSON array.
///
/// Load the output into `chrome://tracing` or
/// [Perfetto](https://ui.perfetto.dev/).
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());
    let mut last_ts = 0.0;

    for (i, recorded) in events.iter().enumerate() {
        match recorded {
            RecordedEvent::Frame(e) => {
                let ts = us(e.now);
                last_ts = ts;
                let dur = next_frame_time(&events[i + 1..]).map_or(0.0, |next| (us(next) - ts).max(0.0));
                out.push(json!({
                    "ph": "X",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": ts,
                    "dur": dur,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "pairs": e.pairs,
                        "rebuilt": e.rebuilt,
                    }
                }));
            }
            RecordedEvent::Rebuild(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Rebuild",
                    "cat": "Layout",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "width": e.viewport.width,
                        "height": e.viewport.height,
                        "device_class": format!("{:?}", e.device_class),
                        "scale_factor": e.scale_factor,
                        "clusters": e.clusters,
                        "pairs": e.pairs,
                    }
                }));
            }
            RecordedEvent::ResizeDeferred(e) => {
                let ts = us(e.now);
                last_ts = ts;
                out.push(json!({
                    "ph": "i",
                    "name": "ResizeDeferred",
                    "cat": "Layout",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "width": e.viewport.width,
                        "height": e.viewport.height,
                        "deadline_us": us(e.deadline),
                    }
                }));
            }
            RecordedEvent::Teardown(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Teardown",
                    "cat": "Lifecycle",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frames_presented": e.frames_presented,
                        "dropped_pending_resize": e.dropped_pending_resize,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn next_frame_time(rest: &[RecordedEvent]) -> Option<HostTime> {
    rest.iter().find_map(|e| match e {
        RecordedEvent::Frame(f) => Some(f.now),
        _ => None,
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "session timestamps stay far below 2^53 µs"
)]
fn us(t: HostTime) -> f64 {
    t.micros() as f64
}
