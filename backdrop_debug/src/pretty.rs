// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use backdrop_core::time::HostTime;
use backdrop_core::trace::{
    FrameEvent, RebuildEvent, ResizeDeferredEvent, TeardownEvent, TraceSink,
};
use backdrop_core::viewport::DeviceClass;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Print every Nth frame event; rebuilds and teardowns are always printed.
    frame_stride: u64,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("frame_stride", &self.frame_stride)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            frame_stride: 1,
        }
    }

    /// Prints only every `stride`th frame. Zero is treated as one.
    #[must_use]
    pub fn frame_stride(mut self, stride: u64) -> Self {
        self.frame_stride = stride.max(1);
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.as_secs_f64() * 1000.0
}

fn class_name(class: DeviceClass) -> &'static str {
    match class {
        DeviceClass::Compact => "compact",
        DeviceClass::Wide => "wide",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame(&mut self, e: &FrameEvent) {
        if !e.rebuilt && e.frame_index % self.frame_stride != 0 {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] #{} now={:.1}ms pairs={}{}",
            e.frame_index,
            ms(e.now),
            e.pairs,
            if e.rebuilt { " rebuilt" } else { "" },
        );
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        let _ = writeln!(
            self.writer,
            "[rebuild] frame={} viewport={}x{} class={} scale={:.3} clusters={} pairs={}",
            e.frame_index,
            e.viewport.width,
            e.viewport.height,
            class_name(e.device_class),
            e.scale_factor,
            e.clusters,
            e.pairs,
        );
    }

    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        let _ = writeln!(
            self.writer,
            "[resize] {}x{} at {:.1}ms, due {:.1}ms",
            e.viewport.width,
            e.viewport.height,
            ms(e.now),
            ms(e.deadline),
        );
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        let pending = if e.dropped_pending_resize {
            " (dropped pending resize)"
        } else {
            ""
        };
        let _ = writeln!(
            self.writer,
            "[teardown] frames={}{pending}",
            e.frames_presented,
        );
    }
}
