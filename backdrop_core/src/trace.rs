// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the decoration loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Bridge`](crate::bridge::Bridge) calls at each stage. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::time::HostTime;
use crate::viewport::{DeviceClass, ViewportSize};

/// Emitted after each presented frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Frame counter from the tick source.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Number of pairs positioned.
    pub pairs: u32,
    /// Whether a layout rebuild ran at the start of this frame.
    pub rebuilt: bool,
}

/// Emitted when a new layout is swapped in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebuildEvent {
    /// Frame during which the rebuild ran (0 for the mount rebuild).
    pub frame_index: u64,
    /// Viewport the layout was generated for.
    pub viewport: ViewportSize,
    /// Device class of the new layout.
    pub device_class: DeviceClass,
    /// Scale factor of the new layout.
    pub scale_factor: f64,
    /// Cluster count.
    pub clusters: u32,
    /// Pair count.
    pub pairs: u32,
}

/// Emitted when a resize notification arms or re-arms the debounce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeDeferredEvent {
    /// Host time of the notification.
    pub now: HostTime,
    /// When the rebuild becomes due if no further resize arrives.
    pub deadline: HostTime,
    /// Latest observed viewport.
    pub viewport: ViewportSize,
}

/// Emitted when the bridge is torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeardownEvent {
    /// Frames presented since mount.
    pub frames_presented: u64,
    /// Whether a debounced rebuild was still pending and got dropped.
    pub dropped_pending_resize: bool,
}

/// Receives decoration-loop events.
///
/// All methods have default no-op implementations, so you only need to
/// override the ones you care about.
pub trait TraceSink {
    /// Called after a frame is presented.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called after a layout rebuild.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }

    /// Called when a resize is deferred by the debounce.
    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        _ = e;
    }

    /// Called on teardown.
    fn on_teardown(&mut self, e: &TeardownEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeDeferredEvent`].
    #[inline]
    pub fn resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize_deferred(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TeardownEvent`].
    #[inline]
    pub fn teardown(&mut self, e: &TeardownEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_teardown(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
