// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps each event, in
//! arrival order, as a [`RecordedEvent`].

use backdrop_core::trace::{
    FrameEvent, RebuildEvent, ResizeDeferredEvent, TeardownEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`RebuildEvent`].
    Rebuild(RebuildEvent),
    /// A [`ResizeDeferredEvent`].
    ResizeDeferred(ResizeDeferredEvent),
    /// A [`TeardownEvent`].
    Teardown(TeardownEvent),
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

    /// Recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of frames presented.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Frame(_)))
            .count()
    }

    /// Layout rebuilds, including the one at mount.
    pub fn rebuilds(&self) -> impl Iterator<Item = &RebuildEvent> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Rebuild(r) => Some(r),
            _ => None,
        })
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_frame(&mut self, e: &FrameEvent) {
        self.events.push(RecordedEvent::Frame(*e));
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.events.push(RecordedEvent::Rebuild(*e));
    }

    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        self.events.push(RecordedEvent::ResizeDeferred(*e));
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.events.push(RecordedEvent::Teardown(*e));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use backdrop_core::backend::Presenter;
    use backdrop_core::bridge::{Bridge, BridgeConfig};
    use backdrop_core::layout::Layout;
    use backdrop_core::motion::PairFrame;
    use backdrop_core::time::{FrameTick, HostTime};
    use backdrop_core::trace::Tracer;
    use backdrop_core::viewport::{DeviceClass, ViewportSize};

    /// Presenter that draws nothing.
    #[derive(Debug, Default)]
    pub(crate) struct NullPresenter;

    impl Presenter for NullPresenter {
        fn rebuild(&mut self, _layout: &Layout) {}
        fn apply(&mut self, _layout: &Layout, _frames: &[PairFrame]) {}
        fn clear(&mut self) {}
    }

    pub(crate) fn tick(ms: u64, frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(ms * 1000),
            frame_index,
        }
    }

    /// Mount, three frames, a debounced resize to a phone width, two more
    /// frames, teardown.
    pub(crate) fn record_session() -> RecorderSink {
        let mut sink = RecorderSink::new();
        let mut bridge = Bridge::new(BridgeConfig::DEFAULT, NullPresenter);
        {
            let mut tracer = Tracer::new(&mut sink);
            bridge.mount_traced(ViewportSize::new(1440.0, 900.0), &mut tracer);
            for i in 0..3 {
                bridge.frame_traced(tick(i * 16, i), &mut tracer);
            }
            bridge.resized_traced(ViewportSize::new(375.0, 800.0), HostTime(40_000), &mut tracer);
            bridge.frame_traced(tick(150, 3), &mut tracer);
            bridge.frame_traced(tick(166, 4), &mut tracer);
            bridge.teardown_traced(&mut tracer);
        }
        sink
    }

    #[test]
    fn records_a_full_session_in_order() {
        let sink = record_session();
        let kinds: Vec<&str> = sink
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::Frame(_) => "frame",
                RecordedEvent::Rebuild(_) => "rebuild",
                RecordedEvent::ResizeDeferred(_) => "resize",
                RecordedEvent::Teardown(_) => "teardown",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "rebuild", "frame", "frame", "frame", "resize", "rebuild", "frame", "frame",
                "teardown"
            ],
            "mount rebuild, debounced rebuild at the due frame"
        );
        assert_eq!(sink.frame_count(), 5, "five frames presented");
    }

    #[test]
    fn rebuilds_carry_device_class() {
        let sink = record_session();
        let classes: Vec<DeviceClass> = sink.rebuilds().map(|r| r.device_class).collect();
        assert_eq!(
            classes,
            [DeviceClass::Wide, DeviceClass::Compact],
            "desktop then phone"
        );
        assert!(
            sink.rebuilds().all(|r| r.pairs == 16 && r.clusters == 4),
            "full layouts"
        );
    }

    #[test]
    fn teardown_reports_presented_frames() {
        let sink = record_session();
        match sink.events().last() {
            Some(RecordedEvent::Teardown(e)) => {
                assert_eq!(e.frames_presented, 5, "frame total");
                assert!(!e.dropped_pending_resize, "resize already applied");
            }
            other => panic!("expected Teardown, got {other:?}"),
        }
    }

    #[test]
    fn clear_empties_the_recording() {
        let mut sink = record_session();
        sink.clear();
        assert!(sink.events().is_empty(), "nothing left");
    }
}
