// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-independent half of the render bridge.
//!
//! [`Bridge`] owns everything the decoration loop mutates: the current
//! [`Layout`], the [`MotionSolver`], the [`PointerState`] and the resize
//! [`Debounce`]. A backend forwards events and frame ticks into it; the
//! bridge forwards layouts and solver output to a [`Presenter`].
//!
//! All mutation happens on one thread, from event handlers and the frame
//! callback, so no locking is involved. A resize never touches the live
//! layout. It only records the new viewport and arms the debounce. The next
//! frame that finds the debounce due generates a complete replacement
//! layout, swaps it in, rebuilds the presenter, and only then solves. The
//! solver therefore never iterates a layout that is being replaced.

use kurbo::Rect;

use crate::backend::Presenter;
use crate::debounce::Debounce;
use crate::layout::{self, Layout};
use crate::motion::{MotionConfig, MotionSolver, PointerState, ResizePolicy};
use crate::time::{Duration, FrameTick, HostTime};
use crate::trace::{FrameEvent, RebuildEvent, ResizeDeferredEvent, TeardownEvent, Tracer};
use crate::viewport::ViewportSize;

/// Configuration for a [`Bridge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeConfig {
    /// Motion tuning.
    pub motion: MotionConfig,
    /// Quiet period before a resize burst rebuilds the layout.
    pub resize_debounce: Duration,
    /// Whether oscillation parameters survive a rebuild.
    pub resize_policy: ResizePolicy,
    /// Seed for per-pair phase and frequency.
    pub seed: u64,
}

impl BridgeConfig {
    /// Defaults for the landing-page hero.
    pub const DEFAULT: Self = Self {
        motion: MotionConfig::DEFAULT,
        resize_debounce: Duration::from_millis(100),
        resize_policy: ResizePolicy::Regenerate,
        seed: 0x5eed_bac0,
    };
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Drives layout, motion and presentation for one mounted decoration.
#[derive(Debug)]
pub struct Bridge<P> {
    config: BridgeConfig,
    presenter: P,
    layout: Layout,
    solver: MotionSolver,
    pointer: PointerState,
    debounce: Debounce,
    pending_viewport: Option<ViewportSize>,
    mounted: bool,
    start: Option<HostTime>,
    frames_presented: u64,
}

impl<P: Presenter> Bridge<P> {
    /// Creates an unmounted bridge.
    #[must_use]
    pub fn new(config: BridgeConfig, presenter: P) -> Self {
        Self {
            config,
            presenter,
            layout: Layout::empty(ViewportSize::default()),
            solver: MotionSolver::new(config.motion, config.seed),
            pointer: PointerState::default(),
            debounce: Debounce::new(config.resize_debounce),
            pending_viewport: None,
            mounted: false,
            start: None,
            frames_presented: 0,
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns `true` between [`mount`](Self::mount) and
    /// [`teardown`](Self::teardown).
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The layout currently being animated.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The motion solver.
    #[inline]
    #[must_use]
    pub fn solver(&self) -> &MotionSolver {
        &self.solver
    }

    /// The last observed pointer state.
    #[inline]
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// The presenter.
    #[inline]
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presenter.
    #[inline]
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Returns `true` if a debounced rebuild is waiting.
    #[inline]
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Frames presented since the last mount.
    #[inline]
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Area the decoration may paint into, including motion headroom.
    ///
    /// The hero section reads this to size its minimum height so that moving
    /// shapes are never clipped. `None` while nothing is laid out.
    #[must_use]
    pub fn decoration_bounds(&self) -> Option<Rect> {
        let ex = self.config.motion.max_excursion();
        self.layout.bounds().map(|r| r.inflate(ex.x, ex.y))
    }

    /// Mounts the bridge with an initial viewport.
    ///
    /// The first layout is generated synchronously so the presenter has
    /// elements before the first frame. Mounting twice is a no-op.
    pub fn mount(&mut self, viewport: ViewportSize) {
        self.mount_traced(viewport, &mut Tracer::none());
    }

    /// Like [`mount`](Self::mount), emitting trace events.
    pub fn mount_traced(&mut self, viewport: ViewportSize, tracer: &mut Tracer<'_>) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.frames_presented = 0;
        self.start = None;
        self.pointer = PointerState::default();
        self.swap_layout(viewport, 0, tracer);
    }

    /// Records a pointer move in client coordinates.
    ///
    /// Ignored while unmounted.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.mounted {
            self.pointer = PointerState::new(x, y);
        }
    }

    /// Records a window or container resize observed at `now`.
    ///
    /// The layout is rebuilt by the first frame at least
    /// [`BridgeConfig::resize_debounce`] after the last resize of a burst.
    /// Ignored while unmounted.
    pub fn resized(&mut self, viewport: ViewportSize, now: HostTime) {
        self.resized_traced(viewport, now, &mut Tracer::none());
    }

    /// Like [`resized`](Self::resized), emitting trace events.
    pub fn resized_traced(&mut self, viewport: ViewportSize, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.mounted {
            return;
        }
        self.pending_viewport = Some(viewport);
        self.debounce.trigger(now);
        tracer.resize_deferred(&ResizeDeferredEvent {
            now,
            deadline: now + self.debounce.delay(),
            viewport,
        });
    }

    /// Runs one frame: rebuilds if a resize is due, solves and presents.
    ///
    /// Returns `false` once the bridge is unmounted, telling the tick source
    /// to stop.
    pub fn frame(&mut self, tick: FrameTick) -> bool {
        self.frame_traced(tick, &mut Tracer::none())
    }

    /// Like [`frame`](Self::frame), emitting trace events.
    pub fn frame_traced(&mut self, tick: FrameTick, tracer: &mut Tracer<'_>) -> bool {
        if !self.mounted {
            return false;
        }

        let mut rebuilt = false;
        if self.debounce.poll(tick.now)
            && let Some(viewport) = self.pending_viewport.take()
            && viewport != self.layout.viewport()
        {
            self.swap_layout(viewport, tick.frame_index, tracer);
            rebuilt = true;
        }

        let start = *self.start.get_or_insert(tick.now);
        let time = (tick.now - start).as_secs_f64();
        let frames = self.solver.solve(&self.layout, self.pointer, time);
        self.presenter.apply(&self.layout, frames);
        self.frames_presented += 1;

        tracer.frame(&FrameEvent {
            frame_index: tick.frame_index,
            now: tick.now,
            pairs: count(frames.len()),
            rebuilt,
        });
        true
    }

    /// Stops reacting to events and removes all presented elements.
    ///
    /// Safe to call any number of times.
    pub fn teardown(&mut self) {
        self.teardown_traced(&mut Tracer::none());
    }

    /// Like [`teardown`](Self::teardown), emitting trace events.
    pub fn teardown_traced(&mut self, tracer: &mut Tracer<'_>) {
        let dropped_pending_resize = self.debounce.is_pending();
        self.debounce.cancel();
        self.pending_viewport = None;
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.pointer = PointerState::default();
        self.start = None;
        self.solver.reset();
        self.layout = Layout::empty(ViewportSize::default());
        self.presenter.clear();
        tracer.teardown(&TeardownEvent {
            frames_presented: self.frames_presented,
            dropped_pending_resize,
        });
    }

    /// Generates a layout for `viewport` and installs it in one step.
    fn swap_layout(&mut self, viewport: ViewportSize, frame_index: u64, tracer: &mut Tracer<'_>) {
        let next = layout::generate(viewport.width, viewport.height);
        self.solver.rebuild(&next, self.config.resize_policy);
        self.layout = next;
        self.presenter.rebuild(&self.layout);
        tracer.rebuild(&RebuildEvent {
            frame_index,
            viewport,
            device_class: self.layout.device_class(),
            scale_factor: self.layout.scale_factor(),
            clusters: count(self.layout.clusters().len()),
            pairs: count(self.layout.pairs().len()),
        });
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "layouts hold at most sixteen pairs"
)]
const fn count(n: usize) -> u32 {
    n as u32
}
