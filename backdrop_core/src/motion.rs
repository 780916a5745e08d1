// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame motion for shape pairs.
//!
//! Every frame, each pair's wrapper is pulled toward a target offset made of
//! two parts:
//!
//! ```text
//! target = ambient(t, cluster) + parallax(pointer)
//! ambient = (sin(0.5·t + cluster)·ax, cos(0.5·t + cluster)·ay)
//! parallax = (pointer / viewport − 0.5) · amplitude
//! ```
//!
//! The wrapper follows the target through a first-order low-pass filter
//! ([`step_toward`]), so it never jumps. Independently, the light square of
//! each pair bobs vertically with its own phase and frequency; the shadow
//! does not. Both values are rounded to whole pixel steps before they reach
//! a presenter.
//!
//! Phase and frequency come from a seeded [`SmallRng`], so a solver built
//! with the same seed produces the same motion.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng as _};

use crate::layout::{Layout, PairId};
use crate::viewport::ViewportSize;

/// Frame interval the smoothing factor is expressed against.
pub const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// Longest frame gap the smoothing filter compounds over.
///
/// A resumed background tab or a stalled main thread delivers one frame
/// after a long gap; the filter advances as if only this much time passed.
pub const MAX_STEP_SECS: f64 = 0.1;

/// What happens to per-pair phase and frequency when the layout is rebuilt.
///
/// Regenerating matches how the page has always behaved, at the cost of a
/// visible hitch in the bob after a resize. Preserving keeps the bob
/// continuous for pairs whose id survives the rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizePolicy {
    /// Draw fresh phase and frequency for every pair.
    #[default]
    Regenerate,
    /// Keep the motion state of pairs that still exist.
    Preserve,
}

/// Tuning for the [`MotionSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Angular rate of the ambient drift, in radians per second.
    pub drift_rate: f64,
    /// Peak ambient drift per axis, in pixels.
    pub drift_amplitude: Vec2,
    /// Parallax offset per unit of normalized pointer position, in pixels.
    pub parallax_amplitude: Vec2,
    /// Fraction of the remaining distance covered per reference frame.
    pub smoothing: f64,
    /// Peak vertical bob of the light square, in pixels.
    pub bob_amplitude: f64,
    /// Bob angular frequency band `[min, max)`, in radians per second.
    pub frequency_band: (f64, f64),
    /// Quantization step for presented offsets, in pixels.
    pub pixel_step: f64,
}

impl MotionConfig {
    /// Defaults tuned for the landing-page hero.
    pub const DEFAULT: Self = Self {
        drift_rate: 0.5,
        drift_amplitude: Vec2::new(12.0, 8.0),
        parallax_amplitude: Vec2::new(30.0, 20.0),
        smoothing: 0.03,
        bob_amplitude: 4.0,
        frequency_band: (0.8, 1.6),
        pixel_step: 1.0,
    };

    /// Largest distance any shape can travel from its rest position, per axis.
    ///
    /// Used to grow measured decoration bounds so moving shapes are not
    /// clipped.
    #[must_use]
    pub fn max_excursion(&self) -> Vec2 {
        let parallax = self.parallax_amplitude * 0.5;
        Vec2::new(
            libm::fabs(self.drift_amplitude.x) + libm::fabs(parallax.x),
            libm::fabs(self.drift_amplitude.y)
                + libm::fabs(parallax.y)
                + libm::fabs(self.bob_amplitude),
        ) + Vec2::new(self.pixel_step, self.pixel_step)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The last observed pointer position, in viewport pixels.
///
/// Defaults to the origin until a pointer event arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Client-space pointer position.
    pub position: Point,
}

impl PointerState {
    /// Creates a pointer state at the given client coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }

    /// Returns the pointer position mapped to `[-0.5, 0.5]` on each axis.
    ///
    /// Degenerate viewports and non-finite coordinates map to zero.
    #[must_use]
    pub fn normalized(self, viewport: ViewportSize) -> Vec2 {
        if viewport.is_degenerate() {
            return Vec2::ZERO;
        }
        let axis = |p: f64, extent: f64| {
            let n = p / extent - 0.5;
            if n.is_finite() { n.clamp(-0.5, 0.5) } else { 0.0 }
        };
        Vec2::new(
            axis(self.position.x, viewport.width),
            axis(self.position.y, viewport.height),
        )
    }
}

/// Smoothing and oscillation state of one shape pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Smoothed wrapper offset, before quantization.
    pub current_offset: Vec2,
    phase: f64,
    frequency: f64,
}

impl MotionState {
    /// Creates a state at rest with the given oscillation parameters.
    #[must_use]
    pub const fn new(phase: f64, frequency: f64) -> Self {
        Self {
            current_offset: Vec2::ZERO,
            phase,
            frequency,
        }
    }

    /// Bob phase in radians.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Bob angular frequency in radians per second.
    #[inline]
    #[must_use]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Unquantized vertical bob of the light square at `time` seconds.
    #[inline]
    #[must_use]
    pub fn bob(&self, time: f64, amplitude: f64) -> f64 {
        libm::sin(time * self.frequency + self.phase) * amplitude
    }
}

/// Solver output for one pair, ready for a presenter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairFrame {
    /// The pair this frame positions.
    pub id: PairId,
    /// Wrapper translation shared by the light and dark squares.
    pub wrapper: Vec2,
    /// Extra vertical offset for the light square only.
    pub bob: f64,
}

/// Ambient drift of a cluster at `time` seconds.
#[must_use]
pub fn ambient_drift(time: f64, cluster_index: u32, config: &MotionConfig) -> Vec2 {
    let angle = time * config.drift_rate + f64::from(cluster_index);
    Vec2::new(
        libm::sin(angle) * config.drift_amplitude.x,
        libm::cos(angle) * config.drift_amplitude.y,
    )
}

/// Target wrapper offset for a cluster: ambient drift plus pointer parallax.
#[must_use]
pub fn target_offset(
    time: f64,
    cluster_index: u32,
    pointer: PointerState,
    viewport: ViewportSize,
    config: &MotionConfig,
) -> Vec2 {
    let n = pointer.normalized(viewport);
    let parallax = Vec2::new(
        n.x * config.parallax_amplitude.x,
        n.y * config.parallax_amplitude.y,
    );
    ambient_drift(time, cluster_index, config) + parallax
}

/// Blend factor for one step covering `dt` seconds.
///
/// `factor` is the blend per [`REFERENCE_FRAME_SECS`]; longer or shorter
/// frames are compounded so the filter's time constant does not depend on
/// the delivery rate. Unknown or non-positive `dt` uses `factor` as is, and
/// `dt` is capped at [`MAX_STEP_SECS`] so a long gap never snaps to the
/// target. The result is always in `(0, 1]` for `factor` in `(0, 1]`.
#[must_use]
pub fn smoothing_alpha(factor: f64, dt: Option<f64>) -> f64 {
    let factor = factor.clamp(f64::MIN_POSITIVE, 1.0);
    match dt {
        Some(dt) if dt.is_finite() && dt > 0.0 => {
            let steps = dt.min(MAX_STEP_SECS) / REFERENCE_FRAME_SECS;
            let keep = libm::pow(1.0 - factor, steps);
            (1.0 - keep).clamp(f64::MIN_POSITIVE, 1.0)
        }
        _ => factor,
    }
}

/// One low-pass step from `current` toward `target`.
#[inline]
#[must_use]
pub fn step_toward(current: Vec2, target: Vec2, alpha: f64) -> Vec2 {
    current.lerp(target, alpha)
}

/// Rounds `value` to the nearest multiple of `step`.
///
/// A non-positive or non-finite step leaves the value unchanged.
#[inline]
#[must_use]
pub fn quantize(value: f64, step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        libm::round(value / step) * step
    } else {
        value
    }
}

/// Computes wrapper offsets and bobs for every pair in a layout.
///
/// The solver keeps one [`MotionState`] per pair slot. States are created
/// lazily the first time a slot is seen, so solving against a larger layout
/// than the solver has observed never fails.
#[derive(Clone, Debug)]
pub struct MotionSolver {
    config: MotionConfig,
    rng: SmallRng,
    states: Vec<MotionState>,
    frames: Vec<PairFrame>,
    last_time: Option<f64>,
}

impl MotionSolver {
    /// Creates a solver whose oscillation parameters derive from `seed`.
    #[must_use]
    pub fn new(config: MotionConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            states: Vec::new(),
            frames: Vec::new(),
            last_time: None,
        }
    }

    /// Returns the solver configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Returns the state for a pair, if it has been created.
    #[must_use]
    pub fn state(&self, id: PairId) -> Option<&MotionState> {
        self.states.get(id.index() as usize)
    }

    /// Number of pair states currently held.
    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Output of the most recent [`solve`](Self::solve).
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[PairFrame] {
        &self.frames
    }

    /// Replaces per-pair state after a layout rebuild.
    pub fn rebuild(&mut self, layout: &Layout, policy: ResizePolicy) {
        let len = layout.pairs().len();
        match policy {
            ResizePolicy::Regenerate => {
                self.states.clear();
                self.ensure_states(len);
            }
            ResizePolicy::Preserve => {
                self.states.truncate(len);
                self.ensure_states(len);
            }
        }
        self.frames.clear();
    }

    /// Drops all per-pair state and forgets the last frame time.
    pub fn reset(&mut self) {
        self.states.clear();
        self.frames.clear();
        self.last_time = None;
    }

    /// Advances every pair to `time` seconds and returns the presented frames.
    ///
    /// The blend factor is derived from the time since the previous call.
    /// Repeating a time (or going backwards) applies a single reference step.
    pub fn solve(&mut self, layout: &Layout, pointer: PointerState, time: f64) -> &[PairFrame] {
        let dt = self.last_time.map(|last| time - last);
        self.last_time = Some(time);
        let alpha = smoothing_alpha(self.config.smoothing, dt);

        self.ensure_states(layout.pairs().len());
        self.frames.clear();

        let viewport = layout.viewport();
        let step = self.config.pixel_step;
        for cluster in layout.clusters() {
            let target = target_offset(time, cluster.id.index(), pointer, viewport, &self.config);
            for pair in layout.cluster_pairs(cluster) {
                let Some(state) = self.states.get_mut(pair.id.index() as usize) else {
                    continue;
                };
                state.current_offset = step_toward(state.current_offset, target, alpha);
                let bob = state.bob(time, self.config.bob_amplitude);
                self.frames.push(PairFrame {
                    id: pair.id,
                    wrapper: Vec2::new(
                        quantize(state.current_offset.x, step),
                        quantize(state.current_offset.y, step),
                    ),
                    bob: quantize(bob, step),
                });
            }
        }

        &self.frames
    }

    fn ensure_states(&mut self, len: usize) {
        while self.states.len() < len {
            let state = self.draw_state();
            self.states.push(state);
        }
    }

    fn draw_state(&mut self) -> MotionState {
        let (lo, hi) = self.config.frequency_band;
        let phase = self.rng.gen_range(0.0..TAU);
        let frequency = if hi > lo { self.rng.gen_range(lo..hi) } else { lo };
        MotionState::new(phase, frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate;

    #[test]
    fn pointer_normalization_is_centered_and_clamped() {
        let vp = ViewportSize::new(1000.0, 500.0);
        assert_eq!(PointerState::new(500.0, 250.0).normalized(vp), Vec2::ZERO);
        assert_eq!(
            PointerState::default().normalized(vp),
            Vec2::new(-0.5, -0.5),
            "no pointer event means origin"
        );
        assert_eq!(
            PointerState::new(5000.0, -100.0).normalized(vp),
            Vec2::new(0.5, -0.5),
            "outside the window clamps"
        );
        assert_eq!(
            PointerState::new(10.0, 10.0).normalized(ViewportSize::new(0.0, 0.0)),
            Vec2::ZERO,
            "degenerate viewport"
        );
    }

    #[test]
    fn clusters_drift_out_of_lockstep() {
        let cfg = MotionConfig::DEFAULT;
        let a = ambient_drift(3.0, 0, &cfg);
        let b = ambient_drift(3.0, 1, &cfg);
        assert!(a != b, "cluster index shifts the drift phase");
        let expected = Vec2::new(libm::sin(1.5) * 12.0, libm::cos(1.5) * 8.0);
        assert!((a - expected).hypot() < 1e-12, "drift formula");
    }

    #[test]
    fn smoothing_is_contractive_without_overshoot() {
        let target = Vec2::new(37.0, -21.0);
        let mut current = Vec2::ZERO;
        let mut dist = (target - current).hypot();
        let alpha = smoothing_alpha(0.03, None);
        let mut steps = 0;
        while dist > 0.5 {
            let next = step_toward(current, target, alpha);
            let next_dist = (target - next).hypot();
            assert!(next_dist < dist, "distance must shrink at step {steps}");
            assert!(
                (target.x - next.x) * (target.x - current.x) >= 0.0
                    && (target.y - next.y) * (target.y - current.y) >= 0.0,
                "never crosses the target"
            );
            current = next;
            dist = next_dist;
            steps += 1;
            assert!(steps < 10_000, "converges");
        }
    }

    #[test]
    fn smoothing_alpha_compounds_with_frame_delta() {
        let one = smoothing_alpha(0.03, Some(REFERENCE_FRAME_SECS));
        assert!(libm::fabs(one - 0.03) < 1e-12, "one reference frame");

        // Two 60 Hz frames should land where one 30 Hz frame does.
        let half = smoothing_alpha(0.03, Some(REFERENCE_FRAME_SECS));
        let two_steps = 1.0 - (1.0 - half) * (1.0 - half);
        let double = smoothing_alpha(0.03, Some(2.0 * REFERENCE_FRAME_SECS));
        assert!(libm::fabs(two_steps - double) < 1e-12, "rate independent");

        assert_eq!(smoothing_alpha(0.03, Some(0.0)), 0.03, "zero dt");
        assert_eq!(smoothing_alpha(0.03, Some(f64::NAN)), 0.03, "NaN dt");
        let long = smoothing_alpha(0.03, Some(1000.0));
        let capped = smoothing_alpha(0.03, Some(MAX_STEP_SECS));
        assert_eq!(long, capped, "long gaps are capped");
        assert!(long < 0.2, "capped blend stays well below a snap ({long})");
    }

    #[test]
    fn long_frame_gap_does_not_snap_to_target() {
        let layout = generate(1440.0, 900.0);
        let mut solver = MotionSolver::new(MotionConfig::DEFAULT, 9);
        let id = layout.cluster_pairs(&layout.clusters()[0])[0].id;
        let _ = solver.solve(&layout, PointerState::default(), 0.0);
        let _ = solver.solve(&layout, PointerState::default(), REFERENCE_FRAME_SECS);
        let before = solver.state(id).unwrap().current_offset;

        // Tab resumes ten seconds later with the pointer in the far corner.
        let pointer = PointerState::new(1440.0, 900.0);
        let t = 10.0 + REFERENCE_FRAME_SECS;
        let _ = solver.solve(&layout, pointer, t);
        let after = solver.state(id).unwrap().current_offset;

        let target = target_offset(t, 0, pointer, layout.viewport(), solver.config());
        let alpha = smoothing_alpha(0.03, Some(MAX_STEP_SECS));
        let moved = (after - before).hypot();
        let allowed = alpha * (target - before).hypot();
        assert!(
            moved <= allowed + 1e-9,
            "moved {moved} px, at most {allowed} px allowed"
        );
        assert!(
            (target - after).hypot() > 1.0,
            "still approaching the target after the gap"
        );
    }

    #[test]
    fn bob_is_periodic() {
        let state = MotionState::new(0.7, 1.3);
        let period = TAU / state.frequency();
        for i in 0..20 {
            let t = f64::from(i) * 0.37;
            let a = state.bob(t, 4.0);
            let b = state.bob(t + period, 4.0);
            assert!(libm::fabs(a - b) < 1e-9, "bob({t}) repeats");
        }
    }

    #[test]
    fn quantize_rounds_to_step() {
        assert_eq!(quantize(2.4, 1.0), 2.0);
        assert_eq!(quantize(2.6, 1.0), 3.0);
        assert_eq!(quantize(-2.6, 1.0), -3.0);
        assert_eq!(quantize(5.0, 2.0), 6.0, "ties round away from zero");
        assert_eq!(quantize(1.25, 0.0), 1.25, "zero step is identity");
    }

    #[test]
    fn frames_are_quantized_and_cover_every_pair() {
        let layout = generate(1440.0, 900.0);
        let mut solver = MotionSolver::new(MotionConfig::DEFAULT, 7);
        let pointer = PointerState::new(1000.0, 300.0);
        let mut t = 0.0;
        for _ in 0..120 {
            t += REFERENCE_FRAME_SECS;
            let _ = solver.solve(&layout, pointer, t);
        }
        let frames = solver.frames();
        assert_eq!(frames.len(), layout.pairs().len(), "one frame per pair");
        for f in frames {
            assert_eq!(f.wrapper.x, libm::round(f.wrapper.x), "whole px x");
            assert_eq!(f.wrapper.y, libm::round(f.wrapper.y), "whole px y");
            assert_eq!(f.bob, libm::round(f.bob), "whole px bob");
            assert!(libm::fabs(f.bob) <= 4.0, "bob within amplitude");
        }
    }

    #[test]
    fn solver_converges_on_a_constant_target() {
        let layout = generate(1440.0, 900.0);
        let mut solver = MotionSolver::new(MotionConfig::DEFAULT, 1);
        let pointer = PointerState::new(1440.0, 900.0);
        let t = 2.0;
        let target = target_offset(t, 0, pointer, layout.viewport(), solver.config());
        let id = layout.cluster_pairs(&layout.clusters()[0])[0].id;

        let mut prev = f64::INFINITY;
        for _ in 0..400 {
            let _ = solver.solve(&layout, pointer, t);
            let dist = (target - solver.state(id).unwrap().current_offset).hypot();
            assert!(dist < prev || dist < 1e-9, "monotone approach");
            prev = dist;
        }
        let frame = solver.frames()[0];
        assert!(
            (frame.wrapper - target).hypot() <= 1.0,
            "presented offset within one pixel step of target"
        );
    }

    #[test]
    fn missing_state_is_created_lazily_at_rest() {
        let layout = generate(375.0, 800.0);
        let mut solver = MotionSolver::new(MotionConfig::DEFAULT, 3);
        assert_eq!(solver.state_count(), 0, "nothing before the first frame");
        let _ = solver.solve(&layout, PointerState::default(), 0.0);
        assert_eq!(solver.state_count(), 16, "one state per pair");
        for s in solver.states.iter() {
            assert!(s.phase() >= 0.0 && s.phase() < TAU, "phase band");
            assert!(
                s.frequency() >= 0.8 && s.frequency() < 1.6,
                "frequency band"
            );
        }
    }

    #[test]
    fn same_seed_same_motion() {
        let layout = generate(1024.0, 768.0);
        let mut a = MotionSolver::new(MotionConfig::DEFAULT, 42);
        let mut b = MotionSolver::new(MotionConfig::DEFAULT, 42);
        let p = PointerState::new(100.0, 700.0);
        for i in 0..30 {
            let t = f64::from(i) / 60.0;
            assert_eq!(a.solve(&layout, p, t), b.solve(&layout, p, t), "frame {i}");
        }
    }

    #[test]
    fn resize_policy_controls_phase_continuity() {
        let before = generate(1440.0, 900.0);
        let after = generate(1600.0, 900.0);

        let mut preserve = MotionSolver::new(MotionConfig::DEFAULT, 9);
        preserve.rebuild(&before, ResizePolicy::Preserve);
        let kept: Vec<_> = preserve.states.clone();
        preserve.rebuild(&after, ResizePolicy::Preserve);
        assert_eq!(preserve.states, kept, "preserve keeps phase and frequency");

        let mut regen = MotionSolver::new(MotionConfig::DEFAULT, 9);
        regen.rebuild(&before, ResizePolicy::Regenerate);
        let old: Vec<_> = regen.states.clone();
        regen.rebuild(&after, ResizePolicy::Regenerate);
        assert_ne!(regen.states, old, "regenerate draws new parameters");
        assert_eq!(regen.state_count(), 16, "one state per new pair");
    }

    #[test]
    fn empty_layout_yields_no_frames() {
        let layout = generate(0.0, 0.0);
        let mut solver = MotionSolver::new(MotionConfig::DEFAULT, 0);
        assert!(
            solver.solve(&layout, PointerState::default(), 1.0).is_empty(),
            "nothing to move"
        );
    }

    #[test]
    fn excursion_covers_all_motion_terms() {
        let ex = MotionConfig::DEFAULT.max_excursion();
        assert_eq!(ex, Vec2::new(12.0 + 15.0 + 1.0, 8.0 + 10.0 + 4.0 + 1.0));
    }
}
