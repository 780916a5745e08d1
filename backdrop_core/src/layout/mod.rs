// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic placement of decorative shape clusters.
//!
//! [`generate`] turns a viewport size into a [`Layout`]: four
//! [`ShapeCluster`]s of four [`ShapePair`]s each. Pairs live in one flat
//! arena addressed by [`PairId`]; clusters record which slice of the arena
//! they own. A layout is never edited after creation. When the viewport
//! changes, a new layout is generated and swapped in whole.

mod catalog;
mod id;

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Vec2};

use crate::viewport::{DeviceClass, ViewportSize};

pub use catalog::{CLUSTERS, PAIRS_PER_CLUSTER};
pub use id::{ClusterId, PairId};

/// Unscaled vertical distance from a light square to its shadow.
pub const SHADOW_DEPTH: f64 = 8.0;

/// Named region of the viewport a cluster is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorSlot {
    /// Upper-left corner region.
    TopLeft,
    /// Upper edge, horizontally centered.
    Top,
    /// Upper-right corner region.
    TopRight,
    /// Left edge, vertically centered.
    Left,
    /// Right edge, vertically centered.
    Right,
    /// Lower-left corner region.
    BottomLeft,
    /// Lower edge, horizontally centered.
    Bottom,
    /// Lower-right corner region.
    BottomRight,
    /// Middle of the viewport.
    Center,
}

/// Which side of the central content card a cluster is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepthLayer {
    /// Drawn underneath the content card.
    Behind,
    /// Drawn on top of the content card.
    Above,
}

/// A group of shape pairs anchored to one region of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCluster {
    /// Position in catalog order.
    pub id: ClusterId,
    /// Named anchor region.
    pub anchor: AnchorSlot,
    /// Anchor position in viewport pixels.
    pub anchor_point: Point,
    /// Unscaled side length of the cluster's squares.
    pub base_side: f64,
    /// Corner rounding of the cluster's squares, in pixels.
    pub corner_radius: f64,
    /// Uniform scale applied to sides and offsets.
    pub scale_factor: f64,
    /// Static z-ordering relative to the content card.
    pub depth: DepthLayer,
    /// Slots of this cluster's pairs in the layout's pair arena.
    pub pairs: Range<u32>,
}

/// A light square and the dark shadow square directly below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePair {
    /// Arena slot.
    pub id: PairId,
    /// Owning cluster.
    pub cluster: ClusterId,
    /// Scaled side length of both squares.
    pub side: f64,
    /// Top-left corner of the light square.
    pub light_point: Point,
    /// Top-left corner of the dark square.
    pub dark_point: Point,
}

impl ShapePair {
    /// Returns the light square's box.
    #[must_use]
    pub fn light_rect(&self) -> Rect {
        Rect::from_origin_size(self.light_point, (self.side, self.side))
    }

    /// Returns the shadow square's box.
    #[must_use]
    pub fn dark_rect(&self) -> Rect {
        Rect::from_origin_size(self.dark_point, (self.side, self.side))
    }
}

/// A complete set of clusters and pairs for one viewport size.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    viewport: ViewportSize,
    device_class: DeviceClass,
    scale_factor: f64,
    corner_radius: f64,
    clusters: Vec<ShapeCluster>,
    pairs: Vec<ShapePair>,
}

impl Layout {
    /// Creates a layout with no clusters for the given viewport.
    #[must_use]
    pub fn empty(viewport: ViewportSize) -> Self {
        let device_class = viewport.device_class();
        Self {
            viewport,
            device_class,
            scale_factor: scale_factor(viewport.width),
            corner_radius: corner_radius(device_class),
            clusters: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// The viewport this layout was generated for.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// The device class this layout was generated for.
    #[inline]
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    /// The uniform scale factor.
    #[inline]
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The corner radius shared by every square.
    #[inline]
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Vertical light-to-shadow distance at this layout's scale.
    #[inline]
    #[must_use]
    pub fn shadow_depth(&self) -> f64 {
        shadow_depth(self.scale_factor)
    }

    /// All clusters, in catalog order.
    #[inline]
    #[must_use]
    pub fn clusters(&self) -> &[ShapeCluster] {
        &self.clusters
    }

    /// All pairs, in arena order.
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> &[ShapePair] {
        &self.pairs
    }

    /// Returns `true` if the layout has no shapes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Looks up a pair, returning `None` for ids outside this layout.
    #[must_use]
    pub fn pair(&self, id: PairId) -> Option<&ShapePair> {
        self.pairs.get(id.0 as usize)
    }

    /// Returns the pairs of one cluster.
    #[must_use]
    pub fn cluster_pairs(&self, cluster: &ShapeCluster) -> &[ShapePair] {
        let (start, end) = (cluster.pairs.start as usize, cluster.pairs.end as usize);
        self.pairs.get(start..end).unwrap_or_default()
    }

    /// Returns the union of every light and shadow square, at rest.
    ///
    /// `None` when the layout is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.pairs
            .iter()
            .map(|p| p.light_rect().union(p.dark_rect()))
            .reduce(|a, b| a.union(b))
    }
}

/// Uniform scale factor for a viewport width.
///
/// Compact widths scale against 768 px and are clamped to `0.4..=0.55`; wide
/// widths scale against 1440 px and are clamped to `0.9..=1.3`. Non-finite
/// widths take the bottom of their band.
#[must_use]
pub fn scale_factor(width: f64) -> f64 {
    let preset = catalog::preset(DeviceClass::for_width(width));
    let (min, max) = preset.scale_band;
    let ratio = width / preset.reference_width;
    if ratio.is_finite() {
        ratio.clamp(min, max)
    } else {
        min
    }
}

/// Corner radius for a device class.
#[inline]
#[must_use]
pub fn corner_radius(class: DeviceClass) -> f64 {
    catalog::preset(class).corner_radius
}

/// Vertical light-to-shadow distance for a scale factor.
#[inline]
#[must_use]
pub fn shadow_depth(scale_factor: f64) -> f64 {
    SHADOW_DEPTH * scale_factor
}

/// Generates the layout for a viewport.
///
/// The result depends only on `width` and `height`. Degenerate viewports
/// (zero, negative or non-finite sides) produce an empty layout.
#[must_use]
pub fn generate(width: f64, height: f64) -> Layout {
    let viewport = ViewportSize::new(width, height);
    let mut layout = Layout::empty(viewport);
    if viewport.is_degenerate() {
        return layout;
    }

    let preset = catalog::preset(layout.device_class);
    let scale = layout.scale_factor;
    let depth = shadow_depth(scale);

    layout.clusters.reserve_exact(CLUSTERS);
    layout.pairs.reserve_exact(CLUSTERS * PAIRS_PER_CLUSTER);

    for (c, (cp, &depth_layer)) in preset
        .clusters
        .iter()
        .zip(catalog::DEPTH_LAYERS.iter())
        .enumerate()
    {
        let cluster_id = ClusterId(slot(c));
        let first = slot(layout.pairs.len());
        let anchor_point = Point::new(width * cp.at.0, height * cp.at.1);
        let side = cp.base_side * scale;

        for (k, &(dx, dy)) in cp.offsets.iter().enumerate() {
            let light_point = anchor_point + Vec2::new(dx, dy) * scale;
            let id = PairId(first + slot(k));
            layout.pairs.push(ShapePair {
                id,
                cluster: cluster_id,
                side,
                light_point,
                dark_point: light_point + Vec2::new(0.0, depth),
            });
        }

        layout.clusters.push(ShapeCluster {
            id: cluster_id,
            anchor: cp.anchor,
            anchor_point,
            base_side: cp.base_side,
            corner_radius: preset.corner_radius,
            scale_factor: scale,
            depth: depth_layer,
            pairs: first..slot(layout.pairs.len()),
        });
    }

    layout
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the catalog holds four clusters of four pairs"
)]
const fn slot(n: usize) -> u32 {
    n as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        libm::fabs(a - b) < 1e-9
    }

    #[test]
    fn sixteen_pairs_for_any_positive_viewport() {
        for &(w, h) in &[
            (1.0, 1.0),
            (320.0, 568.0),
            (375.0, 800.0),
            (767.0, 1024.0),
            (768.0, 1024.0),
            (1440.0, 900.0),
            (2560.0, 1440.0),
            (10_000.0, 50.0),
        ] {
            let layout = generate(w, h);
            assert_eq!(layout.clusters().len(), CLUSTERS, "{w}x{h}: clusters");
            assert_eq!(
                layout.pairs().len(),
                CLUSTERS * PAIRS_PER_CLUSTER,
                "{w}x{h}: pairs"
            );
            for cluster in layout.clusters() {
                assert_eq!(
                    layout.cluster_pairs(cluster).len(),
                    PAIRS_PER_CLUSTER,
                    "{w}x{h}: pairs per cluster"
                );
            }
        }
    }

    #[test]
    fn shadow_sits_directly_below_light() {
        for &(w, h) in &[(375.0, 800.0), (1440.0, 900.0), (1920.0, 1080.0)] {
            let layout = generate(w, h);
            let depth = shadow_depth(layout.scale_factor());
            for pair in layout.pairs() {
                assert_eq!(pair.dark_point.x, pair.light_point.x, "shadow x");
                assert!(
                    approx(pair.dark_point.y, pair.light_point.y + depth),
                    "shadow y for {:?}",
                    pair.id
                );
            }
        }
    }

    #[test]
    fn pair_ids_match_arena_slots() {
        let layout = generate(1440.0, 900.0);
        for (slot, pair) in layout.pairs().iter().enumerate() {
            assert_eq!(pair.id.index() as usize, slot, "id is slot");
            assert_eq!(layout.pair(pair.id), Some(pair), "lookup by id");
        }
        assert_eq!(layout.pair(PairId(99)), None, "out-of-range id");
    }

    #[test]
    fn scale_factor_is_clamped_and_monotonic_per_band() {
        let mut prev = 0.0;
        let mut w = 1.0;
        while w < 768.0 {
            let s = scale_factor(w);
            assert!((0.4..=0.55).contains(&s), "compact {w}: {s}");
            assert!(s >= prev, "compact monotonic at {w}");
            prev = s;
            w += 7.0;
        }

        let mut prev = 0.0;
        let mut w = 768.0;
        while w < 4000.0 {
            let s = scale_factor(w);
            assert!((0.9..=1.3).contains(&s), "wide {w}: {s}");
            assert!(s >= prev, "wide monotonic at {w}");
            prev = s;
            w += 13.0;
        }
    }

    #[test]
    fn wide_desktop_scenario() {
        let layout = generate(1440.0, 900.0);
        assert_eq!(layout.device_class(), DeviceClass::Wide);
        assert!(approx(layout.scale_factor(), 1.0), "scale at 1440");
        assert!(approx(layout.corner_radius(), 12.0), "wide radius");

        let expected = [(0.10, 0.20), (0.85, 0.25), (0.10, 0.75), (0.85, 0.80)];
        for (cluster, &(fx, fy)) in layout.clusters().iter().zip(expected.iter()) {
            assert!(approx(cluster.anchor_point.x, 1440.0 * fx), "anchor x");
            assert!(approx(cluster.anchor_point.y, 900.0 * fy), "anchor y");
            assert!(approx(cluster.corner_radius, 12.0), "cluster radius");
        }
    }

    #[test]
    fn compact_phone_scenario() {
        let layout = generate(375.0, 800.0);
        assert_eq!(layout.device_class(), DeviceClass::Compact);
        assert!(
            libm::fabs(layout.scale_factor() - 0.49) < 0.005,
            "scale at 375 was {}",
            layout.scale_factor()
        );
        assert!(approx(layout.corner_radius(), 5.0), "compact radius");

        let expected = [(0.05, 0.15), (0.95, 0.15), (0.05, 0.85), (0.95, 0.85)];
        for (cluster, &(fx, fy)) in layout.clusters().iter().zip(expected.iter()) {
            assert!(approx(cluster.anchor_point.x, 375.0 * fx), "anchor x");
            assert!(approx(cluster.anchor_point.y, 800.0 * fy), "anchor y");
        }
        let first = &layout.pairs()[0];
        assert!(
            approx(first.side, 40.0 * layout.scale_factor()),
            "side is base times scale"
        );
    }

    #[test]
    fn depth_layers_follow_cluster_identity() {
        let wide = generate(1440.0, 900.0);
        let compact = generate(375.0, 800.0);
        for (a, b) in wide.clusters().iter().zip(compact.clusters()) {
            assert_eq!(a.depth, b.depth, "depth depends only on cluster id");
        }
        assert_eq!(wide.clusters()[0].depth, DepthLayer::Behind);
        assert_eq!(wide.clusters()[1].depth, DepthLayer::Above);
    }

    #[test]
    fn degenerate_viewports_are_empty() {
        for &(w, h) in &[
            (0.0, 0.0),
            (0.0, 900.0),
            (1440.0, 0.0),
            (-5.0, 100.0),
            (f64::NAN, 100.0),
            (100.0, f64::INFINITY),
        ] {
            let layout = generate(w, h);
            assert!(layout.is_empty(), "{w}x{h} should be empty");
            assert!(layout.clusters().is_empty(), "{w}x{h} has no clusters");
            assert_eq!(layout.bounds(), None, "{w}x{h} has no bounds");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(1280.0, 720.0), generate(1280.0, 720.0));
    }

    #[test]
    fn bounds_cover_every_shadow() {
        let layout = generate(1440.0, 900.0);
        let bounds = layout.bounds().unwrap();
        for pair in layout.pairs() {
            let dark = pair.dark_rect();
            assert!(
                bounds.x0 <= dark.x0 && bounds.y1 >= dark.y1,
                "{:?} shadow outside bounds",
                pair.id
            );
        }
    }
}
