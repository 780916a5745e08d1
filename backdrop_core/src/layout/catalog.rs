// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-tuned placement presets for each device class.
//!
//! Offsets are in unscaled logical pixels relative to the cluster anchor and
//! give the top-left corner of each light square. The generator multiplies
//! them by the layout's scale factor.

use super::{AnchorSlot, DepthLayer};
use crate::viewport::DeviceClass;

/// Number of clusters in every non-empty layout.
pub const CLUSTERS: usize = 4;

/// Number of shape pairs in every cluster.
pub const PAIRS_PER_CLUSTER: usize = 4;

/// Placement data for one cluster.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClusterPreset {
    pub(crate) anchor: AnchorSlot,
    /// Anchor position as fractions of the viewport `(x, y)`.
    pub(crate) at: (f64, f64),
    /// Unscaled side length of each square in the cluster.
    pub(crate) base_side: f64,
    pub(crate) offsets: [(f64, f64); PAIRS_PER_CLUSTER],
}

/// Placement data for one device class.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Preset {
    pub(crate) corner_radius: f64,
    /// Scale factor band `(min, max)`.
    pub(crate) scale_band: (f64, f64),
    /// Viewport width at which the unclamped scale factor is 1.
    pub(crate) reference_width: f64,
    pub(crate) clusters: [ClusterPreset; CLUSTERS],
}

/// Depth layer by cluster position. Not derived from geometry.
pub(crate) const DEPTH_LAYERS: [DepthLayer; CLUSTERS] = [
    DepthLayer::Behind,
    DepthLayer::Above,
    DepthLayer::Above,
    DepthLayer::Behind,
];

pub(crate) const WIDE: Preset = Preset {
    corner_radius: 12.0,
    scale_band: (0.9, 1.3),
    reference_width: 1440.0,
    clusters: [
        ClusterPreset {
            anchor: AnchorSlot::TopLeft,
            at: (0.10, 0.20),
            base_side: 56.0,
            offsets: [(0.0, 0.0), (72.0, -28.0), (-36.0, 64.0), (60.0, 88.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::TopRight,
            at: (0.85, 0.25),
            base_side: 44.0,
            offsets: [(0.0, 0.0), (-76.0, 24.0), (40.0, -52.0), (-20.0, 84.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::BottomLeft,
            at: (0.10, 0.75),
            base_side: 48.0,
            offsets: [(0.0, 0.0), (68.0, -44.0), (-28.0, -80.0), (84.0, 36.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::BottomRight,
            at: (0.85, 0.80),
            base_side: 60.0,
            offsets: [(0.0, 0.0), (-64.0, -36.0), (36.0, -92.0), (-88.0, 28.0)],
        },
    ],
};

pub(crate) const COMPACT: Preset = Preset {
    corner_radius: 5.0,
    scale_band: (0.4, 0.55),
    reference_width: 768.0,
    clusters: [
        ClusterPreset {
            anchor: AnchorSlot::TopLeft,
            at: (0.05, 0.15),
            base_side: 40.0,
            offsets: [(0.0, 0.0), (52.0, -20.0), (-12.0, 48.0), (44.0, 60.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::TopRight,
            at: (0.95, 0.15),
            base_side: 36.0,
            offsets: [(-40.0, 0.0), (-88.0, 20.0), (-52.0, -36.0), (-24.0, 56.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::BottomLeft,
            at: (0.05, 0.85),
            base_side: 36.0,
            offsets: [(0.0, -40.0), (48.0, -68.0), (-8.0, -96.0), (60.0, -24.0)],
        },
        ClusterPreset {
            anchor: AnchorSlot::BottomRight,
            at: (0.95, 0.85),
            base_side: 44.0,
            offsets: [(-44.0, -40.0), (-92.0, -60.0), (-36.0, -100.0), (-80.0, -12.0)],
        },
    ],
};

/// Returns the preset for a device class.
pub(crate) const fn preset(class: DeviceClass) -> &'static Preset {
    match class {
        DeviceClass::Compact => &COMPACT,
        DeviceClass::Wide => &WIDE,
    }
}
