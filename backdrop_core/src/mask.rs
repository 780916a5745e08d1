// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notched rounded-rectangle outlines for image masks.
//!
//! Testimonial cards overlay a round action button on the bottom-right
//! corner of their image. The image is clipped by an outline that carves a
//! square notch out of that corner so the button sits in a gap:
//!
//! ```text
//!   ╭──────────────╮
//!   │              │
//!   │              │
//!   │         ┌────╯   ← notch: button_size + gap on each side
//!   ╰─────────┘
//! ```
//!
//! Convex corners are [`kurbo::Arc`] quarter circles. When the box is too
//! small to keep both the notch and the neighbouring corner arcs, the
//! outline falls back to the plain [`RoundedRect`].

use alloc::string::String;
use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt::Write as _;

use kurbo::{Arc, BezPath, PathEl, Point, Rect, RoundedRect, Shape as _, Size};

/// Flattening tolerance for corner arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// SVG coordinates are rounded to this many steps per pixel.
const SVG_PRECISION: f64 = 1000.0;

/// Sizing for the notched outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskConfig {
    /// Radius of the outline's convex corners.
    pub corner_radius: f64,
    /// Side of the overlaid button.
    pub button_size: f64,
    /// Clearance between the button and the image edge.
    pub gap: f64,
}

impl MaskConfig {
    /// Defaults used by the testimonial cards.
    pub const DEFAULT: Self = Self {
        corner_radius: 24.0,
        button_size: 64.0,
        gap: 8.0,
    };

    /// Side length of the square notch.
    #[inline]
    #[must_use]
    pub fn notch_size(&self) -> f64 {
        self.button_size + self.gap
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An outline computed for one container size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskGeometry {
    size: Size,
    outline: BezPath,
    notch: Option<Rect>,
}

impl MaskGeometry {
    /// Container size the outline was computed for.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The closed outline.
    #[inline]
    #[must_use]
    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    /// The removed corner, or `None` for the plain fallback.
    #[inline]
    #[must_use]
    pub fn notch(&self) -> Option<Rect> {
        self.notch
    }

    /// Returns `true` for zero-sized containers, which get no outline.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outline.elements().is_empty()
    }

    /// SVG path data for the outline.
    #[must_use]
    pub fn to_svg(&self) -> String {
        svg_path_data(&self.outline)
    }
}

/// Computes the notched outline for a container.
///
/// Zero, negative or non-finite sizes produce an empty outline.
#[must_use]
pub fn compute_path(width: f64, height: f64, config: &MaskConfig) -> MaskGeometry {
    let size = Size::new(width, height);
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return MaskGeometry {
            size,
            ..MaskGeometry::default()
        };
    }

    let r = clamp_radius(config.corner_radius, width, height);
    let n = config.notch_size();
    let fits = n.is_finite() && n > 0.0 && width - n >= r && height - n >= r;
    if !fits {
        return MaskGeometry {
            size,
            outline: rounded_rect_path(width, height, config.corner_radius),
            notch: None,
        };
    }

    // Same start point and winding as `RoundedRect`.
    let (w, h) = (width, height);
    let mut path = BezPath::new();
    path.move_to((0.0, r));
    path.extend(corner_arc((r, r), r, PI));
    path.line_to((w - r, 0.0));
    path.extend(corner_arc((w - r, r), r, PI + FRAC_PI_2));
    path.line_to((w, h - n));
    path.line_to((w - n, h - n));
    path.line_to((w - n, h));
    path.line_to((r, h));
    path.extend(corner_arc((r, h - r), r, FRAC_PI_2));
    path.close_path();

    MaskGeometry {
        size,
        outline: path,
        notch: Some(Rect::new(w - n, h - n, w, h)),
    }
}

/// Plain rounded rectangle with its origin at `(0, 0)`.
///
/// The radius is clamped to half the shorter side.
#[must_use]
pub fn rounded_rect_path(width: f64, height: f64, radius: f64) -> BezPath {
    let r = clamp_radius(radius, width, height);
    RoundedRect::new(0.0, 0.0, width, height, r).to_path(ARC_TOLERANCE)
}

/// Writes a path as SVG path data (`M x,y L x,y C … Z`).
///
/// Coordinates are rounded to a thousandth of a pixel. `BezPath::to_svg`
/// is only available with `std`.
#[must_use]
pub fn svg_path_data(path: &BezPath) -> String {
    let mut out = String::new();
    for el in path.elements() {
        let _ = match *el {
            PathEl::MoveTo(p) => write!(out, "M{}", SvgPoint(p)),
            PathEl::LineTo(p) => write!(out, "L{}", SvgPoint(p)),
            PathEl::QuadTo(a, p) => write!(out, "Q{} {}", SvgPoint(a), SvgPoint(p)),
            PathEl::CurveTo(a, b, p) => {
                write!(out, "C{} {} {}", SvgPoint(a), SvgPoint(b), SvgPoint(p))
            }
            PathEl::ClosePath => out.write_str("Z"),
        };
    }
    out
}

struct SvgPoint(Point);

impl core::fmt::Display for SvgPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", svg_coord(self.0.x), svg_coord(self.0.y))
    }
}

fn svg_coord(v: f64) -> f64 {
    // Adding zero folds `-0` into `0`.
    libm::round(v * SVG_PRECISION) / SVG_PRECISION + 0.0
}

fn clamp_radius(radius: f64, width: f64, height: f64) -> f64 {
    let max = 0.5 * width.min(height);
    if radius.is_finite() {
        radius.clamp(0.0, max.max(0.0))
    } else {
        0.0
    }
}

/// Clockwise quarter circle around `center`, starting at `start_angle`.
fn corner_arc(center: (f64, f64), r: f64, start_angle: f64) -> impl Iterator<Item = PathEl> {
    Arc::new(center, (r, r), start_angle, FRAC_PI_2, 0.0).append_iter(ARC_TOLERANCE)
}

/// Recomputes a mask outline only when the observed box changes size.
#[derive(Clone, Debug)]
pub struct MaskSizer {
    config: MaskConfig,
    last: Option<Size>,
    geometry: MaskGeometry,
    svg: String,
}

impl MaskSizer {
    /// Creates a sizer that has not observed any box yet.
    #[must_use]
    pub fn new(config: MaskConfig) -> Self {
        Self {
            config,
            last: None,
            geometry: MaskGeometry::default(),
            svg: String::new(),
        }
    }

    /// Feeds a measured box size.
    ///
    /// Returns the new SVG path data if the size differs from the previous
    /// observation, or `None` if nothing changed.
    pub fn observe(&mut self, width: f64, height: f64) -> Option<&str> {
        let size = Size::new(width, height);
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        self.geometry = compute_path(width, height, &self.config);
        self.svg = self.geometry.to_svg();
        Some(&self.svg)
    }

    /// The most recent outline.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &MaskGeometry {
        &self.geometry
    }

    /// SVG path data for the most recent outline.
    #[inline]
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testimonial_card_gets_bottom_right_notch() {
        let g = compute_path(396.0, 320.0, &MaskConfig::DEFAULT);
        assert_eq!(
            g.notch(),
            Some(Rect::new(324.0, 248.0, 396.0, 320.0)),
            "72px notch"
        );
        let svg = g.to_svg();
        assert!(svg.starts_with("M0,24C"), "starts on the left edge: {svg}");
        assert!(svg.contains(" 24,0L372,0C"), "top edge between arcs: {svg}");
        assert!(
            svg.contains(" 396,24L396,248L324,248L324,320L24,320C"),
            "notch edges of 72px: {svg}"
        );
        assert!(svg.ends_with(" 0,296Z"), "closed after bottom-left arc: {svg}");
    }

    #[test]
    fn tiny_card_falls_back_to_plain_rounded_rect() {
        let g = compute_path(60.0, 60.0, &MaskConfig::DEFAULT);
        assert_eq!(g.notch(), None, "no room for the notch");
        assert_eq!(
            g.outline(),
            &rounded_rect_path(60.0, 60.0, 24.0),
            "exactly the fallback"
        );
        assert_eq!(
            g.to_svg(),
            svg_path_data(&rounded_rect_path(60.0, 60.0, 24.0)),
            "same path data"
        );
    }

    #[test]
    fn notch_needs_room_for_neighbouring_arcs() {
        let cfg = MaskConfig::DEFAULT;
        // 72 + 24 = 96 is the smallest side that keeps both arcs.
        assert!(compute_path(96.0, 96.0, &cfg).notch().is_some(), "exact fit");
        assert!(compute_path(95.0, 200.0, &cfg).notch().is_none(), "too narrow");
        assert!(compute_path(200.0, 95.0, &cfg).notch().is_none(), "too short");
    }

    #[test]
    fn notch_and_outline_stay_inside_the_box() {
        let cfg = MaskConfig::DEFAULT;
        let mut w = 10.0;
        while w < 700.0 {
            let mut h = 10.0;
            while h < 700.0 {
                let g = compute_path(w, h, &cfg);
                if let Some(n) = g.notch() {
                    assert!(
                        n.x0 >= 0.0 && n.y0 >= 0.0 && n.x1 <= w && n.y1 <= h,
                        "{w}x{h}: notch {n:?} escapes"
                    );
                }
                let inside = Rect::new(0.0, 0.0, w, h).inflate(1e-9, 1e-9);
                for el in g.outline().elements() {
                    if let Some(p) = el.end_point() {
                        assert!(inside.contains(p), "{w}x{h}: vertex {p:?} escapes");
                    }
                }
                h += 37.0;
            }
            w += 41.0;
        }
    }

    fn curves(path: &BezPath) -> alloc::vec::Vec<(Point, Point, Point)> {
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::CurveTo(a, b, p) => Some((a, b, p)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn arcs_bulge_toward_their_corner() {
        let path = rounded_rect_path(100.0, 80.0, 10.0);
        let curves = curves(&path);
        assert_eq!(curves.len(), 4, "four rounded corners");
        // Top-right arc: leaves the top edge horizontally, enters the right
        // edge vertically.
        let (a, b, p) = curves[1];
        assert!(libm::fabs(a.y) < 1e-9, "first control point on the top edge");
        assert!(libm::fabs(b.x - 100.0) < 1e-9, "second control point on the right edge");
        assert!(p.distance(Point::new(100.0, 10.0)) < 1e-9, "arc ends on the right edge");
        assert!(a.x > 90.0 && b.y < 10.0, "controls pulled toward the corner");
    }

    #[test]
    fn fallback_matches_kurbo_rounded_rect() {
        let ours = rounded_rect_path(300.0, 200.0, 24.0);
        let kurbo_path = RoundedRect::new(0.0, 0.0, 300.0, 200.0, 24.0).to_path(ARC_TOLERANCE);
        assert_eq!(ours, kurbo_path, "plain outline is kurbo's rounded rect");
    }

    #[test]
    fn notched_outline_keeps_three_rounded_corners() {
        let g = compute_path(396.0, 320.0, &MaskConfig::DEFAULT);
        let arcs = curves(g.outline());
        assert_eq!(arcs.len(), 3, "notch corner is square");
        let fallback = rounded_rect_path(396.0, 320.0, 24.0);
        assert_eq!(arcs[0], curves(&fallback)[0], "top-left arc shared");
        assert_eq!(arcs[1], curves(&fallback)[1], "top-right arc shared");
        assert_eq!(arcs[2], curves(&fallback)[3], "bottom-left arc shared");
    }

    #[test]
    fn empty_boxes_have_no_outline() {
        for &(w, h) in &[(0.0, 0.0), (0.0, 300.0), (-1.0, 50.0), (f64::NAN, 10.0)] {
            let g = compute_path(w, h, &MaskConfig::DEFAULT);
            assert!(g.is_empty(), "{w}x{h} has no outline");
            assert_eq!(g.to_svg(), "", "{w}x{h} has no path data");
        }
    }

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let svg = svg_path_data(&rounded_rect_path(20.0, 40.0, 24.0));
        assert!(svg.starts_with("M0,10C"), "radius 10: {svg}");
        assert!(svg.contains(" 10,0L10,0C"), "top edge collapses: {svg}");
    }

    #[test]
    fn sizer_recomputes_only_on_change() {
        let mut sizer = MaskSizer::new(MaskConfig::DEFAULT);
        let first = sizer.observe(396.0, 320.0).map(alloc::string::ToString::to_string);
        assert!(first.is_some(), "first observation computes");
        assert!(sizer.observe(396.0, 320.0).is_none(), "same size is skipped");
        assert!(sizer.geometry().notch().is_some(), "geometry retained");

        let shrunk = sizer.observe(60.0, 60.0);
        assert!(shrunk.is_some(), "new size recomputes");
        assert!(sizer.geometry().notch().is_none(), "fallback after shrink");
        assert_ne!(first.as_deref(), Some(sizer.svg()), "path changed");
    }
}
