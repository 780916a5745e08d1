// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Turns a [`Layout`] into absolutely positioned `<div>` squares and applies
//! per-frame [`PairFrame`] offsets as CSS transforms.
//!
//! ```text
//!   container
//!   ├── div.backdrop-layer[data-depth=behind]   z-index 0
//!   │   └── div.backdrop-pair                   wrapper, translate3d(drift)
//!   │       ├── div.backdrop-dark               shadow square
//!   │       └── div.backdrop-light              translate3d(0, bob, 0)
//!   └── div.backdrop-layer[data-depth=above]    z-index 2
//! ```
//!
//! The page's content card is expected at z-index 1, between the layers.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use backdrop_core::backend::Presenter;
use backdrop_core::layout::{DepthLayer, Layout, ShapeCluster, ShapePair};
use backdrop_core::motion::PairFrame;
use kurbo::Vec2;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement};

/// Elements of one shape pair.
struct PairElements {
    wrapper: HtmlElement,
    light: HtmlElement,
}

/// Presents a [`Layout`] as live DOM elements inside a container.
pub struct DomPresenter {
    container: HtmlElement,
    behind: Option<HtmlElement>,
    above: Option<HtmlElement>,
    /// Indexed by `PairId`.
    pairs: Vec<PairElements>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("container", &"HtmlElement")
            .field("layers", &self.behind.is_some())
            .field("pairs_len", &self.pairs.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter that manages child elements of `container`.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            behind: None,
            above: None,
            pairs: Vec::new(),
        }
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Number of pairs currently in the DOM.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the wrapper element of the pair at `idx`, if present.
    #[must_use]
    pub fn wrapper(&self, idx: u32) -> Option<&HtmlElement> {
        self.pairs.get(idx as usize).map(|p| &p.wrapper)
    }

    /// Creates the two depth layers if they are missing.
    fn ensure_layers(&mut self, doc: &Document) {
        if self.behind.is_none() {
            self.behind = create_layer(doc, &self.container, DepthLayer::Behind);
        }
        if self.above.is_none() {
            self.above = create_layer(doc, &self.container, DepthLayer::Above);
        }
    }

    fn layer(&self, depth: DepthLayer) -> Option<&HtmlElement> {
        match depth {
            DepthLayer::Behind => self.behind.as_ref(),
            DepthLayer::Above => self.above.as_ref(),
        }
    }

    fn remove_pairs(&mut self) {
        for pair in self.pairs.drain(..) {
            pair.wrapper.remove();
        }
    }
}

impl Presenter for DomPresenter {
    fn rebuild(&mut self, layout: &Layout) {
        self.remove_pairs();
        let Some(doc) = self.container.owner_document() else {
            return;
        };
        self.ensure_layers(&doc);

        let shadow = layout.shadow_depth();
        for cluster in layout.clusters() {
            let Some(layer) = self.layer(cluster.depth).cloned() else {
                continue;
            };
            for pair in layout.cluster_pairs(cluster) {
                if let Some(elements) = create_pair(&doc, cluster, pair, shadow) {
                    let _ = layer.append_child(&elements.wrapper);
                    self.pairs.push(elements);
                }
            }
        }
    }

    fn apply(&mut self, layout: &Layout, frames: &[PairFrame]) {
        // Elements from an older layout are never positioned with new frames.
        if self.pairs.len() != layout.pairs().len() {
            return;
        }
        for frame in frames {
            if let Some(pair) = self.pairs.get(frame.id.index() as usize) {
                let _ = pair
                    .wrapper
                    .style()
                    .set_property("transform", &translate_css(frame.wrapper));
                let _ = pair
                    .light
                    .style()
                    .set_property("transform", &translate_css(Vec2::new(0.0, frame.bob)));
            }
        }
    }

    fn clear(&mut self) {
        self.remove_pairs();
        if let Some(layer) = self.behind.take() {
            layer.remove();
        }
        if let Some(layer) = self.above.take() {
            layer.remove();
        }
    }
}

fn create_div(doc: &Document, class: &str) -> Option<HtmlElement> {
    let el: HtmlElement = doc.create_element("div").ok()?.unchecked_into();
    el.set_class_name(class);
    Some(el)
}

fn create_layer(doc: &Document, container: &HtmlElement, depth: DepthLayer) -> Option<HtmlElement> {
    let el = create_div(doc, "backdrop-layer")?;
    let _ = el.set_attribute("data-depth", depth_name(depth));
    let _ = el.set_attribute("aria-hidden", "true");
    let s = el.style();
    let _ = s.set_property("position", "absolute");
    let _ = s.set_property("inset", "0");
    let _ = s.set_property("pointer-events", "none");
    let _ = s.set_property("z-index", layer_z_index(depth));
    let _ = container.append_child(&el);
    Some(el)
}

fn create_pair(
    doc: &Document,
    cluster: &ShapeCluster,
    pair: &ShapePair,
    shadow: f64,
) -> Option<PairElements> {
    let wrapper = create_div(doc, "backdrop-pair")?;
    let dark = create_div(doc, "backdrop-dark")?;
    let light = create_div(doc, "backdrop-light")?;

    let s = wrapper.style();
    let _ = s.set_property("position", "absolute");
    let _ = s.set_property("left", &px(pair.light_point.x));
    let _ = s.set_property("top", &px(pair.light_point.y));
    let _ = s.set_property("width", &px(pair.side));
    let _ = s.set_property("height", &px(pair.side + shadow));
    let _ = s.set_property("will-change", "transform");

    let offset = pair.dark_point - pair.light_point;
    style_square(&dark, pair.side, cluster.corner_radius, offset);
    style_square(&light, pair.side, cluster.corner_radius, Vec2::ZERO);

    // Light after dark so it paints on top of its shadow.
    let _ = wrapper.append_child(&dark);
    let _ = wrapper.append_child(&light);
    Some(PairElements { wrapper, light })
}

fn style_square(el: &HtmlElement, side: f64, radius: f64, at: Vec2) {
    let s = el.style();
    let _ = s.set_property("position", "absolute");
    let _ = s.set_property("left", &px(at.x));
    let _ = s.set_property("top", &px(at.y));
    let _ = s.set_property("width", &px(side));
    let _ = s.set_property("height", &px(side));
    let _ = s.set_property("border-radius", &px(radius));
}

fn depth_name(depth: DepthLayer) -> &'static str {
    match depth {
        DepthLayer::Behind => "behind",
        DepthLayer::Above => "above",
    }
}

fn layer_z_index(depth: DepthLayer) -> &'static str {
    match depth {
        DepthLayer::Behind => "0",
        DepthLayer::Above => "2",
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

/// CSS `translate3d()` for a pixel offset.
pub(crate) fn translate_css(offset: Vec2) -> String {
    format!("translate3d({}px, {}px, 0)", offset.x, offset.y)
}
