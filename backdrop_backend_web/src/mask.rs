// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps an SVG mask path in sync with its container's size.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use backdrop_core::mask::{MaskConfig, MaskSizer};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::observer::{ResizeWatch, measure};

/// Writes a notched outline into an SVG `<path>` whenever a container
/// changes size.
///
/// The binding stops observing on [`detach`](Self::detach) or drop; the last
/// written path stays in place.
pub struct MaskBinding {
    sizer: Rc<RefCell<MaskSizer>>,
    watch: Option<ResizeWatch>,
}

impl MaskBinding {
    /// Measures `container` now, writes the outline into the `d` attribute
    /// of `path`, and keeps it updated.
    pub fn attach(container: &Element, path: &Element, config: MaskConfig) -> Result<Self, JsValue> {
        let sizer = Rc::new(RefCell::new(MaskSizer::new(config)));

        let (width, height) = measure(container);
        sync(&sizer, path, width, height)?;

        let watch_sizer = Rc::clone(&sizer);
        let watch_path = path.clone();
        let watch = ResizeWatch::new(container, move |width, height| {
            let _ = sync(&watch_sizer, &watch_path, width, height);
        })?;

        Ok(Self {
            sizer,
            watch: Some(watch),
        })
    }

    /// The path data last written.
    #[must_use]
    pub fn path_data(&self) -> String {
        String::from(self.sizer.borrow().svg())
    }

    /// Stops following the container. Safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(mut watch) = self.watch.take() {
            watch.disconnect();
        }
    }
}

impl core::fmt::Debug for MaskBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MaskBinding")
            .field("attached", &self.watch.is_some())
            .finish_non_exhaustive()
    }
}

fn sync(sizer: &RefCell<MaskSizer>, path: &Element, width: f64, height: f64) -> Result<(), JsValue> {
    let Ok(mut sizer) = sizer.try_borrow_mut() else {
        return Ok(());
    };
    if let Some(d) = sizer.observe(width, height) {
        path.set_attribute("d", d)?;
    }
    Ok(())
}
