// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ResizeObserver` subscription with a measured-size callback.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, ResizeObserver};

type ObserverClosure = Closure<dyn FnMut(JsValue)>;

/// Watches one element's box and reports its size on every change.
///
/// The observer is disconnected when the watch is dropped.
pub struct ResizeWatch {
    observer: Option<ResizeObserver>,
    _closure: ObserverClosure,
}

impl ResizeWatch {
    /// Starts observing `target`. `handler` receives the border-box width
    /// and height in CSS pixels.
    ///
    /// Browsers deliver one notification right after observation starts.
    pub fn new(
        target: &Element,
        mut handler: impl FnMut(f64, f64) + 'static,
    ) -> Result<Self, JsValue> {
        let measured = target.clone();
        // Entries are ignored; measuring the element directly also covers
        // browsers without `borderBoxSize`.
        let closure = Closure::wrap(Box::new(move |_entries: JsValue| {
            let (width, height) = measure(&measured);
            handler(width, height);
        }) as Box<dyn FnMut(JsValue)>);
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self {
            observer: Some(observer),
            _closure: closure,
        })
    }

    /// Returns `true` until [`disconnect`](Self::disconnect) is called.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Stops observing. Safe to call more than once.
    pub fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl core::fmt::Debug for ResizeWatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeWatch")
            .field("observing", &self.is_observing())
            .finish_non_exhaustive()
    }
}

/// Border-box size of `el` in CSS pixels.
pub(crate) fn measure(el: &Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.width(), rect.height())
}
