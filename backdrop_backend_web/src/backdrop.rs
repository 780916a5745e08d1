// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounted decoration handle.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use backdrop_core::bridge::{Bridge, BridgeConfig};
use backdrop_core::viewport::ViewportSize;
use kurbo::Rect;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, MouseEvent};

use crate::listener::EventListener;
use crate::observer::{ResizeWatch, measure};
use crate::presenter::DomPresenter;
use crate::raf::RafLoop;

type SharedBridge = Rc<RefCell<Bridge<DomPresenter>>>;

/// A floating-squares decoration mounted in a container element.
///
/// Mounting wires the frame loop, a window `pointermove` listener, a window
/// `resize` listener and a `ResizeObserver` on the container. Everything is
/// released by [`unmount`](Self::unmount), which also runs on drop.
pub struct Backdrop {
    bridge: SharedBridge,
    raf: Option<RafLoop>,
    listeners: Vec<EventListener>,
    watch: Option<ResizeWatch>,
}

impl Backdrop {
    /// Mounts a decoration with [`BridgeConfig::DEFAULT`].
    pub fn mount(container: HtmlElement) -> Result<Self, JsValue> {
        Self::mount_with(container, BridgeConfig::DEFAULT)
    }

    /// Mounts a decoration with a custom configuration.
    ///
    /// The container should be a full-bleed, positioned element; its box is
    /// the viewport the layout is generated for.
    pub fn mount_with(container: HtmlElement, config: BridgeConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let bridge: SharedBridge = Rc::new(RefCell::new(Bridge::new(
            config,
            DomPresenter::new(container.clone()),
        )));

        // No shape reaches the DOM until every subscription is in place.
        // The bridge ignores events delivered before it is mounted.
        let mut listeners = Vec::with_capacity(2);

        let pointer_bridge = Rc::clone(&bridge);
        listeners.push(EventListener::new(&window, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut bridge) = pointer_bridge.try_borrow_mut() {
                bridge.pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        })?);

        let resize_bridge = Rc::clone(&bridge);
        let resize_target = container.clone();
        listeners.push(EventListener::new(&window, "resize", move |_event| {
            if let Ok(mut bridge) = resize_bridge.try_borrow_mut() {
                bridge.resized(viewport_of(&resize_target), crate::now());
            }
        })?);

        let watch_bridge = Rc::clone(&bridge);
        let watch = ResizeWatch::new(&container, move |width, height| {
            if let Ok(mut bridge) = watch_bridge.try_borrow_mut() {
                bridge.resized(ViewportSize::new(width, height), crate::now());
            }
        })?;

        bridge.borrow_mut().mount(viewport_of(&container));

        let frame_bridge = Rc::clone(&bridge);
        let raf = RafLoop::new(move |tick| match frame_bridge.try_borrow_mut() {
            Ok(mut bridge) => bridge.frame(tick),
            // Skip a frame rather than stop if an event handler holds the bridge.
            Err(_) => true,
        });
        raf.start();

        Ok(Self {
            bridge,
            raf: Some(raf),
            listeners,
            watch: Some(watch),
        })
    }

    /// Returns `true` until [`unmount`](Self::unmount) is called.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.bridge.borrow().is_mounted()
    }

    /// Area the decoration may paint into, including motion headroom.
    #[must_use]
    pub fn decoration_bounds(&self) -> Option<Rect> {
        self.bridge.borrow().decoration_bounds()
    }

    /// Stops the frame loop, removes every subscription and every shape.
    ///
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        // Handlers hold the bridge only within their own call.
        self.bridge.borrow_mut().teardown();
        if let Some(raf) = self.raf.take() {
            raf.stop();
        }
        for mut listener in self.listeners.drain(..) {
            listener.remove();
        }
        if let Some(mut watch) = self.watch.take() {
            watch.disconnect();
        }
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl core::fmt::Debug for Backdrop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Backdrop")
            .field("raf", &self.raf)
            .field("listeners", &self.listeners)
            .field("watch", &self.watch)
            .finish_non_exhaustive()
    }
}

fn viewport_of(container: &HtmlElement) -> ViewportSize {
    let (width, height) = measure(container);
    ViewportSize::new(width, height)
}
