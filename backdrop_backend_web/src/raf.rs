// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` tick source.
//!
//! [`RafLoop`] calls a frame callback once per display frame. Each callback
//! receives a [`DOMHighResTimeStamp`][mdn] in milliseconds, converted to
//! microsecond [`HostTime`] ticks. At most one animation-frame request is
//! outstanding at any time.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use backdrop_core::time::{FrameTick, HostTime};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Global bindings skip fetching the Window/Performance objects every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A `requestAnimationFrame` loop.
///
/// The callback returns `true` to keep running. Returning `false`, calling
/// [`stop`](Self::stop), or dropping the loop cancels the pending request.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// Registered with `requestAnimationFrame`; set once in `start()`.
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut(FrameTick) -> bool>>,
    frame_counter: Cell<u64>,
    running: Cell<bool>,
    /// Handle of the outstanding request, if any.
    raf_id: Cell<Option<i32>>,
}

impl RafLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new(callback: impl FnMut(FrameTick) -> bool + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                running: Cell::new(false),
                raf_id: Cell::new(None),
            }),
        }
    }

    /// Starts the loop. No-op if already running.
    ///
    /// Frame indices restart at zero.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);
        self.inner.frame_counter.set(0);

        if self.inner.closure.borrow().is_none() {
            // Weak, so the closure stored inside `inner` does not keep
            // `inner` alive after the loop is dropped.
            let weak = Rc::downgrade(&self.inner);
            let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_frame(timestamp_ms);
                }
            }) as Box<dyn FnMut(f64)>);
            *self.inner.closure.borrow_mut() = Some(closure);
        }

        self.inner.request();
    }

    /// Stops the loop and cancels the pending request.
    ///
    /// Can be restarted with [`start`](Self::start).
    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.raf_id.take() {
            cancel_animation_frame(id);
        }
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of frames delivered since the last [`start`](Self::start).
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.frame_counter.get()
    }
}

impl RafInner {
    fn on_frame(&self, timestamp_ms: f64) {
        self.raf_id.set(None);
        if !self.running.get() {
            return;
        }

        let frame_index = self.frame_counter.get();
        self.frame_counter.set(frame_index + 1);
        let tick = FrameTick {
            now: HostTime::from_millis_f64(timestamp_ms),
            frame_index,
        };

        // Scoped so the callback borrow never overlaps `closure`.
        let keep_going = self.callback.borrow_mut()(tick);
        if !keep_going {
            self.running.set(false);
            return;
        }
        if self.running.get() {
            self.request();
        }
    }

    fn request(&self) {
        if self.raf_id.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.raf_id.set(Some(id));
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Free the JS closure.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .field("pending", &self.inner.raf_id.get().is_some())
            .finish_non_exhaustive()
    }
}
