// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped DOM event subscriptions.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// An `addEventListener` registration that is removed when dropped.
///
/// Unlike a forgotten [`Closure`], the handler is freed together with the
/// guard, so a decoration can be mounted and unmounted repeatedly without
/// leaking listeners.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Option<ListenerClosure>,
}

impl EventListener {
    /// Registers `handler` for `event` on `target`.
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure: Some(closure),
        })
    }

    /// The event type this listener is registered for.
    #[must_use]
    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Returns `true` until [`remove`](Self::remove) is called.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.closure.is_some()
    }

    /// Unregisters the handler. Safe to call more than once.
    pub fn remove(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.remove();
    }
}

impl core::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventListener")
            .field("event", &self.event)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
