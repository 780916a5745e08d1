// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for backdrop.
//!
//! This crate connects [`backdrop_core`] to the DOM:
//!
//! - [`Backdrop`]: mounts the floating-squares decoration in a container
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomPresenter`]: shape elements and their transforms
//! - [`EventListener`] and [`ResizeWatch`]: subscriptions released on drop
//! - [`MaskBinding`]: notched SVG mask that follows its container's size

#![no_std]

extern crate alloc;

mod backdrop;
mod listener;
mod mask;
mod observer;
mod presenter;
mod raf;

pub use backdrop::Backdrop;
pub use backdrop_core::backend::Presenter;
pub use listener::EventListener;
pub use mask::MaskBinding;
pub use observer::ResizeWatch;
pub use presenter::DomPresenter;
pub use raf::RafLoop;

use backdrop_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
