// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! A backend crate supplies the platform half of the render bridge:
//!
//! - **Tick source**: Calls [`Bridge::frame`] once per display frame (e.g.
//!   from `requestAnimationFrame`). Not abstracted by a trait; setup and
//!   cancellation differ per platform.
//!
//! - **Event plumbing**: Forwards pointer moves and resize notifications to
//!   [`Bridge::pointer_moved`] and [`Bridge::resized`], and removes its
//!   subscriptions on teardown.
//!
//! - **Presenter**: Implements [`Presenter`] to create and position the
//!   native shape elements.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tick: FrameTick) {
//!     // Rebuilds the layout first if a debounced resize is due, then
//!     // solves and calls presenter.apply().
//!     if !bridge.frame(tick) {
//!         raf.stop();
//!     }
//! }
//! ```
//!
//! [`Bridge::frame`]: crate::bridge::Bridge::frame
//! [`Bridge::pointer_moved`]: crate::bridge::Bridge::pointer_moved
//! [`Bridge::resized`]: crate::bridge::Bridge::resized

use crate::layout::Layout;
use crate::motion::PairFrame;

/// Applies layouts and per-frame motion to a platform-native element tree.
///
/// DOM-based presenters and test doubles implement this trait.
pub trait Presenter {
    /// Discards existing shape elements and creates one per pair in `layout`.
    ///
    /// Called whenever a new layout is swapped in, before any
    /// [`apply`](Self::apply) that references it.
    fn rebuild(&mut self, layout: &Layout);

    /// Positions shapes for one frame.
    ///
    /// `frames` holds one entry per pair of `layout`. The wrapper offset
    /// moves both squares of a pair; the bob moves only the light square.
    fn apply(&mut self, layout: &Layout, frames: &[PairFrame]);

    /// Removes every element this presenter created. Must be idempotent.
    fn clear(&mut self);
}
