// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce keyed on host time.
//!
//! Resize notifications arrive in bursts while a window is dragged. A
//! [`Debounce`] collapses each burst into one event that fires once the
//! burst has been quiet for the configured delay. It holds at most one
//! pending deadline and never owns a platform timer, so cancelling it is a
//! plain field reset.

use crate::time::{Duration, HostTime};

/// Collapses bursts of triggers into a single trailing event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<HostTime>,
}

impl Debounce {
    /// Creates an idle debounce with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The quiet period.
    #[inline]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a trigger at `now`, pushing the deadline back.
    pub fn trigger(&mut self, now: HostTime) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` if a trigger is waiting to fire.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires and clears the pending trigger if its deadline has passed.
    pub fn poll(&mut self, now: HostTime) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trigger.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
