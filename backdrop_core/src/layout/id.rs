// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster and pair identity types.

use core::fmt;

/// Identifies a cluster within a [`Layout`](super::Layout).
///
/// Cluster ids follow catalog order and are the same across rebuilds, so
/// they can carry fixed policy such as the [`DepthLayer`](super::DepthLayer).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub(crate) u32);

impl ClusterId {
    /// Returns the cluster's position in catalog order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClusterId({})", self.0)
    }
}

/// A handle to a shape pair in a [`Layout`](super::Layout)'s pair arena.
///
/// The id is the pair's slot in the arena. Slot numbering depends only on
/// the catalog, so a pair keeps its id when the layout is regenerated for a
/// new viewport of the same device class.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairId(pub(crate) u32);

impl PairId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({})", self.0)
    }
}
