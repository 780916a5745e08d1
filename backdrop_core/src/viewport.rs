// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport size and device classification.

/// Widths below this many logical pixels are [`DeviceClass::Compact`].
pub const COMPACT_BREAKPOINT: f64 = 768.0;

/// The size of the window (or mount container) in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Creates a viewport size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either side is zero, negative or not finite.
    ///
    /// Containers that have not been laid out yet report a zero box; nothing
    /// is generated for them.
    #[inline]
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Returns the device class for this width.
    #[inline]
    #[must_use]
    pub fn device_class(self) -> DeviceClass {
        DeviceClass::for_width(self.width)
    }
}

/// Coarse device category that selects a layout preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Phones and narrow windows.
    Compact,
    /// Tablets in landscape and desktops.
    Wide,
}

impl DeviceClass {
    /// Classifies a viewport width.
    #[inline]
    #[must_use]
    pub fn for_width(width: f64) -> Self {
        if width < COMPACT_BREAKPOINT {
            Self::Compact
        } else {
            Self::Wide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(DeviceClass::for_width(767.9), DeviceClass::Compact);
        assert_eq!(DeviceClass::for_width(768.0), DeviceClass::Wide);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(ViewportSize::new(0.0, 10.0).is_degenerate(), "zero width");
        assert!(ViewportSize::new(10.0, -1.0).is_degenerate(), "negative height");
        assert!(
            ViewportSize::new(f64::INFINITY, 10.0).is_degenerate(),
            "infinite width"
        );
        assert!(!ViewportSize::new(1.0, 1.0).is_degenerate(), "tiny but valid");
    }
}
