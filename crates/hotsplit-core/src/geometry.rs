#![forbid(unsafe_code)]

//! On-screen geometry of a widget root.

use serde::{Deserialize, Serialize};

/// Horizontal extent of a widget root in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HostRect {
    pub left: f64,
    pub width: f64,
}

impl HostRect {
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Map a client x-coordinate to a clamped fraction of this rect.
    ///
    /// Returns `None` when the rect has no usable width (hidden or not yet
    /// laid out) or when any input is non-finite; callers keep their
    /// previous ratio in that case.
    #[must_use]
    pub fn ratio_at(&self, client_x: f64) -> Option<f64> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return None;
        }
        if !self.left.is_finite() || !client_x.is_finite() {
            return None;
        }
        Some(((client_x - self.left) / self.width).clamp(0.0, 1.0))
    }
}
