//! On-canvas caption placement.
//!
//! Positions are expressed as percentages of the video container so they
//! survive player resizes: `(0, 0)` is top-left, `(100, 100)` bottom-right.

use serde::{Deserialize, Serialize};

/// A caption anchor point in percent-of-container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPosition {
    pub x_pct: f64,
    pub y_pct: f64,
}

/// Container dimensions in CSS/logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasPosition {
    /// Horizontally centred, near the bottom.
    pub const DEFAULT: CanvasPosition = CanvasPosition {
        x_pct: 50.0,
        y_pct: 85.0,
    };

    pub fn new(x_pct: f64, y_pct: f64) -> Self {
        Self { x_pct, y_pct }
    }

    /// Clamp each axis independently into its permitted range.
    pub fn clamped(&self, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            x_pct: self.x_pct.max(x_range.0).min(x_range.1),
            y_pct: self.y_pct.max(y_range.0).min(y_range.1),
        }
    }

    /// Move by a pixel delta within a container of the given size.
    /// Returns `None` when the container has no usable area.
    pub fn offset_by_pixels(&self, dx: f64, dy: f64, container: ContainerSize) -> Option<Self> {
        if !container.is_usable() || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        Some(Self {
            x_pct: self.x_pct + dx / container.width * 100.0,
            y_pct: self.y_pct + dy / container.height * 100.0,
        })
    }

    /// Pixel coordinates inside a container.
    pub fn to_pixels(&self, container: ContainerSize) -> (f64, f64) {
        (
            self.x_pct / 100.0 * container.width,
            self.y_pct / 100.0 * container.height,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x_pct.is_finite() && self.y_pct.is_finite()
    }
}

impl Default for CanvasPosition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and positive.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
