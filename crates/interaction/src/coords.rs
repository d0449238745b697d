//! Time <-> pixel coordinate mapping.
//!
//! A track of `track_width_px` pixels displays `duration` seconds; zoom
//! stretches the content so its effective width is `track_width_px * zoom`.
//! Time 0 sits at pixel 0.

use clipsync_common::config::ZoomConfig;

/// Pixel offset of `time` on a track. Times outside `[0, duration]` are
/// pinned to the track ends; a non-positive duration maps everything to 0.
pub fn time_to_position(time: f64, duration: f64, track_width_px: f64, zoom: f64) -> f64 {
    let width = effective_width(track_width_px, zoom);
    if !(duration > 0.0) || !duration.is_finite() || width <= 0.0 || !time.is_finite() {
        return 0.0;
    }
    (time.clamp(0.0, duration) / duration) * width
}

/// Time at pixel offset `position`, clamped to `[0, duration]`.
pub fn position_to_time(position: f64, duration: f64, track_width_px: f64, zoom: f64) -> f64 {
    let width = effective_width(track_width_px, zoom);
    if !(duration > 0.0) || !duration.is_finite() || width <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    ((position / width) * duration).clamp(0.0, duration)
}

fn effective_width(track_width_px: f64, zoom: f64) -> f64 {
    let width = track_width_px * zoom;
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}

/// The geometry of a rendered track, captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Seconds represented by the full content width.
    pub duration: f64,
    /// Visible track width in pixels.
    pub track_width_px: f64,
    pub zoom: f64,
}

impl TrackGeometry {
    pub fn new(duration: f64, track_width_px: f64, zoom: f64) -> Self {
        Self {
            duration,
            track_width_px,
            zoom,
        }
    }

    /// Width of the zoomed content in pixels.
    pub fn effective_width(&self) -> f64 {
        effective_width(self.track_width_px, self.zoom)
    }

    /// Whether pointer positions can be mapped at all.
    pub fn is_usable(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0 && self.effective_width() > 0.0
    }

    pub fn time_to_position(&self, time: f64) -> f64 {
        time_to_position(time, self.duration, self.track_width_px, self.zoom)
    }

    pub fn position_to_time(&self, position: f64) -> f64 {
        position_to_time(position, self.duration, self.track_width_px, self.zoom)
    }

    /// Seconds covered by a horizontal pixel delta (unclamped, signed).
    pub fn delta_to_time(&self, dx: f64) -> f64 {
        if !self.is_usable() || !dx.is_finite() {
            return 0.0;
        }
        dx / self.effective_width() * self.duration
    }

    /// Seconds covered by one pixel; useful for snapping tolerances.
    pub fn seconds_per_pixel(&self) -> f64 {
        self.delta_to_time(1.0)
    }
}

/// A zoom factor kept inside the configured range on discrete steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    value: f64,
    config: ZoomConfig,
}

impl ZoomLevel {
    /// Clamp and snap `value` to the nearest step.
    pub fn new(value: f64, config: ZoomConfig) -> Self {
        Self {
            value: Self::snap(value, &config),
            config,
        }
    }

    /// Unzoomed (1x), or the closest permitted level.
    pub fn unit(config: ZoomConfig) -> Self {
        Self::new(1.0, config)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.value = Self::snap(self.value + self.config.step, &self.config);
        self.value
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.value = Self::snap(self.value - self.config.step, &self.config);
        self.value
    }

    pub fn can_zoom_in(&self) -> bool {
        self.value < self.config.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.value > self.config.min
    }

    fn snap(value: f64, config: &ZoomConfig) -> f64 {
        let value = if value.is_finite() { value } else { 1.0 };
        let clamped = value.max(config.min).min(config.max);
        if config.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - config.min) / config.step).round();
        (config.min + steps * config.step).max(config.min).min(config.max)
    }
}
