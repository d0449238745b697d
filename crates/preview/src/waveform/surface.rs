//! Two-layer waveform surface.
//!
//! The same bars are drawn twice, once per colour, into static layers that
//! only change when the bars, the track width, or the mute state change.
//! Playback progress is shown by clipping the played layer to the playhead
//! offset, so a tick costs O(1) whatever the bar count.

use clipsync_common::config::WaveformConfig;
use clipsync_interaction::time_to_position;
use clipsync_timing_model::Rgb;

/// One bar; `height` is a fraction of the track height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub width: f64,
    pub height: f32,
}

/// A static layer of bars in one colour.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayer {
    pub color: Rgb,
    pub bars: Vec<BarRect>,
}

/// Visible part of the played layer: `[0, width_px)` from the track start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedClip {
    pub width_px: f64,
}

impl PlayedClip {
    /// Whether a bar starting at `x` falls inside the played region.
    pub fn covers(&self, x: f64) -> bool {
        x < self.width_px
    }
}

#[derive(Debug, Clone)]
pub struct WaveformSurface {
    bar_width_px: f64,
    bar_gap_px: f64,
    track_width_px: f64,
    unplayed_color: Rgb,
    played_color: Rgb,
    muted_color: Rgb,
    muted: bool,
    buckets: Vec<f32>,
    unplayed: BarLayer,
    played: BarLayer,
    revision: u64,
}

impl WaveformSurface {
    pub fn new(config: &WaveformConfig) -> Self {
        let unplayed_color = Rgb::parse_or(&config.unplayed_color, Rgb::new(0x4b, 0x55, 0x63));
        let played_color = Rgb::parse_or(&config.played_color, Rgb::new(0x8b, 0x5c, 0xf6));
        let muted_color = Rgb::parse_or(&config.muted_color, Rgb::new(0x9c, 0xa3, 0xaf));
        Self {
            bar_width_px: config.bar_width_px,
            bar_gap_px: config.bar_gap_px,
            track_width_px: 0.0,
            unplayed_color,
            played_color,
            muted_color,
            muted: false,
            buckets: Vec::new(),
            unplayed: BarLayer {
                color: unplayed_color,
                bars: Vec::new(),
            },
            played: BarLayer {
                color: played_color,
                bars: Vec::new(),
            },
            revision: 0,
        }
    }

    /// Replace the bars. Redraws, and returns true, only if something changed.
    pub fn set_bars(&mut self, buckets: Vec<f32>, track_width_px: f64) -> bool {
        if buckets == self.buckets && track_width_px == self.track_width_px {
            return false;
        }
        self.buckets = buckets;
        self.track_width_px = track_width_px;
        self.redraw();
        true
    }

    /// Swap the played palette for the muted colour.
    pub fn set_muted(&mut self, muted: bool) -> bool {
        if muted == self.muted {
            return false;
        }
        self.muted = muted;
        self.redraw();
        true
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Bumped on every static-layer redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn buckets(&self) -> &[f32] {
        &self.buckets
    }

    pub fn track_width_px(&self) -> f64 {
        self.track_width_px
    }

    pub fn unplayed(&self) -> &BarLayer {
        &self.unplayed
    }

    pub fn played(&self) -> &BarLayer {
        &self.played
    }

    /// Clip region of the played layer for the current playhead.
    pub fn played_clip(&self, time: f64, duration: f64) -> PlayedClip {
        PlayedClip {
            width_px: time_to_position(time, duration, self.track_width_px, 1.0),
        }
    }

    fn redraw(&mut self) {
        let pitch = self.bar_width_px + self.bar_gap_px;
        let bars: Vec<BarRect> = self
            .buckets
            .iter()
            .enumerate()
            .map(|(i, &height)| BarRect {
                x: i as f64 * pitch,
                width: self.bar_width_px,
                height,
            })
            .collect();

        self.unplayed = BarLayer {
            color: self.unplayed_color,
            bars: bars.clone(),
        };
        self.played = BarLayer {
            color: if self.muted {
                self.muted_color
            } else {
                self.played_color
            },
            bars,
        };
        self.revision += 1;
        tracing::trace!(
            revision = self.revision,
            bars = self.buckets.len(),
            muted = self.muted,
            "Redrew waveform layers"
        );
    }
}
