//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ClipsyncError, ClipsyncResult};

/// Global editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Clip and word timing limits.
    pub timing: TimingLimits,

    /// Timeline zoom range.
    pub zoom: ZoomConfig,

    /// Drag tuning for canvas handles.
    pub drag: DragTuning,

    /// Style commit debouncing.
    pub style: DebounceConfig,

    /// Waveform bar layout and palette.
    pub waveform: WaveformConfig,

    /// Playback tick handling.
    pub playback: PlaybackConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Duration and ordering limits enforced while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingLimits {
    /// Shortest permitted clip (seconds).
    pub min_clip_secs: f64,

    /// Longest permitted clip (seconds).
    pub max_clip_secs: f64,

    /// Minimum gap kept between a dragged word edge and its neighbour.
    pub word_min_gap_secs: f64,

    /// Minimum duration of a single word.
    pub word_min_duration_secs: f64,
}

/// Timeline zoom bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Increment applied by a single zoom-in/zoom-out.
    pub step: f64,
}

/// Tuning for free-position and resize drags on the caption canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTuning {
    /// Smallest caption font size.
    pub font_min: f64,

    /// Largest caption font size.
    pub font_max: f64,

    /// Font points gained per pixel of vertical pointer travel.
    pub resize_sensitivity: f64,

    /// Permitted horizontal placement, percent of container width.
    pub free_x_pct: (f64, f64),

    /// Permitted vertical placement, percent of container height.
    pub free_y_pct: (f64, f64),
}

/// Style commit debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Minimum spacing between commits during continuous edits.
    pub debounce_window_ms: u64,

    /// Upper bound between the last edit of a burst and its commit.
    pub max_latency_ms: u64,
}

/// Waveform bar layout and palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    pub bar_width_px: f64,
    pub bar_gap_px: f64,

    /// Multiplier applied to the mean absolute amplitude before capping at 1.0.
    pub gain: f64,

    pub unplayed_color: String,
    pub played_color: String,
    pub muted_color: String,
}

/// Playback tick handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum rate at which time-updates drive caption lookup.
    pub max_tick_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipsync=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for TimingLimits {
    fn default() -> Self {
        Self {
            min_clip_secs: 5.0,
            max_clip_secs: 180.0,
            word_min_gap_secs: 0.1,
            word_min_duration_secs: 0.1,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 4.0,
            step: 0.25,
        }
    }
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            font_min: 12.0,
            font_max: 72.0,
            resize_sensitivity: 0.5,
            free_x_pct: (10.0, 90.0),
            free_y_pct: (10.0, 95.0),
        }
    }
}

impl DragTuning {
    /// Pull a font size into `[font_min, font_max]`.
    pub fn clamp_font_size(&self, size: f64) -> f64 {
        size.max(self.font_min).min(self.font_max)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: 300,
            max_latency_ms: 500,
        }
    }
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            bar_width_px: 2.0,
            bar_gap_px: 1.0,
            gain: 3.0,
            unplayed_color: "#4b5563".to_string(),
            played_color: "#8b5cf6".to_string(),
            muted_color: "#9ca3af".to_string(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { max_tick_hz: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EditorConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }
        match Self::try_load_from(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = ?config_path, error = %e, "Using default config");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path, reporting why it is unusable.
    pub fn try_load_from(config_path: &std::path::Path) -> ClipsyncResult<Self> {
        if !config_path.exists() {
            return Err(ClipsyncError::FileNotFound {
                path: config_path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            ClipsyncError::config(format!("{}: {e}", config_path.display()))
        })
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipsync").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.timing.min_clip_secs, 5.0);
        assert_eq!(config.timing.max_clip_secs, 180.0);
        assert_eq!(config.style.debounce_window_ms, 300);
        assert_eq!(config.style.max_latency_ms, 500);
        assert_eq!(config.drag.free_y_pct, (10.0, 95.0));
        assert_eq!(config.playback.max_tick_hz, 60);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "style": { "debounce_window_ms": 150 } }"#;
        let config: EditorConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.style.debounce_window_ms, 150);
        assert_eq!(config.style.max_latency_ms, 500);
        assert_eq!(config.waveform.gain, 3.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("clipsync_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = EditorConfig::default();
        config.zoom.max = 8.0;
        config.save_to(&path).unwrap();

        let loaded = EditorConfig::load_from(&path);
        assert_eq!(loaded.zoom.max, 8.0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unparseable_config_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("clipsync_test_config_bad");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = EditorConfig::load_from(&path);
        assert_eq!(loaded.timing, TimingLimits::default());

        let err = EditorConfig::try_load_from(&path).unwrap_err();
        assert!(matches!(err, ClipsyncError::Config { .. }), "{err}");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_try_load_missing_file() {
        let path = std::env::temp_dir().join("clipsync_test_config_missing.json");
        let _ = std::fs::remove_file(&path);
        let err = EditorConfig::try_load_from(&path).unwrap_err();
        assert!(matches!(err, ClipsyncError::FileNotFound { .. }));
    }

    #[test]
    fn test_clamp_font_size_uses_configured_range() {
        let tuning = DragTuning {
            font_min: 16.0,
            font_max: 40.0,
            ..DragTuning::default()
        };
        assert_eq!(tuning.clamp_font_size(8.0), 16.0);
        assert_eq!(tuning.clamp_font_size(200.0), 40.0);
        assert_eq!(tuning.clamp_font_size(24.0), 24.0);
    }
}
