//! Caption style options.
//!
//! [`StyleState`] is the complete style the preview renders with.
//! [`StylePatch`] carries a partial edit from a style control; patches are
//! merged onto a staged copy and committed as full snapshots, so a preview
//! never observes half of a burst.

use clipsync_common::config::DragTuning;
use serde::{Deserialize, Serialize};

/// Allowed background opacity, in percent.
pub const OPACITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Vertical anchor of the caption block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Caption entrance and word animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionAnimation {
    #[default]
    None,
    Bounce,
    Fade,
    /// Words already spoken take the highlight colour.
    Karaoke,
    /// Words appear one at a time as they are spoken.
    WordByWord,
}

impl VerticalPosition {
    /// Default anchor height in percent of the container.
    pub fn anchor_y_pct(self) -> f64 {
        match self {
            VerticalPosition::Top => 10.0,
            VerticalPosition::Center => 50.0,
            VerticalPosition::Bottom => 85.0,
        }
    }
}

/// Complete caption style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleState {
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
    pub background_color: String,
    pub background_opacity: f64,
    pub position: VerticalPosition,
    pub alignment: TextAlignment,
    pub animation: CaptionAnimation,
    pub highlight_color: String,
    pub highlight_enabled: bool,
    pub shadow: bool,
    pub outline: bool,
    pub outline_color: String,
    pub outline_width: f64,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 32.0,
            text_color: "#ffffff".to_string(),
            background_color: "#000000".to_string(),
            background_opacity: 60.0,
            position: VerticalPosition::Bottom,
            alignment: TextAlignment::Center,
            animation: CaptionAnimation::None,
            highlight_color: "#facc15".to_string(),
            highlight_enabled: false,
            shadow: true,
            outline: false,
            outline_color: "#000000".to_string(),
            outline_width: 2.0,
        }
    }
}

impl StyleState {
    /// Merge a partial edit into this style.
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(v) = &patch.font_family {
            self.font_family = v.clone();
        }
        if let Some(v) = patch.font_size {
            self.font_size = v;
        }
        if let Some(v) = &patch.text_color {
            self.text_color = v.clone();
        }
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = patch.background_opacity {
            self.background_opacity = v;
        }
        if let Some(v) = patch.position {
            self.position = v;
        }
        if let Some(v) = patch.alignment {
            self.alignment = v;
        }
        if let Some(v) = patch.animation {
            self.animation = v;
        }
        if let Some(v) = &patch.highlight_color {
            self.highlight_color = v.clone();
        }
        if let Some(v) = patch.highlight_enabled {
            self.highlight_enabled = v;
        }
        if let Some(v) = patch.shadow {
            self.shadow = v;
        }
        if let Some(v) = patch.outline {
            self.outline = v;
        }
        if let Some(v) = &patch.outline_color {
            self.outline_color = v.clone();
        }
        if let Some(v) = patch.outline_width {
            self.outline_width = v;
        }
    }

    /// Copy with numeric options pulled into their allowed ranges. The font
    /// size range is the one the resize handle uses.
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(&self, tuning: &DragTuning) -> Self {
        let defaults = StyleState::default();
        let font_size = if self.font_size.is_finite() {
            self.font_size
        } else {
            defaults.font_size
        };
        let font_size = tuning.clamp_font_size(font_size);
        let background_opacity = if self.background_opacity.is_finite() {
            self.background_opacity
                .clamp(OPACITY_RANGE.0, OPACITY_RANGE.1)
        } else {
            defaults.background_opacity
        };
        let outline_width = if self.outline_width.is_finite() {
            self.outline_width.max(0.0)
        } else {
            defaults.outline_width
        };
        Self {
            font_size,
            background_opacity,
            outline_width,
            ..self.clone()
        }
    }
}

/// A partial style edit. Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub background_opacity: Option<f64>,
    pub position: Option<VerticalPosition>,
    pub alignment: Option<TextAlignment>,
    pub animation: Option<CaptionAnimation>,
    pub highlight_color: Option<String>,
    pub highlight_enabled: Option<bool>,
    pub shadow: Option<bool>,
    pub outline: Option<bool>,
    pub outline_color: Option<String>,
    pub outline_width: Option<f64>,
}

impl StylePatch {
    pub fn font_size(size: f64) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn text_color(color: impl Into<String>) -> Self {
        Self {
            text_color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn background_opacity(pct: f64) -> Self {
        Self {
            background_opacity: Some(pct),
            ..Self::default()
        }
    }

    /// A patch that sets every field from a full snapshot.
    pub fn full(style: &StyleState) -> Self {
        Self {
            font_family: Some(style.font_family.clone()),
            font_size: Some(style.font_size),
            text_color: Some(style.text_color.clone()),
            background_color: Some(style.background_color.clone()),
            background_opacity: Some(style.background_opacity),
            position: Some(style.position),
            alignment: Some(style.alignment),
            animation: Some(style.animation),
            highlight_color: Some(style.highlight_color.clone()),
            highlight_enabled: Some(style.highlight_enabled),
            shadow: Some(style.shadow),
            outline: Some(style.outline),
            outline_color: Some(style.outline_color.clone()),
            outline_width: Some(style.outline_width),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StylePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut style = StyleState::default();
        style.apply(&StylePatch::font_size(48.0));
        assert_eq!(style.font_size, 48.0);
        assert_eq!(style.text_color, "#ffffff");
    }

    #[test]
    fn test_full_patch_reproduces_snapshot() {
        let mut target = StyleState {
            animation: CaptionAnimation::Karaoke,
            font_size: 20.0,
            ..StyleState::default()
        };
        let source = StyleState {
            position: VerticalPosition::Top,
            ..StyleState::default()
        };
        target.apply(&StylePatch::full(&source));
        assert_eq!(target, source);
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let style = StyleState {
            font_size: 200.0,
            background_opacity: -5.0,
            outline_width: f64::NAN,
            ..StyleState::default()
        }
        .sanitized(&DragTuning::default());
        assert_eq!(style.font_size, 72.0);
        assert_eq!(style.background_opacity, 0.0);
        assert_eq!(style.outline_width, 2.0);
    }

    #[test]
    fn test_sanitized_follows_configured_font_range() {
        let tuning = DragTuning {
            font_min: 16.0,
            font_max: 40.0,
            ..DragTuning::default()
        };
        let big = StyleState {
            font_size: 48.0,
            ..StyleState::default()
        };
        assert_eq!(big.sanitized(&tuning).font_size, 40.0);

        let small = StyleState {
            font_size: 12.0,
            ..StyleState::default()
        };
        assert_eq!(small.sanitized(&tuning).font_size, 16.0);

        // The default size is pulled in as well.
        let narrow = DragTuning {
            font_min: 40.0,
            font_max: 60.0,
            ..DragTuning::default()
        };
        let nan = StyleState {
            font_size: f64::NAN,
            ..StyleState::default()
        };
        assert_eq!(nan.sanitized(&narrow).font_size, 40.0);
    }

    #[test]
    fn test_animation_names() {
        let json = serde_json::to_string(&CaptionAnimation::WordByWord).unwrap();
        assert_eq!(json, "\"word-by-word\"");
        let style: StyleState =
            serde_json::from_str(r#"{"animation":"karaoke","highlightEnabled":true}"#).unwrap();
        assert_eq!(style.animation, CaptionAnimation::Karaoke);
        assert!(style.highlight_enabled);
        assert_eq!(style.font_family, "Inter");
    }

    #[test]
    fn test_empty_patch() {
        assert!(StylePatch::default().is_empty());
        assert!(!StylePatch::text_color("#ff0000").is_empty());
    }
}
