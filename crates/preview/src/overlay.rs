//! Caption overlay composition.
//!
//! Resolves a style and the active segment into everything a renderer needs
//! for one frame: anchor, colours, and per-word visibility and highlight for
//! the chosen animation.

use clipsync_common::config::DragTuning;
use clipsync_timing_model::{
    CanvasPosition, CaptionAnimation, CaptionSegment, Rgb, Rgba, StyleState, TextAlignment,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayWord {
    pub id: String,
    pub text: String,
    pub visible: bool,
    pub highlighted: bool,
    /// Fill fraction for karaoke sweeps; 1.0 once the word has been spoken.
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub segment_id: String,
    pub words: Vec<OverlayWord>,
    pub anchor: CanvasPosition,
    pub alignment: TextAlignment,
    pub font_family: String,
    pub font_size: f64,
    pub text_color: Rgb,
    pub background: Rgba,
    pub highlight_color: Option<Rgb>,
    pub outline: Option<(Rgb, f64)>,
    pub shadow: bool,
    pub animation: CaptionAnimation,
}

impl OverlayFrame {
    /// The text as currently visible, words joined by spaces.
    pub fn visible_text(&self) -> String {
        self.words
            .iter()
            .filter(|w| w.visible)
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compose the overlay for `segment` at playback `time`.
///
/// `active_word` is the index of the word under the playhead (from the
/// playback lookup). The font size is held to the resize handle's range in
/// `tuning`. `free_position` overrides the style's vertical anchor when the
/// caption has been dragged on the canvas.
pub fn compose_overlay(
    segment: &CaptionSegment,
    active_word: Option<usize>,
    time: f64,
    style: &StyleState,
    tuning: &DragTuning,
    free_position: Option<CanvasPosition>,
) -> OverlayFrame {
    let style = style.sanitized(tuning);
    let highlight_color = style
        .highlight_enabled
        .then(|| Rgb::parse_or(&style.highlight_color, Rgb::new(0xfa, 0xcc, 0x15)));

    let words = segment
        .words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let is_active = active_word == Some(i);
            let spoken = word.range.end <= time;
            let progress = if spoken {
                1.0
            } else if is_active && word.range.duration() > 0.0 {
                ((time - word.range.start) / word.range.duration()).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let (visible, highlighted) = match style.animation {
                CaptionAnimation::WordByWord => (word.range.start <= time, is_active),
                CaptionAnimation::Karaoke => (true, is_active || spoken),
                CaptionAnimation::None | CaptionAnimation::Bounce | CaptionAnimation::Fade => {
                    (true, is_active)
                }
            };

            OverlayWord {
                id: word.id.clone(),
                text: word.text.clone(),
                visible,
                highlighted: style.highlight_enabled && (highlighted || word.highlight),
                progress,
            }
        })
        .collect();

    let anchor = match free_position {
        Some(position) if position.is_finite() => position,
        _ => CanvasPosition::new(50.0, style.position.anchor_y_pct()),
    };

    OverlayFrame {
        segment_id: segment.id.clone(),
        words,
        anchor,
        alignment: style.alignment,
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        text_color: Rgb::parse_or(&style.text_color, Rgb::WHITE),
        background: Rgb::parse_or(&style.background_color, Rgb::BLACK)
            .with_opacity_pct(style.background_opacity),
        highlight_color,
        outline: style.outline.then(|| {
            (
                Rgb::parse_or(&style.outline_color, Rgb::BLACK),
                style.outline_width,
            )
        }),
        shadow: style.shadow,
        animation: style.animation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipsync_timing_model::{VerticalPosition, Word};

    fn segment() -> CaptionSegment {
        CaptionSegment::from_words(
            "s1",
            vec![
                Word::new("w1", "Hello", 0.0, 0.5),
                Word::new("w2", "there", 0.5, 1.0),
                Word::new("w3", "friend", 1.0, 2.0),
            ],
        )
    }

    fn style(animation: CaptionAnimation) -> StyleState {
        StyleState {
            animation,
            highlight_enabled: true,
            ..StyleState::default()
        }
    }

    #[test]
    fn test_word_by_word_reveals_progressively() {
        let frame = compose_overlay(
            &segment(),
            Some(1),
            0.7,
            &style(CaptionAnimation::WordByWord),
            &DragTuning::default(),
            None,
        );
        assert_eq!(frame.visible_text(), "Hello there");
        assert!(frame.words[1].highlighted);
        assert!(!frame.words[0].highlighted);
    }

    #[test]
    fn test_karaoke_fills_spoken_words() {
        let frame = compose_overlay(
            &segment(),
            Some(2),
            1.5,
            &style(CaptionAnimation::Karaoke),
            &DragTuning::default(),
            None,
        );
        assert_eq!(frame.visible_text(), "Hello there friend");
        assert!(frame.words.iter().all(|w| w.highlighted));
        assert_eq!(frame.words[0].progress, 1.0);
        assert!((frame.words[2].progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_highlight_disabled() {
        let mut s = style(CaptionAnimation::Karaoke);
        s.highlight_enabled = false;
        let tuning = DragTuning::default();
        let frame = compose_overlay(&segment(), Some(0), 0.1, &s, &tuning, None);
        assert!(frame.words.iter().all(|w| !w.highlighted));
        assert_eq!(frame.highlight_color, None);
    }

    #[test]
    fn test_anchor_and_colours() {
        let mut s = StyleState::default();
        s.position = VerticalPosition::Top;
        s.background_opacity = 150.0;
        s.outline = true;
        let tuning = DragTuning::default();

        let frame = compose_overlay(&segment(), None, 0.0, &s, &tuning, None);
        assert_eq!(frame.anchor, CanvasPosition::new(50.0, 10.0));
        assert_eq!(frame.background.a, 1.0);
        assert_eq!(frame.outline, Some((Rgb::BLACK, 2.0)));

        let dragged = CanvasPosition::new(30.0, 40.0);
        let frame = compose_overlay(&segment(), None, 0.0, &s, &tuning, Some(dragged));
        assert_eq!(frame.anchor, dragged);
    }

    #[test]
    fn test_font_size_held_to_configured_range() {
        let s = StyleState {
            font_size: 70.0,
            ..StyleState::default()
        };
        let tuning = DragTuning {
            font_max: 48.0,
            ..DragTuning::default()
        };
        let frame = compose_overlay(&segment(), None, 0.0, &s, &tuning, None);
        assert_eq!(frame.font_size, 48.0);
    }
}
