//! Show the caption active at a playback time.

use std::path::PathBuf;

use clipsync_common::config::EditorConfig;
use clipsync_preview::{compose_overlay, PlaybackTracker};
use clipsync_timing_model::{CaptionAnimation, CaptionTrack, StyleState};

pub fn run(
    path: PathBuf,
    time: f64,
    animation: String,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let animation: CaptionAnimation = serde_json::from_value(serde_json::Value::String(
        animation.clone(),
    ))
    .map_err(|_| {
        anyhow::anyhow!(
            "Unknown animation: {animation}. Use: none, bounce, fade, karaoke, word-by-word"
        )
    })?;

    let track = CaptionTrack::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load captions: {e}"))?;

    let mut tracker = PlaybackTracker::new(config.playback);
    let active = tracker.seek(time, &track.segments);

    let Some(segment) = active.segment.map(|i| &track.segments[i]) else {
        println!("No caption at {time:.3}s");
        return Ok(());
    };

    println!(
        "Segment {} [{:.3}s, {:.3}s): {}",
        segment.id, segment.range.start, segment.range.end, segment.text
    );
    match active.word.map(|i| &segment.words[i]) {
        Some(word) => println!(
            "  Word {} [{:.3}s, {:.3}s): {}",
            word.id, word.range.start, word.range.end, word.text
        ),
        None => println!("  Between words"),
    }

    let style = StyleState {
        animation,
        highlight_enabled: true,
        ..StyleState::default()
    };
    let frame = compose_overlay(segment, active.word, time, &style, &config.drag, None);
    let rendered: Vec<String> = frame
        .words
        .iter()
        .filter(|w| w.visible)
        .map(|w| {
            if w.highlighted {
                format!("[{}]", w.text)
            } else {
                w.text.clone()
            }
        })
        .collect();
    println!("  Overlay ({animation:?}): {}", rendered.join(" "));

    Ok(())
}
