//! Render a waveform strip as coloured block characters.

use std::path::PathBuf;
use std::sync::Arc;

use clipsync_common::config::EditorConfig;
use clipsync_preview::{WavDecoder, WaveformPipeline, WaveformStatus};
use clipsync_timing_model::Rgb;

const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub async fn run(
    path: PathBuf,
    width: f64,
    time: f64,
    muted: bool,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let mut pipeline = WaveformPipeline::new(Arc::new(WavDecoder), config.waveform.clone());
    pipeline.set_muted(muted);
    pipeline.request(&path.to_string_lossy(), width);

    let status = pipeline.settle().await;
    if status == WaveformStatus::Fallback {
        eprintln!("Could not decode {}; showing placeholder bars", path.display());
    }

    let duration = pipeline.duration_secs().unwrap_or(0.0);
    let clip = pipeline.tick(time, duration);
    let surface = pipeline.surface();

    let mut line = String::new();
    for (unplayed, played) in surface.unplayed().bars.iter().zip(&surface.played().bars) {
        let (bar, color) = if clip.covers(unplayed.x) {
            (played, surface.played().color)
        } else {
            (unplayed, surface.unplayed().color)
        };
        let level = (bar.height.clamp(0.0, 1.0) * 8.0).round() as usize;
        line.push_str(&paint(LEVELS[level.min(8)], color));
    }
    println!("{line}\x1b[0m");
    println!(
        "{} bars, {:.2}s / {:.2}s{}",
        surface.buckets().len(),
        time.clamp(0.0, duration.max(0.0)),
        duration,
        if muted { " (muted)" } else { "" }
    );

    Ok(())
}

fn paint(glyph: char, color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m{glyph}", color.r, color.g, color.b)
}
