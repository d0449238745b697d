//! Summarize and validate a caption file.

use std::path::PathBuf;

use clipsync_common::config::EditorConfig;
use clipsync_timing_model::CaptionTrack;

pub fn run(path: PathBuf, config: &EditorConfig) -> anyhow::Result<()> {
    println!("Captions: {}", path.display());

    let track = CaptionTrack::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load captions: {e}"))?;

    println!("  Segments: {}", track.segments.len());
    println!("  Words: {}", track.word_count());
    println!("  Ends at: {:.3}s", track.end_secs());

    let issues = track.validate(config.timing.word_min_duration_secs);
    if issues.is_empty() {
        println!("\nCaptions are valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}
