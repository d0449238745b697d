//! Export captions to a subtitle file.

use std::path::PathBuf;

use clipsync_timing_model::subtitles::save_subtitles;
use clipsync_timing_model::CaptionTrack;

pub fn run(path: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let track = CaptionTrack::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load captions: {e}"))?;

    save_subtitles(&track.segments, &output)
        .map_err(|e| anyhow::anyhow!("Failed to write subtitles: {e}"))?;

    println!(
        "Exported {} segment(s) to {}",
        track.segments.len(),
        output.display()
    );
    Ok(())
}
