//! Caption export in SRT and WebVTT formats.

use std::path::Path;

use clipsync_common::error::ClipsyncResult;

use crate::caption::CaptionSegment;

/// Render segments as SRT.
pub fn generate_srt(segments: &[CaptionSegment]) -> String {
    let mut output = String::new();

    for (i, segment) in segments.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(segment.range.start, ','),
            format_timestamp(segment.range.end, ','),
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Render segments as WebVTT, with word-level cue timestamps so players
/// that support them can reproduce karaoke-style highlighting.
pub fn generate_vtt(segments: &[CaptionSegment]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for segment in segments {
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(segment.range.start, '.'),
            format_timestamp(segment.range.end, '.'),
        ));
        if segment.words.len() > 1 {
            let mut cue = String::new();
            for (i, word) in segment.words.iter().enumerate() {
                if i > 0 {
                    cue.push_str(&format!(" <{}>", format_timestamp(word.range.start, '.')));
                }
                cue.push_str(&word.text);
            }
            output.push_str(&cue);
        } else {
            output.push_str(&segment.text);
        }
        output.push_str("\n\n");
    }

    output
}

/// Format seconds as `HH:MM:SS<sep>mmm`. Negative input clamps to zero.
fn format_timestamp(secs: f64, millis_sep: char) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{millis_sep}{millis:03}")
}

/// Save subtitles to a file; the extension picks the format.
pub fn save_subtitles(segments: &[CaptionSegment], path: &Path) -> ClipsyncResult<()> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("vtt") => generate_vtt(segments),
        _ => generate_srt(segments), // default to SRT
    };
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), segments = segments.len(), "Wrote subtitles");
    Ok(())
}
