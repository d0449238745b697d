//! Audio waveform for the clip timeline.
//!
//! ```text
//!  request(source, width)
//!        │ generation += 1, placeholder bars shown
//!        ▼
//!  decode off-thread ──▶ outcome{generation} ──▶ poll(): stale? discard
//!                                                   │
//!                                                   ▼
//!                            downsample → WaveformSurface (two static layers)
//!                                                   │
//!                         tick(time) ──▶ PlayedClip width, O(1)
//! ```

mod buckets;
mod decode;
mod pipeline;
mod surface;

pub use buckets::{bucket_count, downsample, placeholder};
pub use decode::{AudioDecoder, DecodedAudio, WavDecoder};
pub use pipeline::{WaveformPipeline, WaveformStatus};
pub use surface::{BarRect, BarLayer, PlayedClip, WaveformSurface};
