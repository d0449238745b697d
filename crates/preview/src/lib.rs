//! Clipsync Preview
//!
//! Everything that turns edits and playback into what the user sees:
//! - **Debounce:** Coalesces bursts of style edits into bounded-latency commits
//! - **Waveform:** Decodes audio off-thread, buckets it to the track width,
//!   and exposes a two-layer (unplayed/played) surface clipped per tick
//! - **Overlay:** Composes the caption overlay for a playback time and style
//! - **Playback:** Rate-limited tracking of the active segment and word

pub mod debounce;
pub mod overlay;
pub mod playback;
pub mod waveform;

pub use debounce::{DebounceAction, DebounceState, StyleSink, StyleUpdateDebouncer};
pub use overlay::{compose_overlay, OverlayFrame, OverlayWord};
pub use playback::{ActiveCaption, PlaybackTracker};
pub use waveform::{
    AudioDecoder, DecodedAudio, PlayedClip, WavDecoder, WaveformPipeline, WaveformStatus,
    WaveformSurface,
};
