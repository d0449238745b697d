//! Latest-wins waveform extraction.
//!
//! Every decode request takes a new generation number. Outcomes carry the
//! generation they were started under and are dropped on arrival if a newer
//! request (or teardown) has bumped the counter since, so a slow decode for
//! an old source can never overwrite the current bars.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use clipsync_common::config::WaveformConfig;
use clipsync_common::error::{ClipsyncError, ClipsyncResult};
use tokio::sync::mpsc;

use super::buckets::{bucket_count, downsample, placeholder};
use super::decode::{AudioDecoder, DecodedAudio};
use super::surface::{PlayedClip, WaveformSurface};

/// Where the displayed bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformStatus {
    /// No source requested.
    Idle,
    /// Decode in flight; placeholder bars are shown.
    Pending,
    /// Bars computed from decoded audio.
    Ready,
    /// Decode failed; placeholder bars are shown.
    Fallback,
}

#[derive(Debug)]
struct DecodeOutcome {
    generation: u64,
    source: String,
    result: ClipsyncResult<DecodedAudio>,
}

/// Sends exactly one outcome for its generation. A job that panics or is
/// dropped before it runs reports a decode error instead of nothing.
struct OutcomeReporter {
    generation: u64,
    source: Option<String>,
    tx: mpsc::UnboundedSender<DecodeOutcome>,
}

impl OutcomeReporter {
    fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    fn report(mut self, result: ClipsyncResult<DecodedAudio>) {
        self.send(result);
    }

    fn skip(mut self) {
        self.source = None;
    }

    fn send(&mut self, result: ClipsyncResult<DecodedAudio>) {
        if let Some(source) = self.source.take() {
            // The pipeline may already be gone.
            let _ = self.tx.send(DecodeOutcome {
                generation: self.generation,
                source,
                result,
            });
        }
    }
}

impl Drop for OutcomeReporter {
    fn drop(&mut self) {
        if self.source.is_some() {
            self.send(Err(ClipsyncError::decode(
                "decode job ended without a result",
            )));
        }
    }
}

pub struct WaveformPipeline {
    decoder: Arc<dyn AudioDecoder>,
    config: WaveformConfig,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<DecodeOutcome>,
    rx: mpsc::UnboundedReceiver<DecodeOutcome>,
    source: Option<String>,
    audio: Option<Arc<DecodedAudio>>,
    track_width_px: f64,
    status: WaveformStatus,
    surface: WaveformSurface,
}

impl std::fmt::Debug for WaveformPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveformPipeline")
            .field("generation", &self.generation())
            .field("source", &self.source)
            .field("track_width_px", &self.track_width_px)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl WaveformPipeline {
    pub fn new(decoder: Arc<dyn AudioDecoder>, config: WaveformConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let surface = WaveformSurface::new(&config);
        Self {
            decoder,
            config,
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            source: None,
            audio: None,
            track_width_px: 0.0,
            status: WaveformStatus::Idle,
            surface,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> WaveformStatus {
        self.status
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn buckets(&self) -> &[f32] {
        self.surface.buckets()
    }

    pub fn surface(&self) -> &WaveformSurface {
        &self.surface
    }

    /// Duration of the decoded audio, once available.
    pub fn duration_secs(&self) -> Option<f64> {
        self.audio.as_ref().map(|a| a.duration_secs())
    }

    /// Number of bars for the current track width.
    pub fn bucket_count(&self) -> usize {
        bucket_count(
            self.track_width_px,
            self.config.bar_width_px,
            self.config.bar_gap_px,
        )
    }

    /// Request bars for `source` at `track_width_px`, superseding any
    /// in-flight request. Returns the request's generation.
    ///
    /// A request for the source that is already decoded, or still decoding,
    /// only re-buckets. A source that fell back is decoded again.
    pub fn request(&mut self, source: &str, track_width_px: f64) -> u64 {
        let in_hand = self.audio.is_some() || self.status == WaveformStatus::Pending;
        if self.source.as_deref() == Some(source) && in_hand {
            self.resize(track_width_px);
            return self.generation();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.source = Some(source.to_string());
        self.audio = None;
        self.track_width_px = track_width_px;
        self.status = WaveformStatus::Pending;
        self.surface
            .set_bars(placeholder(self.bucket_count()), track_width_px);

        tracing::debug!(source, generation, "Requesting waveform decode");
        if let Err(e) = self.spawn_decode(source.to_string(), generation) {
            tracing::warn!(source, error = %e, "Failed to start waveform decode");
            // The dropped job has already reported its failure.
            self.poll();
        }
        generation
    }

    /// Re-bucket for a new track width without decoding again.
    pub fn resize(&mut self, track_width_px: f64) -> bool {
        if track_width_px == self.track_width_px {
            return false;
        }
        self.track_width_px = track_width_px;
        let buckets = self.current_buckets();
        self.surface.set_bars(buckets, track_width_px)
    }

    pub fn set_muted(&mut self, muted: bool) -> bool {
        self.surface.set_muted(muted)
    }

    /// Played-layer clip for a playback tick.
    pub fn tick(&self, time: f64, duration: f64) -> PlayedClip {
        self.surface.played_clip(time, duration)
    }

    /// Apply every outcome that has arrived. Returns true if the bars changed.
    ///
    /// Call from the interaction loop's tick handler; never blocks.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Wait until the current request has resolved, applying outcomes as
    /// they arrive.
    pub async fn settle(&mut self) -> WaveformStatus {
        while self.status == WaveformStatus::Pending {
            match self.rx.recv().await {
                Some(outcome) => {
                    self.apply(outcome);
                }
                None => break,
            }
        }
        self.status
    }

    /// Invalidate any in-flight decode and clear the source.
    pub fn shutdown(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.source = None;
        self.audio = None;
        self.status = WaveformStatus::Idle;
        tracing::debug!(generation, "Waveform pipeline shut down");
    }

    fn spawn_decode(&self, source: String, generation: u64) -> ClipsyncResult<()> {
        let decoder = Arc::clone(&self.decoder);
        let current = Arc::clone(&self.generation);
        let reporter = OutcomeReporter {
            generation,
            source: Some(source),
            tx: self.tx.clone(),
        };

        let job = move || {
            // Superseded before it started.
            if current.load(Ordering::SeqCst) != generation {
                reporter.skip();
                return;
            }
            let result = decoder.decode(reporter.source());
            reporter.report(result);
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                std::thread::Builder::new()
                    .name("waveform-decode".to_string())
                    .spawn(job)?;
            }
        }
        Ok(())
    }

    fn check_current(&self, generation: u64) -> ClipsyncResult<()> {
        if generation == self.generation() {
            Ok(())
        } else {
            Err(ClipsyncError::StaleResult { generation })
        }
    }

    fn apply(&mut self, outcome: DecodeOutcome) -> bool {
        if let Err(e) = self.check_current(outcome.generation) {
            if e.is_stale() {
                tracing::debug!(source = %outcome.source, error = %e, "Discarding waveform result");
            }
            return false;
        }

        match outcome.result {
            Ok(audio) => {
                self.audio = Some(Arc::new(audio));
                self.status = WaveformStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(
                    source = %outcome.source,
                    error = %e,
                    "Waveform decode failed, showing placeholder"
                );
                self.audio = None;
                self.status = WaveformStatus::Fallback;
            }
        }
        let buckets = self.current_buckets();
        self.surface.set_bars(buckets, self.track_width_px)
    }

    fn current_buckets(&self) -> Vec<f32> {
        let count = self.bucket_count();
        match &self.audio {
            Some(audio) => downsample(&audio.samples, count, self.config.gain as f32),
            None => placeholder(count),
        }
    }
}

impl Drop for WaveformPipeline {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
