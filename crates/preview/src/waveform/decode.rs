//! Audio decoding for waveform extraction.

use std::path::{Path, PathBuf};

use clipsync_common::error::{ClipsyncError, ClipsyncResult};

/// Mono amplitude samples in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Turns an audio source URL into samples. Runs off the interaction thread.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, source: &str) -> ClipsyncResult<DecodedAudio>;
}

/// Decodes local WAV files (`/path/a.wav` or `file:///path/a.wav`).
#[derive(Debug, Default, Clone, Copy)]
pub struct WavDecoder;

impl WavDecoder {
    fn resolve(source: &str) -> ClipsyncResult<PathBuf> {
        if let Some(path) = source.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if source.contains("://") {
            return Err(ClipsyncError::unsupported(format!(
                "Cannot decode remote audio source: {source}"
            )));
        }
        Ok(PathBuf::from(source))
    }
}

impl AudioDecoder for WavDecoder {
    fn decode(&self, source: &str) -> ClipsyncResult<DecodedAudio> {
        let path = Self::resolve(source)?;
        if !path.exists() {
            return Err(ClipsyncError::FileNotFound { path });
        }
        let audio = read_wav_mono(&path)?;
        tracing::debug!(
            path = %path.display(),
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            "Decoded waveform audio"
        );
        Ok(audio)
    }
}

fn read_wav_mono(path: &Path) -> ClipsyncResult<DecodedAudio> {
    let mut reader = hound::WavReader::open(path).map_err(|e| {
        ClipsyncError::decode(format!("Failed to open WAV {}: {e}", path.display()))
    })?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| ClipsyncError::decode(format!("Bad WAV sample data: {e}")))?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(ClipsyncError::decode(format!(
                    "Unsupported WAV bit depth: {}",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| ClipsyncError::decode(format!("Bad WAV sample data: {e}")))?
        }
    };

    let samples = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}
