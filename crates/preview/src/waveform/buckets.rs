//! Bucketing of decoded samples to the track width.

/// Number of bars that fit a track: `floor(width / (bar + gap))`.
pub fn bucket_count(track_width_px: f64, bar_width_px: f64, bar_gap_px: f64) -> usize {
    let pitch = bar_width_px + bar_gap_px;
    if !track_width_px.is_finite() || !pitch.is_finite() || track_width_px <= 0.0 || pitch <= 0.0
    {
        return 0;
    }
    (track_width_px / pitch).floor() as usize
}

/// Reduce `samples` to `bucket_count` amplitudes in `[0, 1]`.
///
/// Each bucket is the mean absolute amplitude of its window (samples
/// clamped to `[-1, 1]`, non-finite samples skipped), multiplied by `gain`
/// and capped at 1.
pub fn downsample(samples: &[f32], bucket_count: usize, gain: f32) -> Vec<f32> {
    if bucket_count == 0 {
        return Vec::new();
    }
    if samples.is_empty() {
        return vec![0.0; bucket_count];
    }
    let gain = if gain.is_finite() { gain.max(0.0) } else { 1.0 };

    (0..bucket_count)
        .map(|i| {
            let start = i * samples.len() / bucket_count;
            let end = ((i + 1) * samples.len() / bucket_count).max(start + 1);
            let window = &samples[start..end.min(samples.len())];

            let (sum, n) = window
                .iter()
                .filter(|s| s.is_finite())
                .fold((0.0f32, 0u32), |(sum, n), s| (sum + s.abs().min(1.0), n + 1));
            let mean = if n == 0 { 0.0 } else { sum / n as f32 };
            (mean * gain).clamp(0.0, 1.0)
        })
        .collect()
}

/// Deterministic stand-in bars, shown while decoding and after failures.
pub fn placeholder(bucket_count: usize) -> Vec<f32> {
    (0..bucket_count)
        .map(|i| {
            let x = i as f32;
            let v = 0.35 + 0.2 * (x * 0.45).sin() + 0.1 * (x * 0.13).cos();
            v.clamp(0.1, 0.9)
        })
        .collect()
}
