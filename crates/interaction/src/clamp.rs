//! Duration, position, and ordering invariants.
//!
//! Nothing here fails: validation returns a result object carrying an
//! advisory message, and clamping always produces a usable value. Every
//! clamp computes a target interval independent of the candidate and then
//! pins the candidate into it, which makes it idempotent.

use std::fmt;

use clipsync_common::config::TimingLimits;
use clipsync_common::error::{ClipsyncError, ClipsyncResult};
use clipsync_timing_model::{Edge, TimeRange, WordNeighbors};

/// Why a clip duration was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationIssue {
    TooShort { min_secs: f64 },
    TooLong { max_secs: f64 },
    NotFinite,
}

impl fmt::Display for DurationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationIssue::TooShort { min_secs } => {
                write!(f, "Clip must be at least {} seconds", format_secs(*min_secs))
            }
            DurationIssue::TooLong { max_secs } => {
                write!(f, "Clip cannot be longer than {}", format_secs(*max_secs))
            }
            DurationIssue::NotFinite => write!(f, "Clip boundaries are not valid times"),
        }
    }
}

fn format_secs(secs: f64) -> String {
    if secs >= 60.0 && secs % 60.0 == 0.0 {
        let minutes = secs / 60.0;
        if minutes == 1.0 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs}")
    }
}

/// Outcome of [`ClampingValidator::validate_duration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationCheck {
    pub valid: bool,
    pub duration: f64,
    pub error: Option<DurationIssue>,
}

impl DurationCheck {
    /// The duration, or the issue as a [`ClipsyncError::Validation`] carrying
    /// the advisory text.
    pub fn into_result(self) -> ClipsyncResult<f64> {
        match self.error {
            None => Ok(self.duration),
            Some(issue) => Err(ClipsyncError::validation(issue.to_string())),
        }
    }
}

/// Enforces clip and word timing invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampingValidator {
    limits: TimingLimits,
}

impl Default for ClampingValidator {
    fn default() -> Self {
        Self::new(TimingLimits::default())
    }
}

impl ClampingValidator {
    pub fn new(limits: TimingLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &TimingLimits {
        &self.limits
    }

    /// Valid iff `min_clip_secs <= end - start <= max_clip_secs`.
    pub fn validate_duration(&self, start: f64, end: f64) -> DurationCheck {
        let duration = end - start;
        let error = if !duration.is_finite() {
            Some(DurationIssue::NotFinite)
        } else if duration < self.limits.min_clip_secs {
            Some(DurationIssue::TooShort {
                min_secs: self.limits.min_clip_secs,
            })
        } else if duration > self.limits.max_clip_secs {
            Some(DurationIssue::TooLong {
                max_secs: self.limits.max_clip_secs,
            })
        } else {
            None
        };

        DurationCheck {
            valid: error.is_none(),
            duration,
            error,
        }
    }

    /// Pin a boundary edge into the interval allowed by the clip duration
    /// limits relative to `paired` (the opposite edge) and by `[0, hard_max]`.
    ///
    /// When the limits cannot be met inside `[0, hard_max]` the edge stops
    /// at the bound closest to satisfying them.
    pub fn clamp_boundary(&self, candidate: f64, paired: f64, edge: Edge, hard_max: f64) -> f64 {
        let hard_max = if hard_max.is_finite() {
            hard_max.max(0.0)
        } else {
            f64::MAX
        };
        let (lo, hi) = match edge {
            Edge::End => {
                let lo = (paired + self.limits.min_clip_secs).clamp(0.0, hard_max);
                let hi = (paired + self.limits.max_clip_secs).clamp(0.0, hard_max);
                (lo.min(hi), hi)
            }
            Edge::Start => {
                let lo = (paired - self.limits.max_clip_secs).clamp(0.0, hard_max);
                let hi = (paired - self.limits.min_clip_secs).clamp(0.0, hard_max);
                (lo, hi.max(lo))
            }
        };
        pin(candidate, lo, hi)
    }

    /// Pin a word edge so the word keeps its minimum duration, stays
    /// `word_min_gap_secs` clear of the adjacent word, and stays inside
    /// `[0, total_duration]`.
    ///
    /// If no position satisfies all three, the current edge is returned.
    pub fn clamp_word_edge(
        &self,
        candidate: f64,
        edge: Edge,
        word: TimeRange,
        neighbors: WordNeighbors,
        total_duration: f64,
    ) -> f64 {
        let total = if total_duration.is_finite() {
            total_duration.max(0.0)
        } else {
            f64::MAX
        };
        let gap = self.limits.word_min_gap_secs;
        let min_len = self.limits.word_min_duration_secs;

        let (lo, hi, current) = match edge {
            Edge::Start => {
                let lo = neighbors.previous.map_or(0.0, |p| p.end + gap).max(0.0);
                let hi = (word.end - min_len).min(total);
                (lo, hi, word.start)
            }
            Edge::End => {
                let lo = (word.start + min_len).max(0.0);
                let hi = neighbors.next.map_or(total, |n| n.start - gap).min(total);
                (lo, hi, word.end)
            }
        };

        if lo > hi {
            return current;
        }
        pin(candidate, lo, hi)
    }

    /// Move a whole word by `delta` seconds, pushing it back inside
    /// `[0, total_duration]` without changing its duration.
    ///
    /// The end is rebuilt as `start + duration`, so `end - start` matches
    /// the original duration up to one rounding of the new end (bit-exact
    /// when the times are representable, e.g. frame-aligned binary
    /// fractions).
    pub fn shift_word(&self, word: TimeRange, delta: f64, total_duration: f64) -> TimeRange {
        if !delta.is_finite() || !word.start.is_finite() || !word.end.is_finite() {
            return word;
        }
        let duration = word.duration();
        let latest_start = if total_duration.is_finite() {
            (total_duration - duration).max(0.0)
        } else {
            f64::MAX
        };
        let start = (word.start + delta).clamp(0.0, latest_start);
        TimeRange::new(start, start + duration)
    }

    /// Clamp a playhead time into `[0, duration]`.
    pub fn clamp_playhead(&self, time: f64, duration: f64) -> f64 {
        pin(time, 0.0, duration.max(0.0))
    }
}

/// Clamp into `[lo, hi]`; NaN candidates land on `lo`. An interval built
/// from NaN inputs leaves finite candidates untouched and maps the rest to 0.
fn pin(candidate: f64, lo: f64, hi: f64) -> f64 {
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return if candidate.is_finite() { candidate } else { 0.0 };
    }
    if candidate.is_nan() {
        return lo;
    }
    candidate.clamp(lo, hi)
}
