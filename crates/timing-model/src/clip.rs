//! Clip metadata and trim boundaries.

use serde::{Deserialize, Serialize};

use crate::range::TimeRange;

/// Source video metadata supplied by the playback collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipMetadata {
    pub duration_seconds: f64,
    pub source_url: String,
}

impl ClipMetadata {
    pub fn new(duration_seconds: f64, source_url: impl Into<String>) -> Self {
        Self {
            duration_seconds,
            source_url: source_url.into(),
        }
    }

    /// Duration usable for coordinate mapping; non-finite or negative
    /// durations collapse to zero.
    pub fn effective_duration(&self) -> f64 {
        if self.duration_seconds.is_finite() {
            self.duration_seconds.max(0.0)
        } else {
            0.0
        }
    }
}

/// Which edge of a range is being manipulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Start => Edge::End,
            Edge::End => Edge::Start,
        }
    }
}

/// Trim markers for the exported clip.
///
/// The duration `end - start` must stay within the configured clip limits
/// at every drag frame, and both edges lie in `[0, source_duration]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBoundary {
    pub start: f64,
    pub end: f64,
    pub source_duration: f64,
}

impl ClipBoundary {
    pub fn new(start: f64, end: f64, source_duration: f64) -> Self {
        Self {
            start,
            end,
            source_duration,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Start => self.start,
            Edge::End => self.end,
        }
    }

    /// A copy with one edge replaced.
    pub fn with_edge(&self, edge: Edge, value: f64) -> Self {
        match edge {
            Edge::Start => Self {
                start: value,
                ..*self
            },
            Edge::End => Self { end: value, ..*self },
        }
    }
}
