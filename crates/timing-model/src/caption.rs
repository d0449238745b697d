//! Caption segments and word-level timing.
//!
//! Caption files are JSON documents of the form:
//!
//! ```text
//! { "segments": [
//!     { "id": "s1", "start": 0.0, "end": 2.0, "text": "Hello there",
//!       "words": [ { "id": "w1", "text": "Hello", "start": 0.0, "end": 0.6 }, ... ] }
//! ] }
//! ```
//!
//! Segments and the words inside each segment are expected to be
//! time-sorted and non-overlapping. [`CaptionTrack::validate`] reports
//! violations as a list of issues instead of failing the load.

use std::fmt;
use std::path::Path;

use clipsync_common::error::{ClipsyncError, ClipsyncResult};
use serde::{Deserialize, Serialize};

use crate::range::{TimeRange, Timed};

/// A single timed word inside a caption segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub text: String,
    #[serde(flatten)]
    pub range: TimeRange,
    /// Emphasised by the highlight colour when highlighting is enabled.
    #[serde(default)]
    pub highlight: bool,
}

/// A caption line with its words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub id: String,
    #[serde(flatten)]
    pub range: TimeRange,
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Timed for Word {
    fn range(&self) -> TimeRange {
        self.range
    }
}

impl Timed for CaptionSegment {
    fn range(&self) -> TimeRange {
        self.range
    }
}

impl Word {
    pub fn new(id: impl Into<String>, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            range: TimeRange::new(start, end),
            highlight: false,
        }
    }
}

impl CaptionSegment {
    /// Build a segment whose range spans its words.
    pub fn from_words(id: impl Into<String>, words: Vec<Word>) -> Self {
        let start = words.first().map(|w| w.range.start).unwrap_or(0.0);
        let end = words.last().map(|w| w.range.end).unwrap_or(start);
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            id: id.into(),
            range: TimeRange::new(start, end),
            text,
            words,
        }
    }
}

/// The time ranges of the words either side of a given word.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WordNeighbors {
    pub previous: Option<TimeRange>,
    pub next: Option<TimeRange>,
}

/// The full caption collection for a clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    pub segments: Vec<CaptionSegment>,
}

impl CaptionTrack {
    pub fn new(segments: Vec<CaptionSegment>) -> Self {
        Self { segments }
    }

    /// Parse a caption document from JSON.
    pub fn from_json(json: &str) -> ClipsyncResult<Self> {
        serde_json::from_str(json).map_err(|e| ClipsyncError::captions(e.to_string()))
    }

    /// Load a caption document from disk.
    pub fn load(path: &Path) -> ClipsyncResult<Self> {
        if !path.exists() {
            return Err(ClipsyncError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let track = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            segments = track.segments.len(),
            words = track.word_count(),
            "Loaded captions"
        );
        Ok(track)
    }

    /// Serialize the track to pretty JSON.
    pub fn to_json(&self) -> ClipsyncResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// End of the last segment, or 0 for an empty track.
    pub fn end_secs(&self) -> f64 {
        self.segments.last().map(|s| s.range.end).unwrap_or(0.0)
    }

    /// Locate a word by id as `(segment_index, word_index)`.
    pub fn find_word(&self, word_id: &str) -> Option<(usize, usize)> {
        self.segments.iter().enumerate().find_map(|(si, segment)| {
            segment
                .words
                .iter()
                .position(|w| w.id == word_id)
                .map(|wi| (si, wi))
        })
    }

    pub fn word(&self, word_id: &str) -> Option<&Word> {
        let (si, wi) = self.find_word(word_id)?;
        Some(&self.segments[si].words[wi])
    }

    /// Ranges of the words adjacent to `word_id` within its segment.
    pub fn word_neighbors(&self, word_id: &str) -> Option<WordNeighbors> {
        let (si, wi) = self.find_word(word_id)?;
        let words = &self.segments[si].words;
        Some(WordNeighbors {
            previous: wi.checked_sub(1).map(|i| words[i].range),
            next: words.get(wi + 1).map(|w| w.range),
        })
    }

    /// Apply a committed word timing. Returns false if the word is unknown.
    pub fn apply_word_timing(&mut self, word_id: &str, start: f64, end: f64) -> bool {
        let Some((si, wi)) = self.find_word(word_id) else {
            return false;
        };
        self.segments[si].words[wi].range = TimeRange::new(start, end);
        true
    }

    /// Check ordering and duration invariants.
    pub fn validate(&self, word_min_duration_secs: f64) -> Vec<CaptionIssue> {
        let mut issues = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            if !segment.range.is_valid() {
                issues.push(CaptionIssue::EmptyRange {
                    id: segment.id.clone(),
                });
            }
            if i > 0 {
                let prev = &self.segments[i - 1];
                if segment.range.start < prev.range.start {
                    issues.push(CaptionIssue::OutOfOrder {
                        id: segment.id.clone(),
                    });
                } else if segment.range.overlaps(&prev.range) {
                    issues.push(CaptionIssue::Overlap {
                        first: prev.id.clone(),
                        second: segment.id.clone(),
                    });
                }
            }

            for (wi, word) in segment.words.iter().enumerate() {
                // Small tolerance for rounding in exported transcripts.
                if word.range.duration() + 1e-9 < word_min_duration_secs {
                    issues.push(CaptionIssue::WordTooShort {
                        id: word.id.clone(),
                        duration_secs: word.range.duration(),
                    });
                }
                if wi > 0 {
                    let prev = &segment.words[wi - 1];
                    if word.range.start < prev.range.start {
                        issues.push(CaptionIssue::OutOfOrder {
                            id: word.id.clone(),
                        });
                    } else if word.range.overlaps(&prev.range) {
                        issues.push(CaptionIssue::Overlap {
                            first: prev.id.clone(),
                            second: word.id.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}

/// A data problem found while validating captions.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionIssue {
    /// A segment whose end does not follow its start.
    EmptyRange { id: String },
    /// An item that starts before its predecessor.
    OutOfOrder { id: String },
    /// Two consecutive items sharing time.
    Overlap { first: String, second: String },
    /// A word shorter than the minimum word duration.
    WordTooShort { id: String, duration_secs: f64 },
}

impl fmt::Display for CaptionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionIssue::EmptyRange { id } => write!(f, "{id}: end is not after start"),
            CaptionIssue::OutOfOrder { id } => write!(f, "{id}: starts before its predecessor"),
            CaptionIssue::Overlap { first, second } => write!(f, "{first} overlaps {second}"),
            CaptionIssue::WordTooShort { id, duration_secs } => {
                write!(f, "{id}: word lasts only {duration_secs:.3}s")
            }
        }
    }
}
