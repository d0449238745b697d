//! Half-open time intervals.

use serde::{Deserialize, Serialize};

/// A `[start, end)` interval in seconds.
///
/// Well-formed ranges satisfy `end > start`; construction does not enforce
/// it so that caption files with bad data can still be loaded and reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Both edges are finite and `end > start`.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.end > self.start
    }

    /// Closed-open membership: `start <= t < end`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// The same interval moved by `delta` seconds.
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.start + delta + self.duration(),
        }
    }

    /// Whether two ranges share any instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Anything that occupies a time range on the timeline.
pub trait Timed {
    fn range(&self) -> TimeRange;
}

impl Timed for TimeRange {
    fn range(&self) -> TimeRange {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_closed_open() {
        let r = TimeRange::new(1.0, 2.0);
        assert!(r.contains(1.0));
        assert!(r.contains(1.999));
        assert!(!r.contains(2.0));
        assert!(!r.contains(0.999));
    }

    #[test]
    fn test_validity() {
        assert!(TimeRange::new(0.0, 0.1).is_valid());
        assert!(!TimeRange::new(1.0, 1.0).is_valid());
        assert!(!TimeRange::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_shift_keeps_duration() {
        let r = TimeRange::new(2.0, 2.5).shifted(-1.25);
        assert!((r.start - 0.75).abs() < 1e-12);
        assert!((r.duration() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let a = TimeRange::new(0.0, 1.0);
        let b = TimeRange::new(1.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&TimeRange::new(0.5, 1.5)));
    }
}
