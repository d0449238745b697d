//! Playback time -> active caption segment / word.
//!
//! Items must be time-sorted and mutually non-overlapping. Membership is
//! closed-open (`start <= t < end`) for segments and words alike, so at a
//! shared boundary exactly the later item is active.

use clipsync_timing_model::{CaptionSegment, Timed, Word};

/// Index of the item active at `time`, by binary search.
pub fn find_active_index<T: Timed>(items: &[T], time: f64) -> Option<usize> {
    if !time.is_finite() {
        return None;
    }
    let after = items.partition_point(|item| item.range().start <= time);
    let candidate = after.checked_sub(1)?;
    items[candidate].range().contains(time).then_some(candidate)
}

/// Index of the item active at `time`, by linear scan. Produces the same
/// answer as [`find_active_index`]; kept for small collections and as a
/// reference in tests.
pub fn find_active_index_linear<T: Timed>(items: &[T], time: f64) -> Option<usize> {
    if !time.is_finite() {
        return None;
    }
    items.iter().position(|item| item.range().contains(time))
}

/// The caption segment active at `time`.
pub fn find_active_segment(segments: &[CaptionSegment], time: f64) -> Option<&CaptionSegment> {
    find_active_index(segments, time).map(|i| &segments[i])
}

/// Index of the word active at `time` within one segment's words.
pub fn find_active_word(words: &[Word], time: f64) -> Option<usize> {
    find_active_index(words, time)
}

/// Lookup that remembers the last hit.
///
/// During normal playback consecutive ticks usually land in the same or
/// the next item, so those are checked before falling back to a binary
/// search. Results are identical to [`find_active_index`].
#[derive(Debug, Clone, Default)]
pub struct LookupCursor {
    last: Option<usize>,
}

impl LookupCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find<T: Timed>(&mut self, items: &[T], time: f64) -> Option<usize> {
        if !time.is_finite() {
            self.last = None;
            return None;
        }
        if let Some(last) = self.last {
            for idx in [last, last + 1] {
                if items.get(idx).is_some_and(|item| item.range().contains(time)) {
                    self.last = Some(idx);
                    return Some(idx);
                }
            }
        }
        let found = find_active_index(items, time);
        if found.is_some() {
            self.last = found;
        }
        found
    }

    /// Forget the remembered position, e.g. after the collection changed.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
