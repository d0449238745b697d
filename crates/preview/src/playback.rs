//! Playback time tracking for the caption overlay.

use clipsync_common::clock::{MonotonicNs, TickLimiter};
use clipsync_common::config::PlaybackConfig;
use clipsync_interaction::LookupCursor;
use clipsync_timing_model::CaptionSegment;

/// Indices of the segment and word under the playhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveCaption {
    pub segment: Option<usize>,
    /// Index into the active segment's words.
    pub word: Option<usize>,
}

/// Runs the caption lookup once per admitted playback tick.
///
/// Time-updates arriving faster than `max_tick_hz` are dropped before any
/// lookup work happens.
#[derive(Debug, Clone)]
pub struct PlaybackTracker {
    limiter: TickLimiter,
    segments: LookupCursor,
    words: LookupCursor,
    active: ActiveCaption,
    time: f64,
}

impl PlaybackTracker {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            limiter: TickLimiter::new(config.max_tick_hz),
            segments: LookupCursor::new(),
            words: LookupCursor::new(),
            active: ActiveCaption::default(),
            time: 0.0,
        }
    }

    /// Feed a playback time-update received at host time `now_ns`.
    ///
    /// Returns the active caption when the tick was admitted, `None` when it
    /// was dropped by the rate limit.
    pub fn on_time_update(
        &mut self,
        now_ns: MonotonicNs,
        time: f64,
        segments: &[CaptionSegment],
    ) -> Option<ActiveCaption> {
        if !self.limiter.admit(now_ns) {
            return None;
        }
        Some(self.lookup(time, segments))
    }

    /// Look up immediately, bypassing the rate limit (e.g. after a seek).
    pub fn seek(&mut self, time: f64, segments: &[CaptionSegment]) -> ActiveCaption {
        self.limiter.reset();
        self.lookup(time, segments)
    }

    /// Forget cached positions after the caption data changed.
    pub fn invalidate(&mut self) {
        self.segments.reset();
        self.words.reset();
        self.active = ActiveCaption::default();
    }

    pub fn active(&self) -> ActiveCaption {
        self.active
    }

    /// Playback time of the last admitted tick.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.limiter.dropped()
    }

    fn lookup(&mut self, time: f64, segments: &[CaptionSegment]) -> ActiveCaption {
        self.time = time;
        let segment = self.segments.find(segments, time);
        if segment != self.active.segment {
            self.words.reset();
        }
        let word = segment.and_then(|i| self.words.find(&segments[i].words, time));

        let next = ActiveCaption { segment, word };
        if next != self.active {
            tracing::trace!(time, ?segment, ?word, "Active caption changed");
        }
        self.active = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipsync_common::clock::ms_to_ns;
    use clipsync_timing_model::Word;

    fn segments() -> Vec<CaptionSegment> {
        vec![
            CaptionSegment::from_words(
                "s1",
                vec![Word::new("a", "one", 0.0, 0.5), Word::new("b", "two", 0.5, 1.0)],
            ),
            CaptionSegment::from_words(
                "s2",
                vec![Word::new("c", "three", 1.0, 1.4), Word::new("d", "four", 1.6, 2.0)],
            ),
        ]
    }

    #[test]
    fn test_ticks_are_rate_limited() {
        let segs = segments();
        let mut tracker = PlaybackTracker::new(PlaybackConfig { max_tick_hz: 60 });

        assert!(tracker.on_time_update(0, 0.0, &segs).is_some());
        // 4ms later: well inside one 60Hz frame.
        assert!(tracker.on_time_update(ms_to_ns(4), 0.004, &segs).is_none());
        assert!(tracker.on_time_update(ms_to_ns(17), 0.017, &segs).is_some());
        assert_eq!(tracker.dropped_ticks(), 1);
    }

    #[test]
    fn test_tracks_segment_and_word() {
        let segs = segments();
        let mut tracker = PlaybackTracker::new(PlaybackConfig { max_tick_hz: 0 });

        let active = tracker.on_time_update(0, 0.6, &segs).unwrap();
        assert_eq!(
            active,
            ActiveCaption {
                segment: Some(0),
                word: Some(1)
            }
        );

        // Shared boundary: the later segment's first word.
        let active = tracker.on_time_update(1, 1.0, &segs).unwrap();
        assert_eq!(active.segment, Some(1));
        assert_eq!(active.word, Some(0));

        // Gap between words inside a segment.
        let active = tracker.on_time_update(2, 1.5, &segs).unwrap();
        assert_eq!(active.segment, Some(1));
        assert_eq!(active.word, None);

        let active = tracker.on_time_update(3, 5.0, &segs).unwrap();
        assert_eq!(active, ActiveCaption::default());
    }

    #[test]
    fn test_seek_bypasses_limit() {
        let segs = segments();
        let mut tracker = PlaybackTracker::new(PlaybackConfig::default());
        tracker.on_time_update(0, 0.0, &segs);
        let active = tracker.seek(1.7, &segs);
        assert_eq!(active.word, Some(1));
        assert_eq!(tracker.time(), 1.7);
    }
}
