use clipsync_common::config::TimingLimits;
use clipsync_interaction::lookup::{find_active_index, find_active_index_linear};
use clipsync_interaction::{position_to_time, time_to_position, ClampingValidator};
use clipsync_timing_model::{Edge, TimeRange, WordNeighbors};
use proptest::prelude::*;

/// Sorted, non-overlapping ranges built from (gap, length) pairs.
fn sorted_ranges() -> impl Strategy<Value = Vec<TimeRange>> {
    prop::collection::vec((0.0f64..2.0, 0.05f64..3.0), 0..40).prop_map(|parts| {
        let mut cursor = 0.0;
        parts
            .into_iter()
            .map(|(gap, len)| {
                let start = cursor + gap;
                cursor = start + len;
                TimeRange::new(start, cursor)
            })
            .collect()
    })
}

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![Just(Edge::Start), Just(Edge::End)]
}

proptest! {
    #[test]
    fn validate_duration_matches_limits(start in -500.0f64..500.0, end in -500.0f64..500.0) {
        let limits = TimingLimits::default();
        let check = ClampingValidator::new(limits).validate_duration(start, end);
        let duration = end - start;
        let expected = limits.min_clip_secs <= duration && duration <= limits.max_clip_secs;
        prop_assert_eq!(check.valid, expected);
        prop_assert_eq!(check.error.is_none(), expected);
    }

    #[test]
    fn position_round_trip_within_one_pixel(
        fraction in 0.0f64..=1.0,
        track_width in 1.0f64..4000.0,
        zoom in 0.5f64..=4.0,
        duration in 0.1f64..10_000.0,
    ) {
        // Content narrower than the track (zoom < 1) leaves the tail of the
        // track past the end of the clip.
        let x = fraction * track_width.min(track_width * zoom);
        let time = position_to_time(x, duration, track_width, zoom);
        let back = time_to_position(time, duration, track_width, zoom);
        prop_assert!((back - x).abs() <= 1.0, "x={} back={}", x, back);
    }

    #[test]
    fn clamp_boundary_is_idempotent(
        candidate in -1000.0f64..1000.0,
        paired in -100.0f64..700.0,
        edge in edge(),
        hard_max in 0.0f64..600.0,
    ) {
        let v = ClampingValidator::default();
        let once = v.clamp_boundary(candidate, paired, edge, hard_max);
        let twice = v.clamp_boundary(once, paired, edge, hard_max);
        prop_assert_eq!(once, twice);
        prop_assert!(once >= 0.0 && once <= hard_max);
    }

    #[test]
    fn clamp_boundary_keeps_valid_durations(
        start in 0.0f64..300.0,
        candidate in -100.0f64..800.0,
    ) {
        // With room on both sides the clamped end always forms a valid clip.
        let v = ClampingValidator::default();
        let limits = v.limits();
        let end = v.clamp_boundary(candidate, start, Edge::End, 600.0);
        let duration = end - start;
        prop_assert!(duration >= limits.min_clip_secs - 1e-9);
        prop_assert!(duration <= limits.max_clip_secs + 1e-9);
    }

    #[test]
    fn clamp_word_edge_is_idempotent(
        start in 1.0f64..20.0,
        len in 0.1f64..3.0,
        candidate in -5.0f64..40.0,
        edge in edge(),
    ) {
        let v = ClampingValidator::default();
        let word = TimeRange::new(start, start + len);
        let neighbors = WordNeighbors {
            previous: Some(TimeRange::new(0.0, start - 0.5)),
            next: Some(TimeRange::new(start + len + 0.5, start + len + 1.0)),
        };
        let once = v.clamp_word_edge(candidate, edge, word, neighbors, 30.0);
        let twice = v.clamp_word_edge(once, edge, word, neighbors, 30.0);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn word_move_preserves_duration(
        start in 0.0f64..50.0,
        len in 0.1f64..5.0,
        delta in -200.0f64..200.0,
    ) {
        let total = 60.0;
        let v = ClampingValidator::default();
        let word = TimeRange::new(start, start + len);
        let moved = v.shift_word(word, delta, total);
        // One rounding of the rebuilt end, at most.
        let drift = (moved.duration() - word.duration()).abs();
        prop_assert!(drift <= 2.0 * f64::EPSILON * total, "drift {}", drift);
        prop_assert!(moved.start >= 0.0);
        prop_assert!(moved.end <= total + 1e-9);
    }

    #[test]
    fn lookup_finds_at_most_one_and_agrees_with_scan(
        ranges in sorted_ranges(),
        time in -1.0f64..200.0,
    ) {
        let hits = ranges.iter().filter(|r| r.contains(time)).count();
        prop_assert!(hits <= 1);

        let binary = find_active_index(&ranges, time);
        prop_assert_eq!(binary, find_active_index_linear(&ranges, time));
        prop_assert_eq!(binary.is_some(), hits == 1);
    }
}
