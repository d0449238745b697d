//! Tick limiting and time-unit helpers.
//!
//! Playback time-updates can arrive faster than the display refreshes.
//! Everything downstream of a tick (caption lookup, overlay composition,
//! waveform clipping) only needs to run once per displayed frame, so ticks
//! are admitted through a [`TickLimiter`].
//!
//! Interaction timestamps are plain monotonic nanosecond counts supplied by
//! the host, which keeps the limiter and the debounce logic deterministic.

/// Monotonic nanoseconds supplied by the host event loop.
pub type MonotonicNs = u64;

/// Convert nanoseconds to fractional seconds.
pub fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / 1_000_000_000.0
}

/// Convert fractional seconds to nanoseconds. Negative input saturates to 0.
pub fn secs_to_ns(secs: f64) -> u64 {
    (secs.max(0.0) * 1_000_000_000.0) as u64
}

/// Convert milliseconds to nanoseconds.
pub fn ms_to_ns(ms: u64) -> u64 {
    ms.saturating_mul(1_000_000)
}

/// Admits ticks at no more than a target rate.
#[derive(Debug, Clone)]
pub struct TickLimiter {
    min_interval_ns: u64,
    last_tick_ns: Option<u64>,
    dropped: u64,
}

impl TickLimiter {
    /// Create a limiter admitting at most `max_hz` ticks per second.
    /// A zero rate admits every tick.
    pub fn new(max_hz: u32) -> Self {
        let min_interval_ns = if max_hz == 0 {
            0
        } else {
            1_000_000_000 / max_hz as u64
        };
        Self {
            min_interval_ns,
            last_tick_ns: None,
            dropped: 0,
        }
    }

    /// Returns true and records the tick if enough time has passed.
    /// The first call always returns true.
    pub fn admit(&mut self, now_ns: MonotonicNs) -> bool {
        match self.last_tick_ns {
            // A clock that went backwards (host restarted its timeline) is
            // treated as a fresh start.
            Some(last) if now_ns >= last && now_ns - last < self.min_interval_ns => {
                self.dropped += 1;
                false
            }
            _ => {
                self.last_tick_ns = Some(now_ns);
                true
            }
        }
    }

    /// Forget the last admitted tick so the next one passes.
    pub fn reset(&mut self) {
        self.last_tick_ns = None;
    }

    /// Minimum spacing between admitted ticks in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.min_interval_ns
    }

    /// Number of ticks rejected so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
