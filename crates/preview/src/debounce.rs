//! Debounced style commits.
//!
//! Style controls (sliders, colour pickers) emit a mutation per input event.
//! The live preview should not re-render for every one of them, but the
//! final value must still land quickly. The first event after a commit
//! opens a burst; each event of the burst (re)schedules a single pending
//! commit `min(window, max_latency - elapsed)` from now, where `elapsed`
//! is measured from the start of the burst. A burst therefore commits once,
//! no later than `max_latency` after it started, and consecutive commits
//! are at least one window apart while `max_latency >= window`.
//!
//! [`DebounceState`] is the pure timing logic over host timestamps.
//! [`StyleUpdateDebouncer`] drives it from a tokio task and keeps a staged
//! copy of the style that updates synchronously for the control's own
//! display.

use std::time::Duration;

use clipsync_common::clock::{ms_to_ns, MonotonicNs};
use clipsync_common::config::{DebounceConfig, DragTuning, EditorConfig};
use clipsync_timing_model::{StylePatch, StyleState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// What to do with an incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceAction {
    /// Commit this event now. Only happens when the configured delay is zero.
    CommitNow,
    /// Hold the event; the pending commit fires at `deadline_ns`.
    Schedule { deadline_ns: MonotonicNs },
}

/// Debounce timing over monotonic nanosecond timestamps.
#[derive(Debug, Clone)]
pub struct DebounceState {
    window_ns: u64,
    max_latency_ns: u64,
    burst_started_at: Option<MonotonicNs>,
    last_commit_at: Option<MonotonicNs>,
    pending_deadline: Option<MonotonicNs>,
}

impl DebounceState {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            window_ns: ms_to_ns(config.debounce_window_ms),
            max_latency_ns: ms_to_ns(config.max_latency_ms),
            burst_started_at: None,
            last_commit_at: None,
            pending_deadline: None,
        }
    }

    pub fn on_event(&mut self, now_ns: MonotonicNs) -> DebounceAction {
        let burst_start = *self.burst_started_at.get_or_insert(now_ns);
        let elapsed = now_ns.saturating_sub(burst_start);
        let delay = self
            .window_ns
            .min(self.max_latency_ns.saturating_sub(elapsed));

        if delay == 0 {
            self.mark_committed(now_ns);
            return DebounceAction::CommitNow;
        }
        let deadline_ns = now_ns.saturating_add(delay);
        self.pending_deadline = Some(deadline_ns);
        DebounceAction::Schedule { deadline_ns }
    }

    /// Returns true, and records the commit, if a pending commit is due.
    pub fn fire_due(&mut self, now_ns: MonotonicNs) -> bool {
        match self.pending_deadline {
            Some(deadline) if now_ns >= deadline => {
                self.mark_committed(now_ns);
                true
            }
            _ => false,
        }
    }

    /// Record a commit made at `now_ns`; the next event opens a new burst.
    pub fn mark_committed(&mut self, now_ns: MonotonicNs) {
        self.last_commit_at = Some(now_ns);
        self.pending_deadline = None;
        self.burst_started_at = None;
    }

    pub fn pending_deadline(&self) -> Option<MonotonicNs> {
        self.pending_deadline
    }

    pub fn last_commit_at(&self) -> Option<MonotonicNs> {
        self.last_commit_at
    }

    /// Drop the pending commit and end the burst without committing.
    pub fn cancel(&mut self) {
        self.pending_deadline = None;
        self.burst_started_at = None;
    }
}

/// Receiver of committed styles (the live preview).
pub trait StyleSink: Send + 'static {
    fn on_style_change(&mut self, style: &StyleState);
}

impl<F> StyleSink for F
where
    F: FnMut(&StyleState) + Send + 'static,
{
    fn on_style_change(&mut self, style: &StyleState) {
        self(style)
    }
}

#[derive(Debug)]
enum DebounceMessage {
    Update(StyleState),
    Flush,
    Shutdown,
}

/// Style debouncer owning its timer task.
///
/// Must be created inside a tokio runtime. Dropping it aborts the timer
/// task and discards any pending commit.
pub struct StyleUpdateDebouncer {
    staged: StyleState,
    tuning: DragTuning,
    tx: mpsc::UnboundedSender<DebounceMessage>,
    task: Option<JoinHandle<()>>,
}

impl StyleUpdateDebouncer {
    /// Debounce with `config.style`; font sizes follow `config.drag`.
    pub fn new(config: &EditorConfig, initial: StyleState, sink: impl StyleSink) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let origin = Instant::now();
        let task = tokio::spawn(run_debouncer(config.style, origin, rx, sink));

        Self {
            staged: initial.sanitized(&config.drag),
            tuning: config.drag,
            tx,
            task: Some(task),
        }
    }

    /// The style as the control should display it right now.
    pub fn staged(&self) -> &StyleState {
        &self.staged
    }

    /// Apply a partial edit to the staged style and queue it for commit.
    pub fn update(&mut self, patch: &StylePatch) -> &StyleState {
        if patch.is_empty() {
            return &self.staged;
        }
        self.staged.apply(patch);
        self.staged = self.staged.sanitized(&self.tuning);
        self.send(DebounceMessage::Update(self.staged.clone()));
        &self.staged
    }

    /// Replace the staged style with a full snapshot and queue it.
    pub fn replace(&mut self, style: StyleState) -> &StyleState {
        self.staged = style.sanitized(&self.tuning);
        self.send(DebounceMessage::Update(self.staged.clone()));
        &self.staged
    }

    /// Commit any pending style immediately.
    pub fn flush(&self) {
        self.send(DebounceMessage::Flush);
    }

    /// Stop the timer task. A pending commit is discarded.
    pub async fn shutdown(mut self) {
        self.send(DebounceMessage::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Style debouncer task ended abnormally");
            }
        }
    }

    fn send(&self, message: DebounceMessage) {
        if self.tx.send(message).is_err() {
            tracing::warn!("Style debouncer task is gone; dropping update");
        }
    }
}

impl Drop for StyleUpdateDebouncer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn elapsed_ns(origin: Instant) -> MonotonicNs {
    Instant::now()
        .saturating_duration_since(origin)
        .as_nanos()
        .min(u64::MAX as u128) as u64
}

async fn run_debouncer(
    config: DebounceConfig,
    origin: Instant,
    mut rx: mpsc::UnboundedReceiver<DebounceMessage>,
    mut sink: impl StyleSink,
) {
    let mut state = DebounceState::new(config);
    let mut pending: Option<StyleState> = None;

    loop {
        let deadline = state
            .pending_deadline()
            .map(|ns| origin + Duration::from_nanos(ns));

        tokio::select! {
            message = rx.recv() => match message {
                Some(DebounceMessage::Update(style)) => {
                    let now = elapsed_ns(origin);
                    match state.on_event(now) {
                        DebounceAction::CommitNow => {
                            pending = None;
                            commit(&mut sink, &style);
                        }
                        DebounceAction::Schedule { deadline_ns } => {
                            tracing::trace!(deadline_ns, "Style commit scheduled");
                            pending = Some(style);
                        }
                    }
                }
                Some(DebounceMessage::Flush) => {
                    if let Some(style) = pending.take() {
                        state.mark_committed(elapsed_ns(origin));
                        commit(&mut sink, &style);
                    }
                }
                Some(DebounceMessage::Shutdown) | None => {
                    if pending.take().is_some() {
                        tracing::debug!("Discarding pending style commit on shutdown");
                    }
                    state.cancel();
                    break;
                }
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or(origin)), if deadline.is_some() => {
                if state.fire_due(elapsed_ns(origin)) {
                    if let Some(style) = pending.take() {
                        commit(&mut sink, &style);
                    }
                }
            }
        }
    }
}

fn commit(sink: &mut impl StyleSink, style: &StyleState) {
    tracing::debug!(
        font_size = style.font_size,
        animation = ?style.animation,
        "Committing style"
    );
    sink.on_style_change(style);
}
