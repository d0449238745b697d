//! Pointer-drag state machine.
//!
//! ```text
//!            pointer-down on handle
//!   Idle ─────────────────────────────▶ Dragging(kind)
//!    ▲                                     │  pointer-move: map → clamp → stage
//!    │   pointer-up / pointer-cancel       │
//!    └──── (commit once if changed) ◀──────┤
//!    └──── teardown (no commit) ◀──────────┘
//! ```
//!
//! At most one session exists; a pointer-down while dragging is ignored.
//! Global pointer listeners are attached when a session starts and detached
//! when it ends, whichever way it ends.
//!
//! Moves only update the staged value. The external commit callback sees
//! one [`DragCommit`] per completed session, and only when the value moved.

use clipsync_common::config::{DragTuning, EditorConfig};
use clipsync_timing_model::{
    CanvasPosition, ClipBoundary, ContainerSize, Edge, TimeRange, WordNeighbors,
};
use serde::{Deserialize, Serialize};

use crate::clamp::ClampingValidator;
use crate::coords::TrackGeometry;

/// A pointer position in pixels, local to the surface the handle lives on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Every draggable handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    Playhead,
    BoundaryStart,
    BoundaryEnd,
    WordStart,
    WordEnd,
    WordMove,
    FreePosition,
    ResizeHandle,
}

/// The handle that was pressed, with the state it had at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Playhead {
        time: f64,
        geometry: TrackGeometry,
    },
    Boundary {
        edge: Edge,
        boundary: ClipBoundary,
        geometry: TrackGeometry,
    },
    WordEdge {
        word_id: String,
        edge: Edge,
        range: TimeRange,
        neighbors: WordNeighbors,
        geometry: TrackGeometry,
    },
    WordMove {
        word_id: String,
        range: TimeRange,
        geometry: TrackGeometry,
    },
    FreePosition {
        position: CanvasPosition,
        container: ContainerSize,
    },
    Resize {
        font_size: f64,
    },
}

impl DragTarget {
    pub fn kind(&self) -> DragKind {
        match self {
            DragTarget::Playhead { .. } => DragKind::Playhead,
            DragTarget::Boundary {
                edge: Edge::Start, ..
            } => DragKind::BoundaryStart,
            DragTarget::Boundary { edge: Edge::End, .. } => DragKind::BoundaryEnd,
            DragTarget::WordEdge {
                edge: Edge::Start, ..
            } => DragKind::WordStart,
            DragTarget::WordEdge { edge: Edge::End, .. } => DragKind::WordEnd,
            DragTarget::WordMove { .. } => DragKind::WordMove,
            DragTarget::FreePosition { .. } => DragKind::FreePosition,
            DragTarget::Resize { .. } => DragKind::ResizeHandle,
        }
    }

    /// The value the session starts from.
    fn initial_value(&self) -> StagedValue {
        match self {
            DragTarget::Playhead { time, .. } => StagedValue::Time(*time),
            DragTarget::Boundary { boundary, .. } => StagedValue::Boundary(*boundary),
            DragTarget::WordEdge { word_id, range, .. }
            | DragTarget::WordMove { word_id, range, .. } => StagedValue::Word {
                word_id: word_id.clone(),
                range: *range,
            },
            DragTarget::FreePosition { position, .. } => StagedValue::Position(*position),
            DragTarget::Resize { font_size } => StagedValue::FontSize(*font_size),
        }
    }
}

/// The locally held value of an in-progress drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StagedValue {
    Time(f64),
    Boundary(ClipBoundary),
    Word { word_id: String, range: TimeRange },
    Position(CanvasPosition),
    FontSize(f64),
}

impl StagedValue {
    fn is_finite(&self) -> bool {
        match self {
            StagedValue::Time(t) | StagedValue::FontSize(t) => t.is_finite(),
            StagedValue::Boundary(b) => b.start.is_finite() && b.end.is_finite(),
            StagedValue::Word { range, .. } => range.start.is_finite() && range.end.is_finite(),
            StagedValue::Position(p) => p.is_finite(),
        }
    }

    fn into_commit(self) -> DragCommit {
        match self {
            StagedValue::Time(time) => DragCommit::Seek { time },
            StagedValue::Boundary(b) => DragCommit::BoundaryChange {
                start: b.start,
                end: b.end,
            },
            StagedValue::Word { word_id, range } => DragCommit::WordTimingChange {
                word_id,
                start: range.start,
                end: range.end,
            },
            StagedValue::Position(position) => DragCommit::PositionChange { position },
            StagedValue::FontSize(size) => DragCommit::FontSizeChange { size },
        }
    }
}

/// A finalized value for an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragCommit {
    Seek { time: f64 },
    BoundaryChange { start: f64, end: f64 },
    WordTimingChange { word_id: String, start: f64, end: f64 },
    PositionChange { position: CanvasPosition },
    FontSizeChange { size: f64 },
}

/// Receiver of committed edits.
pub trait CommitSink {
    fn on_boundary_change(&mut self, start: f64, end: f64);

    fn on_word_timing_change(&mut self, word_id: &str, start: f64, end: f64);

    fn on_seek(&mut self, time: f64);

    fn on_position_change(&mut self, _position: CanvasPosition) {}

    fn on_font_size_change(&mut self, _size: f64) {}
}

impl DragCommit {
    /// Deliver this commit to the matching callback.
    pub fn dispatch(&self, sink: &mut dyn CommitSink) {
        match self {
            DragCommit::Seek { time } => sink.on_seek(*time),
            DragCommit::BoundaryChange { start, end } => sink.on_boundary_change(*start, *end),
            DragCommit::WordTimingChange {
                word_id,
                start,
                end,
            } => sink.on_word_timing_change(word_id, *start, *end),
            DragCommit::PositionChange { position } => sink.on_position_change(*position),
            DragCommit::FontSizeChange { size } => sink.on_font_size_change(*size),
        }
    }
}

/// Subscription to global pointer-move/up/cancel events, held for the
/// lifetime of a session.
pub trait PointerListeners {
    fn attach(&mut self, kind: DragKind);

    fn detach(&mut self);
}

/// Listener hooks for hosts that route pointer events themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoListeners;

impl PointerListeners for NoListeners {
    fn attach(&mut self, _kind: DragKind) {}

    fn detach(&mut self) {}
}

#[derive(Debug, Clone)]
struct DragSession {
    target: DragTarget,
    origin: PointerPos,
    staged: StagedValue,
}

#[derive(Debug, Clone)]
enum DragState {
    Idle,
    Dragging(DragSession),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Release,
    Teardown,
}

/// Single-session drag controller for timeline and canvas handles.
pub struct DragController {
    state: DragState,
    validator: ClampingValidator,
    tuning: DragTuning,
    listeners: Box<dyn PointerListeners>,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("state", &self.state)
            .field("validator", &self.validator)
            .field("tuning", &self.tuning)
            .finish_non_exhaustive()
    }
}

impl DragController {
    pub fn new(
        validator: ClampingValidator,
        tuning: DragTuning,
        listeners: Box<dyn PointerListeners>,
    ) -> Self {
        Self {
            state: DragState::Idle,
            validator,
            tuning,
            listeners,
        }
    }

    /// Controller with limits taken from the editor config.
    pub fn from_config(config: &EditorConfig, listeners: Box<dyn PointerListeners>) -> Self {
        Self::new(ClampingValidator::new(config.timing), config.drag, listeners)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Kind of the active session, if any.
    pub fn kind(&self) -> Option<DragKind> {
        match &self.state {
            DragState::Dragging(session) => Some(session.target.kind()),
            DragState::Idle => None,
        }
    }

    /// The staged value of the active session, for immediate feedback.
    pub fn staged(&self) -> Option<&StagedValue> {
        match &self.state {
            DragState::Dragging(session) => Some(&session.staged),
            DragState::Idle => None,
        }
    }

    /// Start a session. Returns false, leaving any active session untouched,
    /// when another session is running or the pointer position is unusable.
    pub fn pointer_down(&mut self, target: DragTarget, pointer: PointerPos) -> bool {
        if let DragState::Dragging(session) = &self.state {
            tracing::trace!(
                active = ?session.target.kind(),
                ignored = ?target.kind(),
                "Ignoring pointer-down during active drag"
            );
            return false;
        }
        if !pointer.is_finite() {
            tracing::debug!(kind = ?target.kind(), "Ignoring pointer-down with invalid position");
            return false;
        }

        let kind = target.kind();
        let staged = target.initial_value();
        self.listeners.attach(kind);
        self.state = DragState::Dragging(DragSession {
            target,
            origin: pointer,
            staged,
        });
        tracing::debug!(?kind, x = pointer.x, y = pointer.y, "Drag started");
        true
    }

    /// Feed a global pointer-move. Returns the staged value after the move,
    /// or `None` when no session is active.
    pub fn pointer_move(&mut self, pointer: PointerPos) -> Option<&StagedValue> {
        let validator = self.validator;
        let tuning = self.tuning;
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };

        if pointer.is_finite() {
            if let Some(next) = stage_move(&validator, &tuning, session, pointer) {
                if next.is_finite() {
                    session.staged = next;
                }
            }
        }
        Some(&session.staged)
    }

    /// Feed a pointer-up at `pointer`. Ends the session and returns the
    /// commit, if the value changed.
    pub fn pointer_up(&mut self, pointer: PointerPos) -> Option<DragCommit> {
        self.pointer_move(pointer);
        self.end_session(SessionEnd::Release)
    }

    /// Feed a pointer-cancel. Ends the session with the last staged value.
    pub fn pointer_cancel(&mut self) -> Option<DragCommit> {
        self.end_session(SessionEnd::Release)
    }

    /// Release listeners and drop any session without committing.
    pub fn teardown(&mut self) {
        self.end_session(SessionEnd::Teardown);
    }

    /// Seek from a click on the track when no drag is running.
    pub fn click_to_seek(&self, geometry: &TrackGeometry, x: f64) -> Option<DragCommit> {
        if self.is_dragging() || !geometry.is_usable() || !x.is_finite() {
            return None;
        }
        Some(DragCommit::Seek {
            time: geometry.position_to_time(x),
        })
    }

    fn end_session(&mut self, end: SessionEnd) -> Option<DragCommit> {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return None;
        };
        self.listeners.detach();

        let kind = session.target.kind();
        if end == SessionEnd::Teardown {
            tracing::debug!(?kind, "Drag torn down without commit");
            return None;
        }

        let initial = session.target.initial_value();
        let last_good = session.staged.clone();
        let final_value = finalize(&self.validator, &self.tuning, &session.target, session.staged);
        let final_value = if final_value.is_finite() {
            final_value
        } else {
            last_good
        };
        if final_value == initial {
            tracing::debug!(?kind, "Drag ended without change");
            return None;
        }

        let commit = final_value.into_commit();
        tracing::debug!(?kind, ?commit, "Drag committed");
        Some(commit)
    }
}

impl Drop for DragController {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Compute the staged value for a move, or `None` if the input cannot be
/// mapped (the caller then keeps the last known-good value).
fn stage_move(
    validator: &ClampingValidator,
    tuning: &DragTuning,
    session: &DragSession,
    pointer: PointerPos,
) -> Option<StagedValue> {
    let dx = pointer.x - session.origin.x;
    let dy = pointer.y - session.origin.y;

    match &session.target {
        DragTarget::Playhead { geometry, .. } => {
            usable(geometry)?;
            let time = geometry.position_to_time(pointer.x);
            Some(StagedValue::Time(
                validator.clamp_playhead(time, geometry.duration),
            ))
        }
        DragTarget::Boundary {
            edge,
            boundary,
            geometry,
        } => {
            usable(geometry)?;
            let candidate = geometry.position_to_time(pointer.x);
            let paired = boundary.edge(edge.opposite());
            let value =
                validator.clamp_boundary(candidate, paired, *edge, boundary.source_duration);
            Some(StagedValue::Boundary(boundary.with_edge(*edge, value)))
        }
        DragTarget::WordEdge {
            word_id,
            edge,
            range,
            neighbors,
            geometry,
        } => {
            usable(geometry)?;
            let candidate = geometry.position_to_time(pointer.x);
            let value =
                validator.clamp_word_edge(candidate, *edge, *range, *neighbors, geometry.duration);
            let range = match edge {
                Edge::Start => TimeRange::new(value, range.end),
                Edge::End => TimeRange::new(range.start, value),
            };
            Some(StagedValue::Word {
                word_id: word_id.clone(),
                range,
            })
        }
        DragTarget::WordMove {
            word_id,
            range,
            geometry,
        } => {
            usable(geometry)?;
            let delta = geometry.delta_to_time(dx);
            Some(StagedValue::Word {
                word_id: word_id.clone(),
                range: validator.shift_word(*range, delta, geometry.duration),
            })
        }
        DragTarget::FreePosition {
            position,
            container,
        } => {
            let moved = position.offset_by_pixels(dx, dy, *container)?;
            Some(StagedValue::Position(
                moved.clamped(tuning.free_x_pct, tuning.free_y_pct),
            ))
        }
        DragTarget::Resize { font_size } => {
            let size = font_size + dy * tuning.resize_sensitivity;
            Some(StagedValue::FontSize(tuning.clamp_font_size(size)))
        }
    }
}

/// Re-validate the staged value once more before it is committed.
fn finalize(
    validator: &ClampingValidator,
    tuning: &DragTuning,
    target: &DragTarget,
    staged: StagedValue,
) -> StagedValue {
    match (target, staged) {
        (DragTarget::Playhead { geometry, .. }, StagedValue::Time(t)) => {
            StagedValue::Time(validator.clamp_playhead(t, geometry.duration))
        }
        (DragTarget::Boundary { edge, boundary, .. }, StagedValue::Boundary(staged)) => {
            let paired = staged.edge(edge.opposite());
            let value = validator.clamp_boundary(
                staged.edge(*edge),
                paired,
                *edge,
                boundary.source_duration,
            );
            StagedValue::Boundary(staged.with_edge(*edge, value))
        }
        (
            DragTarget::WordEdge {
                edge,
                range: initial,
                neighbors,
                geometry,
                ..
            },
            StagedValue::Word { word_id, range },
        ) => {
            let candidate = match edge {
                Edge::Start => range.start,
                Edge::End => range.end,
            };
            let value = validator.clamp_word_edge(
                candidate,
                *edge,
                *initial,
                *neighbors,
                geometry.duration,
            );
            let range = match edge {
                Edge::Start => TimeRange::new(value, initial.end),
                Edge::End => TimeRange::new(initial.start, value),
            };
            StagedValue::Word { word_id, range }
        }
        (DragTarget::FreePosition { .. }, StagedValue::Position(p)) => {
            StagedValue::Position(p.clamped(tuning.free_x_pct, tuning.free_y_pct))
        }
        (DragTarget::Resize { .. }, StagedValue::FontSize(size)) => {
            StagedValue::FontSize(tuning.clamp_font_size(size))
        }
        // WordMove keeps its exact duration; it was already bounded per move.
        (_, staged) => staged,
    }
}

fn usable(geometry: &TrackGeometry) -> Option<()> {
    geometry.is_usable().then_some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct ListenerLog {
        attached: Vec<DragKind>,
        detached: usize,
    }

    struct RecordingListeners(Rc<RefCell<ListenerLog>>);

    impl PointerListeners for RecordingListeners {
        fn attach(&mut self, kind: DragKind) {
            self.0.borrow_mut().attached.push(kind);
        }

        fn detach(&mut self) {
            self.0.borrow_mut().detached += 1;
        }
    }

    fn controller() -> (DragController, Rc<RefCell<ListenerLog>>) {
        let log = Rc::new(RefCell::new(ListenerLog::default()));
        let ctrl = DragController::new(
            ClampingValidator::default(),
            DragTuning::default(),
            Box::new(RecordingListeners(log.clone())),
        );
        (ctrl, log)
    }

    fn geometry() -> TrackGeometry {
        // 10px per second.
        TrackGeometry::new(60.0, 600.0, 1.0)
    }

    #[test]
    fn test_playhead_drag_commits_seek() {
        let (mut ctrl, log) = controller();
        assert!(ctrl.pointer_down(
            DragTarget::Playhead {
                time: 0.0,
                geometry: geometry()
            },
            PointerPos::new(0.0, 0.0)
        ));
        assert_eq!(ctrl.kind(), Some(DragKind::Playhead));

        let staged = ctrl.pointer_move(PointerPos::new(250.0, 3.0)).cloned();
        assert_eq!(staged, Some(StagedValue::Time(25.0)));

        let commit = ctrl.pointer_up(PointerPos::new(300.0, 3.0));
        assert_eq!(commit, Some(DragCommit::Seek { time: 30.0 }));
        assert!(!ctrl.is_dragging());

        let log = log.borrow();
        assert_eq!(log.attached, vec![DragKind::Playhead]);
        assert_eq!(log.detached, 1);
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let (mut ctrl, log) = controller();
        assert!(ctrl.pointer_down(
            DragTarget::Resize { font_size: 30.0 },
            PointerPos::new(0.0, 0.0)
        ));
        assert!(!ctrl.pointer_down(
            DragTarget::Playhead {
                time: 0.0,
                geometry: geometry()
            },
            PointerPos::new(0.0, 0.0)
        ));
        assert_eq!(ctrl.kind(), Some(DragKind::ResizeHandle));
        assert_eq!(log.borrow().attached.len(), 1);
    }

    #[test]
    fn test_unchanged_drag_does_not_commit() {
        let (mut ctrl, log) = controller();
        let boundary = ClipBoundary::new(10.0, 40.0, 60.0);
        ctrl.pointer_down(
            DragTarget::Boundary {
                edge: Edge::End,
                boundary,
                geometry: geometry(),
            },
            PointerPos::new(400.0, 0.0),
        );
        ctrl.pointer_move(PointerPos::new(450.0, 0.0));
        assert_eq!(ctrl.pointer_up(PointerPos::new(400.0, 0.0)), None);
        assert_eq!(log.borrow().detached, 1);
    }

    #[test]
    fn test_boundary_end_clamped_every_frame() {
        let (mut ctrl, _) = controller();
        let boundary = ClipBoundary::new(10.0, 40.0, 60.0);
        ctrl.pointer_down(
            DragTarget::Boundary {
                edge: Edge::End,
                boundary,
                geometry: geometry(),
            },
            PointerPos::new(400.0, 0.0),
        );

        // Too close to the start: held at start + 5.
        let staged = ctrl.pointer_move(PointerPos::new(110.0, 0.0)).cloned();
        assert_eq!(
            staged,
            Some(StagedValue::Boundary(ClipBoundary::new(10.0, 15.0, 60.0)))
        );

        // Past the source end: held at 60.
        let staged = ctrl.pointer_move(PointerPos::new(5000.0, 0.0)).cloned();
        assert_eq!(
            staged,
            Some(StagedValue::Boundary(ClipBoundary::new(10.0, 60.0, 60.0)))
        );

        assert_eq!(
            ctrl.pointer_up(PointerPos::new(5000.0, 0.0)),
            Some(DragCommit::BoundaryChange {
                start: 10.0,
                end: 60.0
            })
        );
    }

    #[test]
    fn test_teardown_mid_drag_releases_without_commit() {
        let (mut ctrl, log) = controller();
        ctrl.pointer_down(
            DragTarget::Playhead {
                time: 5.0,
                geometry: geometry(),
            },
            PointerPos::new(50.0, 0.0),
        );
        ctrl.pointer_move(PointerPos::new(200.0, 0.0));
        ctrl.teardown();
        assert!(!ctrl.is_dragging());
        assert_eq!(log.borrow().detached, 1);
        assert_eq!(ctrl.pointer_up(PointerPos::new(200.0, 0.0)), None);
    }

    #[test]
    fn test_drop_detaches_listeners() {
        let (mut ctrl, log) = controller();
        ctrl.pointer_down(
            DragTarget::Resize { font_size: 30.0 },
            PointerPos::new(0.0, 0.0),
        );
        drop(ctrl);
        assert_eq!(log.borrow().detached, 1);
    }

    #[test]
    fn test_cancel_commits_last_staged_value() {
        let (mut ctrl, _) = controller();
        ctrl.pointer_down(
            DragTarget::Resize { font_size: 30.0 },
            PointerPos::new(0.0, 100.0),
        );
        ctrl.pointer_move(PointerPos::new(0.0, 120.0));
        assert_eq!(
            ctrl.pointer_cancel(),
            Some(DragCommit::FontSizeChange { size: 40.0 })
        );
    }

    #[test]
    fn test_nan_pointer_keeps_last_good_value() {
        let (mut ctrl, _) = controller();
        ctrl.pointer_down(
            DragTarget::Playhead {
                time: 0.0,
                geometry: geometry(),
            },
            PointerPos::new(0.0, 0.0),
        );
        ctrl.pointer_move(PointerPos::new(120.0, 0.0));
        let staged = ctrl.pointer_move(PointerPos::new(f64::NAN, 0.0)).cloned();
        assert_eq!(staged, Some(StagedValue::Time(12.0)));
        let staged = ctrl
            .pointer_move(PointerPos::new(f64::INFINITY, 0.0))
            .cloned();
        assert_eq!(staged, Some(StagedValue::Time(12.0)));
    }

    #[test]
    fn test_zero_width_container_keeps_position() {
        let (mut ctrl, _) = controller();
        let start = CanvasPosition::new(50.0, 50.0);
        ctrl.pointer_down(
            DragTarget::FreePosition {
                position: start,
                container: ContainerSize::new(0.0, 400.0),
            },
            PointerPos::new(10.0, 10.0),
        );
        let staged = ctrl.pointer_move(PointerPos::new(90.0, 10.0)).cloned();
        assert_eq!(staged, Some(StagedValue::Position(start)));
        assert_eq!(ctrl.pointer_up(PointerPos::new(90.0, 10.0)), None);
    }

    #[test]
    fn test_free_position_clamps_each_axis() {
        let (mut ctrl, _) = controller();
        ctrl.pointer_down(
            DragTarget::FreePosition {
                position: CanvasPosition::new(50.0, 50.0),
                container: ContainerSize::new(1000.0, 500.0),
            },
            PointerPos::new(500.0, 250.0),
        );
        // +30% x, -60% y
        let staged = ctrl.pointer_move(PointerPos::new(800.0, -50.0)).cloned();
        assert_eq!(
            staged,
            Some(StagedValue::Position(CanvasPosition::new(80.0, 10.0)))
        );
        // -60% x, +60% y
        let staged = ctrl.pointer_move(PointerPos::new(-100.0, 550.0)).cloned();
        assert_eq!(
            staged,
            Some(StagedValue::Position(CanvasPosition::new(10.0, 95.0)))
        );
    }

    #[test]
    fn test_resize_clamps_font_size() {
        let (mut ctrl, _) = controller();
        ctrl.pointer_down(
            DragTarget::Resize { font_size: 30.0 },
            PointerPos::new(0.0, 0.0),
        );
        let staged = ctrl.pointer_move(PointerPos::new(0.0, 500.0)).cloned();
        assert_eq!(staged, Some(StagedValue::FontSize(72.0)));
        let staged = ctrl.pointer_move(PointerPos::new(0.0, -500.0)).cloned();
        assert_eq!(staged, Some(StagedValue::FontSize(12.0)));
    }

    #[test]
    fn test_word_move_keeps_duration_at_track_end() {
        let (mut ctrl, _) = controller();
        ctrl.pointer_down(
            DragTarget::WordMove {
                word_id: "w1".into(),
                range: TimeRange::new(58.0, 59.0),
                geometry: geometry(),
            },
            PointerPos::new(585.0, 0.0),
        );
        let commit = ctrl.pointer_up(PointerPos::new(700.0, 0.0));
        assert_eq!(
            commit,
            Some(DragCommit::WordTimingChange {
                word_id: "w1".into(),
                start: 59.0,
                end: 60.0
            })
        );
    }

    #[test]
    fn test_click_to_seek() {
        let (mut ctrl, _) = controller();
        assert_eq!(
            ctrl.click_to_seek(&geometry(), 150.0),
            Some(DragCommit::Seek { time: 15.0 })
        );
        ctrl.pointer_down(
            DragTarget::Resize { font_size: 30.0 },
            PointerPos::new(0.0, 0.0),
        );
        assert_eq!(ctrl.click_to_seek(&geometry(), 150.0), None);
    }

    #[test]
    fn test_commit_serializes_with_type_tag() {
        let commit = DragCommit::WordTimingChange {
            word_id: "w1".into(),
            start: 1.0,
            end: 1.5,
        };
        let json = serde_json::to_string(&commit).unwrap();
        assert!(json.contains("\"type\":\"word_timing_change\""));
    }
}
