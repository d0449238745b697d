//! Clipsync Interaction Core
//!
//! The timing engine behind the clip and caption editors:
//! - **Coordinates:** Time <-> pixel mapping for a zoomable track
//! - **Clamping:** Clip-duration and word-gap invariants, enforced per frame
//! - **Lookup:** Playback time -> active caption segment / word
//! - **Drag:** Single-session pointer-drag state machine for every handle type
//!
//! This crate is pure computation: no I/O, no timers, no threads. Every
//! handler runs to completion and degrades malformed input to the last
//! known-good value instead of returning an error.

pub mod clamp;
pub mod coords;
pub mod drag;
pub mod lookup;

pub use clamp::{ClampingValidator, DurationCheck, DurationIssue};
pub use coords::{position_to_time, time_to_position, TrackGeometry, ZoomLevel};
pub use drag::{
    CommitSink, DragCommit, DragController, DragKind, DragTarget, NoListeners, PointerListeners,
    PointerPos, StagedValue,
};
pub use lookup::{find_active_segment, find_active_word, LookupCursor};
