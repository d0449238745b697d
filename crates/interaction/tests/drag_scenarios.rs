use clipsync_common::config::EditorConfig;
use clipsync_interaction::{
    time_to_position, CommitSink, DragCommit, DragController, DragTarget, NoListeners, PointerPos,
    TrackGeometry,
};
use clipsync_timing_model::{CaptionTrack, ClipBoundary, Edge};

#[derive(Debug, Default)]
struct Recorder {
    boundaries: Vec<(f64, f64)>,
    words: Vec<(String, f64, f64)>,
    seeks: Vec<f64>,
}

impl CommitSink for Recorder {
    fn on_boundary_change(&mut self, start: f64, end: f64) {
        self.boundaries.push((start, end));
    }

    fn on_word_timing_change(&mut self, word_id: &str, start: f64, end: f64) {
        self.words.push((word_id.to_string(), start, end));
    }

    fn on_seek(&mut self, time: f64) {
        self.seeks.push(time);
    }
}

fn controller() -> DragController {
    DragController::from_config(&EditorConfig::default(), Box::new(NoListeners))
}

#[test]
fn boundary_end_drag_stops_at_max_duration() {
    // Source long enough that the 180s limit binds before the source end.
    let geometry = TrackGeometry::new(600.0, 1200.0, 1.0);
    let boundary = ClipBoundary::new(10.0, 40.0, 600.0);
    let mut ctrl = controller();
    let mut sink = Recorder::default();

    ctrl.pointer_down(
        DragTarget::Boundary {
            edge: Edge::End,
            boundary,
            geometry,
        },
        PointerPos::new(geometry.time_to_position(40.0), 0.0),
    );
    for t in [80.0, 150.0, 195.0] {
        ctrl.pointer_move(PointerPos::new(geometry.time_to_position(t), 0.0));
    }
    let commit = ctrl
        .pointer_up(PointerPos::new(geometry.time_to_position(195.0), 0.0))
        .expect("end moved");
    commit.dispatch(&mut sink);

    assert_eq!(sink.boundaries.len(), 1);
    let (start, end) = sink.boundaries[0];
    assert_eq!(start, 10.0);
    assert!((end - 190.0).abs() < 1e-9);
}

#[test]
fn boundary_end_drag_on_short_source_stops_at_source_end() {
    let geometry = TrackGeometry::new(60.0, 600.0, 1.0);
    let boundary = ClipBoundary::new(10.0, 40.0, 60.0);
    let mut ctrl = controller();

    ctrl.pointer_down(
        DragTarget::Boundary {
            edge: Edge::End,
            boundary,
            geometry,
        },
        PointerPos::new(400.0, 0.0),
    );
    let commit = ctrl.pointer_up(PointerPos::new(1950.0, 0.0));
    assert_eq!(
        commit,
        Some(DragCommit::BoundaryChange {
            start: 10.0,
            end: 60.0
        })
    );
}

#[test]
fn word_end_drag_keeps_gap_to_next_word() {
    let track = CaptionTrack::from_json(
        r#"{"segments":[{"id":"s1","start":2.0,"end":3.0,"text":"A B","words":[
            {"id":"a","text":"A","start":2.0,"end":2.5},
            {"id":"b","text":"B","start":2.5,"end":3.0}
        ]}]}"#,
    )
    .unwrap();
    let word = track.word("a").unwrap();
    let geometry = TrackGeometry::new(60.0, 6000.0, 1.0);
    let mut ctrl = controller();
    let mut sink = Recorder::default();

    ctrl.pointer_down(
        DragTarget::WordEdge {
            word_id: word.id.clone(),
            edge: Edge::End,
            range: word.range,
            neighbors: track.word_neighbors("a").unwrap(),
            geometry,
        },
        PointerPos::new(geometry.time_to_position(2.5), 0.0),
    );
    ctrl.pointer_up(PointerPos::new(geometry.time_to_position(2.6), 0.0))
        .expect("end moved")
        .dispatch(&mut sink);

    assert_eq!(sink.words.len(), 1);
    let (id, start, end) = &sink.words[0];
    assert_eq!(id, "a");
    assert_eq!(*start, 2.0);
    assert!((end - 2.4).abs() < 1e-9);
}

#[test]
fn zoomed_track_midpoint() {
    assert!((time_to_position(30.0, 60.0, 800.0, 2.0) - 800.0).abs() < 1e-9);
    let geometry = TrackGeometry::new(60.0, 800.0, 2.0);
    assert!((geometry.position_to_time(800.0) - 30.0).abs() < 1e-9);
}

#[test]
fn playhead_drag_seeks_once() {
    let geometry = TrackGeometry::new(60.0, 600.0, 1.0);
    let mut ctrl = controller();
    let mut sink = Recorder::default();

    ctrl.pointer_down(
        DragTarget::Playhead {
            time: 0.0,
            geometry,
        },
        PointerPos::new(0.0, 0.0),
    );
    for x in [10.0, 20.0, 30.0, 40.0] {
        ctrl.pointer_move(PointerPos::new(x, 0.0));
    }
    if let Some(commit) = ctrl.pointer_up(PointerPos::new(50.0, 0.0)) {
        commit.dispatch(&mut sink);
    }
    assert_eq!(sink.seeks, vec![5.0]);
}
