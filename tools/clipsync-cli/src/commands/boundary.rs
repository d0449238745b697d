//! Check a clip boundary and clamp a proposed edge.

use clipsync_common::config::EditorConfig;
use clipsync_interaction::ClampingValidator;
use clipsync_timing_model::{ClipBoundary, Edge};

use crate::EdgeArg;

pub fn run(
    start: f64,
    end: f64,
    source_duration: f64,
    edge: Option<EdgeArg>,
    target: Option<f64>,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let validator = ClampingValidator::new(config.timing);
    let boundary = ClipBoundary::new(start, end, source_duration);

    report("Current", &validator, &boundary);

    let (Some(edge), Some(target)) = (edge, target) else {
        return Ok(());
    };
    let edge = match edge {
        EdgeArg::Start => Edge::Start,
        EdgeArg::End => Edge::End,
    };

    let clamped = validator.clamp_boundary(
        target,
        boundary.edge(edge.opposite()),
        edge,
        source_duration,
    );
    if clamped != target {
        println!("\nDragging {edge:?} to {target:.3}s clamps to {clamped:.3}s");
    } else {
        println!("\nDragging {edge:?} to {target:.3}s is within limits");
    }
    report("Result", &validator, &boundary.with_edge(edge, clamped));

    Ok(())
}

fn report(label: &str, validator: &ClampingValidator, boundary: &ClipBoundary) {
    let check = validator.validate_duration(boundary.start, boundary.end);
    println!(
        "{label}: [{:.3}s, {:.3}s] ({:.3}s)",
        boundary.start, boundary.end, check.duration
    );
    match check.into_result() {
        Ok(_) => println!("  Valid"),
        Err(e) => println!("  {e}"),
    }
}
