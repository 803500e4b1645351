use std::rc::Rc;

use anyhow::{bail, Result};

use edgefade_core::{
    AppConfig, Edge, EdgeTargets, EdgeTracker, FrameScheduler, Opacity, ScrollContext,
    ScrollController, ScrollExtentSample,
};

/// Longest trace the command will print
const MAX_FRAMES: usize = 10_000;

/// One rendered frame of a trace
#[derive(Debug, Clone)]
struct TraceFrame {
    sample: ScrollExtentSample,
    reached: (bool, bool),
    snapshot: (bool, bool),
    targets: EdgeTargets,
}

/// Forward frames needed to walk `max_offset` in `step` increments
fn forward_frames(max_offset: f64, step: f64) -> f64 {
    (max_offset / step).ceil() + 1.0
}

/// Offsets visited: start to end in `step` increments, optionally back again.
/// The forward walk stops after `MAX_FRAMES` offsets or when `step` no longer
/// advances the offset.
fn offsets(max_offset: f64, step: f64, back: bool) -> Vec<f64> {
    let mut forward = vec![0.0];
    let mut offset = 0.0;
    while offset < max_offset && forward.len() < MAX_FRAMES {
        let next = (offset + step).min(max_offset);
        if next <= offset {
            break;
        }
        offset = next;
        forward.push(offset);
    }
    if back {
        let backward: Vec<f64> = forward.iter().rev().skip(1).copied().collect();
        forward.extend(backward);
    }
    forward
}

fn simulate(content: f64, viewport: f64, step: f64, back: bool) -> Vec<TraceFrame> {
    let scheduler = Rc::new(FrameScheduler::new());
    let controller = ScrollController::shared();
    controller.attach(content, viewport);
    let mut tracker = EdgeTracker::mount(Some(controller.clone()), scheduler.clone());
    let ctx = ScrollContext::default();

    let mut positions = offsets(controller.max_offset(), step, back);
    // One extra frame lets the last commit land
    if let Some(last) = positions.last().copied() {
        positions.push(last);
    }

    positions
        .into_iter()
        .map(|offset| {
            controller.jump_to(offset);
            let targets = tracker.render_pass(&ctx);
            let frame = TraceFrame {
                sample: tracker.sample(),
                reached: (tracker.reached_start(), tracker.reached_end()),
                snapshot: (tracker.snapshot(Edge::Start), tracker.snapshot(Edge::End)),
                targets,
            };
            scheduler.run_frame_callbacks();
            frame
        })
        .collect()
}

fn opacity(value: Opacity) -> u8 {
    value as u8
}

fn flag(on: bool) -> char {
    if on {
        'y'
    } else {
        'n'
    }
}

pub fn run(config: &AppConfig, content: f64, viewport: f64, step: f64, back: bool) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number");
    }
    if !(content.is_finite() && viewport.is_finite()) || content < 0.0 || viewport < 0.0 {
        bail!("--content and --viewport must be finite and not negative");
    }
    let frames = forward_frames((content - viewport).max(0.0), step);
    if frames > MAX_FRAMES as f64 {
        bail!(
            "trace would take {} frames (limit {}); use a larger --step",
            frames,
            MAX_FRAMES
        );
    }

    println!(
        "{:?} fade, size {}, {}ms {:?}",
        config.fade.scroll_direction, config.fade.size, config.fade.duration_ms, config.fade.curve
    );
    println!("frame   before    after  reached  snap  start end");

    for (i, frame) in simulate(content, viewport, step, back).iter().enumerate() {
        println!(
            "{:>5} {:>8.1} {:>8.1}    {}/{}     {}/{}     {}    {}",
            i,
            frame.sample.extent_before,
            frame.sample.extent_after,
            flag(frame.reached.0),
            flag(frame.reached.1),
            flag(frame.snapshot.0),
            flag(frame.snapshot.1),
            opacity(frame.targets.start),
            opacity(frame.targets.end),
        );
    }

    Ok(())
}
