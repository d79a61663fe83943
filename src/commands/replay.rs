//! Offline replay of recorded pointer traces
//!
//! Steps a synthetic frame clock over a recorded event trace and produces
//! the transform the marker would show on each frame. Useful for previewing
//! tuning changes and for regression-testing the animation.

use crate::config::Settings;
use crate::follower::{MarkerTransform, PointerFollowerAnimator};
use crate::input::{dispatch, HighlightRegistry, PointerEvent, TargetId};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pointer event with its time from trace start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedPointerEvent {
    pub time_ms: f64,
    pub event: PointerEvent,
}

/// Parent link between two host elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetLink {
    pub child: TargetId,
    pub parent: TargetId,
}

/// Recorded input session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerTrace {
    #[serde(default)]
    pub highlight_targets: Vec<TargetId>,
    #[serde(default)]
    pub parents: Vec<TargetLink>,
    pub events: Vec<TimedPointerEvent>,
}

impl PointerTrace {
    /// Build the highlight registry described by the trace
    pub fn registry(&self) -> HighlightRegistry {
        let mut registry = HighlightRegistry::new();
        for &target in &self.highlight_targets {
            registry.tag(target);
        }
        for link in &self.parents {
            registry.set_parent(link.child, link.parent);
        }
        registry
    }
}

/// Transform produced for one output frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    pub frame: u64,
    /// Time in milliseconds from trace start
    pub time_ms: f64,
    pub transform: MarkerTransform,
}

/// Upper bound on frames produced by one replay (about 4.6 hours at 60fps)
pub const MAX_REPLAY_FRAMES: usize = 1_000_000;

/// Replay a trace at `output_fps`
///
/// Events are applied in order up to each frame's time, then the animator
/// ticks once. Frames run through the last event's time, so the final frame
/// reflects every event; a non-empty trace always yields at least one frame.
pub fn replay_events(
    trace: &PointerTrace,
    settings: &Settings,
    output_fps: f64,
) -> Result<Vec<ReplayFrame>> {
    ensure!(
        output_fps.is_finite() && output_fps > 0.0,
        "Output fps must be a positive number, got {}",
        output_fps
    );
    ensure!(
        trace.events.iter().all(|e| e.time_ms.is_finite()),
        "Trace contains a non-finite event time"
    );

    if trace.events.is_empty() {
        return Ok(vec![]);
    }

    let registry = trace.registry();
    let mut events: Vec<&TimedPointerEvent> = trace.events.iter().collect();
    events.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));

    let frame_duration_ms = 1000.0 / output_fps;
    let total_duration_ms = events.last().map(|e| e.time_ms).unwrap_or(0.0).max(0.0);
    // One frame past the last whole interval so the last frame lands at or after the final event
    let frame_count = (total_duration_ms / frame_duration_ms).ceil() + 1.0;
    ensure!(
        frame_count <= MAX_REPLAY_FRAMES as f64,
        "Trace spans {:.0}ms, which needs more than {} frames at {}fps",
        total_duration_ms,
        MAX_REPLAY_FRAMES,
        output_fps
    );
    let frame_count = frame_count as usize;

    let mut animator = PointerFollowerAnimator::new(settings.follower.clone());
    let mut next_event = 0;
    let mut result = Vec::new();

    for frame in 0..frame_count {
        let frame_time_ms = frame as f64 * frame_duration_ms;
        let is_last = frame + 1 == frame_count;

        // The last frame takes whatever is left, so rounding never drops an event
        while next_event < events.len()
            && (is_last || events[next_event].time_ms <= frame_time_ms)
        {
            dispatch(&mut animator, &registry, &events[next_event].event);
            next_event += 1;
        }

        if let Some(transform) = animator.tick() {
            result.push(ReplayFrame {
                frame: frame as u64,
                time_ms: frame_time_ms,
                transform,
            });
        }
    }

    Ok(result)
}

/// Read a trace file, replay it, and write the frames as JSON
///
/// Returns the number of frames written.
pub fn replay_file(
    input_file: &Path,
    output_file: &Path,
    settings: &Settings,
    output_fps: f64,
) -> Result<usize> {
    let content = std::fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read trace file {}", input_file.display()))?;
    let trace: PointerTrace =
        serde_json::from_str(&content).context("Failed to parse pointer trace")?;

    tracing::info!(
        "Replaying {} events -> {} at {}fps",
        trace.events.len(),
        output_file.display(),
        output_fps
    );

    let frames = replay_events(&trace, settings, output_fps)?;
    let output = serde_json::to_vec_pretty(&frames).context("Failed to serialize frames")?;
    std::fs::write(output_file, output)
        .with_context(|| format!("Failed to write output file {}", output_file.display()))?;

    tracing::info!("Wrote {} frames to {}", frames.len(), output_file.display());
    Ok(frames.len())
}
