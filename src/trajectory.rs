//! Pure generation of timed pointer trajectories.
//!
//! Nothing in here touches the pointer or the clock: a [`Trajectory`] is a list
//! of waypoints with the delay to wait after each one. Playing it back is the
//! job of [`crate::playback`].

use std::time::Duration;

use crate::error::ToolError;
use crate::geometry;
use crate::types::{Point, ScreenSize};

/// Steps in a two-point drag, independent of distance.
pub const DRAG_STEPS: usize = 20;
/// Lower bound on the step count of a multi-point path.
pub const MIN_PATH_STEPS: usize = 20;
/// One path step per this many pixels of travel, above the minimum.
pub const PIXELS_PER_PATH_STEP: f64 = 10.0;

pub const DEFAULT_DRAG_DURATION_MS: f64 = 500.0;
pub const DEFAULT_PATH_DURATION_MS: f64 = 1000.0;

/// One waypoint and the pause that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub point: Point,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    steps: Vec<Step>,
}

impl Trajectory {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.steps.last().map(|s| s.point)
    }

    /// Sum of all per-step delays.
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    fn push(&mut self, point: Point, delay: Duration) {
        self.steps.push(Step { point, delay });
    }
}

impl IntoIterator for Trajectory {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Reject durations that cannot be split into delays.
pub fn check_duration(duration_ms: f64) -> Result<(), ToolError> {
    if !duration_ms.is_finite() || duration_ms < 0.0 {
        return Err(ToolError::invalid(
            "duration",
            format!("must be a non-negative number of milliseconds, got {duration_ms}"),
        ));
    }
    Ok(())
}

/// Two-point drag: exactly [`DRAG_STEPS`] equal steps from `from` (exclusive)
/// to `to` (inclusive). The final point is `to` bit for bit.
pub fn drag(from: Point, to: Point, duration_ms: f64) -> Trajectory {
    let delay = per_step_delay(duration_ms, DRAG_STEPS);
    let mut trajectory = Trajectory::default();
    for i in 1..=DRAG_STEPS {
        let t = i as f64 / DRAG_STEPS as f64;
        trajectory.push(lerp(from, to, t), delay);
    }
    trajectory
}

/// Multi-point path. Steps are spread over the segments in proportion to
/// their length; each segment emits its start and end point, so joints between
/// segments are visited twice.
///
/// Per-segment allocation uses `floor`, so the emitted step count can fall
/// short of the global count. The per-step delay is always derived from the
/// global count.
pub fn path(points: &[Point], duration_ms: f64, screen: ScreenSize) -> Result<Trajectory, ToolError> {
    if points.len() < 2 {
        return Err(ToolError::InvalidPath(
            "Path must have at least 2 points".into(),
        ));
    }

    for point in points {
        geometry::validate(*point, screen)?;
    }

    let total_length: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    let total_steps = path_step_count(total_length);
    let delay = per_step_delay(duration_ms, total_steps);

    let mut trajectory = Trajectory::default();
    for segment in points.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let segment_steps = if total_length > 0.0 {
            (start.distance(&end) / total_length * total_steps as f64).floor() as usize
        } else {
            0
        };

        if segment_steps == 0 {
            trajectory.push(end, delay);
            continue;
        }

        for s in 0..=segment_steps {
            let t = s as f64 / segment_steps as f64;
            trajectory.push(lerp(start, end, t), delay);
        }
    }

    Ok(trajectory)
}

/// Global step count for a path of the given length.
pub fn path_step_count(total_length: f64) -> usize {
    let by_length = (total_length / PIXELS_PER_PATH_STEP).floor() as usize;
    by_length.max(MIN_PATH_STEPS)
}

fn per_step_delay(duration_ms: f64, steps: usize) -> Duration {
    let nanos = (duration_ms.max(0.0) / steps as f64 * 1_000_000.0).round();
    Duration::from_nanos(nanos as u64)
}

fn lerp(from: Point, to: Point, t: f64) -> Point {
    if t >= 1.0 {
        return to;
    }
    Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}
