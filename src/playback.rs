use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::providers::Pointer;
use crate::trajectory::Trajectory;
use crate::types::{MouseButton, Point};

/// Waits between waypoints. Swapped for a recording sleeper in tests so
/// playback can be checked without real time passing.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Move through every step, pausing after each. Runs to completion; there is
/// no cancellation.
pub async fn play(
    trajectory: Trajectory,
    pointer: &dyn Pointer,
    sleeper: &dyn Sleeper,
) -> Result<(), ProviderError> {
    for step in trajectory {
        pointer.move_to(step.point)?;
        sleeper.sleep(step.delay).await;
    }
    Ok(())
}

/// Press the left button at `from`, play the trajectory, release.
pub async fn drag_and_drop(
    from: Point,
    trajectory: Trajectory,
    pointer: &dyn Pointer,
    sleeper: &dyn Sleeper,
) -> Result<(), ProviderError> {
    pointer.move_to(from)?;
    pointer.button_down(MouseButton::Left)?;
    let played = play(trajectory, pointer, sleeper).await;
    // never leave the button held down
    let released = pointer.button_up(MouseButton::Left);
    played.and(released)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::providers::testing::{Event, Recorder};
    use crate::trajectory;

    #[tokio::test]
    async fn play_moves_then_sleeps_for_each_step() {
        let rec = Arc::new(Recorder::new());
        let tr = trajectory::drag(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 40.0);
        play(tr, rec.as_ref(), rec.as_ref()).await.unwrap();

        let events = rec.events();
        assert_eq!(events.len(), 40);
        assert_eq!(events[0], Event::Move(Point::new(1.0, 0.0)));
        assert_eq!(events[1], Event::Sleep(Duration::from_millis(2)));
        assert_eq!(events[38], Event::Move(Point::new(20.0, 0.0)));
    }

    #[tokio::test]
    async fn drag_and_drop_brackets_motion_with_button_events() {
        let rec = Arc::new(Recorder::new());
        let from = Point::new(0.0, 0.0);
        let tr = trajectory::drag(from, Point::new(100.0, 0.0), 200.0);
        drag_and_drop(from, tr, rec.as_ref(), rec.as_ref()).await.unwrap();

        let events = rec.events();
        assert_eq!(events[0], Event::Move(from));
        assert_eq!(events[1], Event::ButtonDown(MouseButton::Left));
        assert_eq!(events.last(), Some(&Event::ButtonUp(MouseButton::Left)));
    }

    #[tokio::test]
    async fn button_is_released_when_a_move_fails() {
        let rec = Arc::new(Recorder::new().with_failing_moves_after(3));
        let from = Point::new(0.0, 0.0);
        let tr = trajectory::drag(from, Point::new(100.0, 0.0), 200.0);
        let err = drag_and_drop(from, tr, rec.as_ref(), rec.as_ref()).await;

        assert!(err.is_err());
        assert_eq!(rec.events().last(), Some(&Event::ButtonUp(MouseButton::Left)));
    }

    #[tokio::test]
    async fn tokio_sleeper_skips_zero_delays() {
        let start = std::time::Instant::now();
        TokioSleeper.sleep(Duration::ZERO).await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
