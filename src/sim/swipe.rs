//! Swipe resolver: pointer gesture to push direction

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Direction;
use super::settle;
use super::state::GameState;

/// A pointer-down / pointer-up pair in screen space (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub down: Vec2,
    pub up: Vec2,
}

impl Gesture {
    pub fn new(down: Vec2, up: Vec2) -> Self {
        Self { down, up }
    }

    pub fn delta(&self) -> Vec2 {
        self.up - self.down
    }
}

/// What happened to a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// A settle cycle started
    Accepted(Direction),
    /// Drag shorter than the threshold
    TooShort,
    /// A cycle is still in flight
    Locked,
    /// The run has ended
    GameOver,
}

/// Direction of a gesture, or `None` below `threshold` pixels.
///
/// The dominant axis wins; a diagonal (`|dx| == |dy|`) counts as vertical.
pub fn gesture_direction(gesture: &Gesture, threshold: f32) -> Option<Direction> {
    let delta = gesture.delta();
    if delta.length() < threshold {
        return None;
    }
    let direction = if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Direction::Right } else { Direction::Left }
    } else if delta.y > 0.0 {
        Direction::Forward
    } else {
        Direction::Back
    };
    Some(direction)
}

/// Apply a gesture to the session, starting a settle cycle when accepted
pub fn swipe(state: &mut GameState, gesture: &Gesture) -> SwipeOutcome {
    if state.is_game_over() {
        log::debug!("Swipe ignored: game over");
        return SwipeOutcome::GameOver;
    }
    if !state.accepts_input() {
        log::debug!("Swipe ignored: settle cycle in flight ({:?})", state.phase);
        return SwipeOutcome::Locked;
    }
    match gesture_direction(gesture, state.settings.swipe_threshold) {
        Some(direction) => {
            settle::start_cycle(state, direction);
            SwipeOutcome::Accepted(direction)
        }
        None => SwipeOutcome::TooShort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn drag(dx: f32, dy: f32) -> Gesture {
        Gesture::new(Vec2::new(100.0, 100.0), Vec2::new(100.0 + dx, 100.0 + dy))
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(gesture_direction(&drag(-80.0, 10.0), 50.0), Some(Direction::Left));
        assert_eq!(gesture_direction(&drag(80.0, -30.0), 50.0), Some(Direction::Right));
        assert_eq!(gesture_direction(&drag(5.0, 90.0), 50.0), Some(Direction::Forward));
        assert_eq!(gesture_direction(&drag(-20.0, -60.0), 50.0), Some(Direction::Back));
    }

    #[test]
    fn test_diagonal_counts_as_vertical() {
        assert_eq!(gesture_direction(&drag(60.0, 60.0), 50.0), Some(Direction::Forward));
    }

    #[test]
    fn test_below_threshold_rejected() {
        assert_eq!(gesture_direction(&drag(30.0, 30.0), 50.0), None);
    }

    #[test]
    fn test_swipe_locks_and_stamps_direction() {
        let mut state = GameState::new(3, Settings::default());
        let outcome = swipe(&mut state, &drag(-100.0, 0.0));
        assert_eq!(outcome, SwipeOutcome::Accepted(Direction::Left));
        assert!(state.board.input_locked);
        assert!(state.board.tiles().all(|t| t.push_direction == Some(Direction::Left)));

        // Second swipe while locked changes nothing
        let outcome = swipe(&mut state, &drag(100.0, 0.0));
        assert_eq!(outcome, SwipeOutcome::Locked);
        assert_eq!(state.direction, Some(Direction::Left));
    }

    #[test]
    fn test_short_swipe_keeps_input_open() {
        let mut state = GameState::new(3, Settings::default());
        assert_eq!(swipe(&mut state, &drag(10.0, 0.0)), SwipeOutcome::TooShort);
        assert!(state.accepts_input());
    }
}
