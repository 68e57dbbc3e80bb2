//! Per-frame simulation tick
//!
//! One call per frame: apply input, pull positions and contacts from physics,
//! advance the settle cycle, then hand the queued events to collaborators.

use super::state::GameState;
use super::swipe::{self, Gesture, SwipeOutcome};
use super::tile::TileId;
use crate::platform::{self, Collaborators};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Completed drag (pointer down, pointer up)
    pub gesture: Option<Gesture>,
    /// Start a new run with this seed
    pub restart: Option<u64>,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, out: &mut Collaborators<'_>) {
    state.time_ticks += 1;

    if let Some(seed) = input.restart {
        state.restart(seed);
    }

    if let Some(gesture) = &input.gesture {
        let outcome = swipe::swipe(state, gesture);
        if outcome != SwipeOutcome::TooShort {
            log::debug!("Swipe at tick {}: {:?}", state.time_ticks, outcome);
        }
    }

    // Physics runs between ticks; mirror where it left the tiles
    let ids: Vec<TileId> = state.board.tiles().map(|t| t.id).collect();
    for id in ids {
        if let Some(position) = out.physics.position(id) {
            state.board.sync_position(id, position);
        }
    }

    let contacts = out.physics.take_contacts();
    if state.phase.is_active() {
        resolve_contacts(state, &contacts);
    } else if !contacts.is_empty() {
        log::debug!("Dropping {} contact(s) outside a settle cycle", contacts.len());
    }

    super::settle::advance(state, dt);

    platform::dispatch(state.drain_events(), out);
}

/// Turn physical contacts into collision cues and merges
fn resolve_contacts(state: &mut GameState, contacts: &[(TileId, TileId)]) {
    let Some(direction) = state.direction else {
        return;
    };
    for &(a, b) in contacts {
        let pitch = state.cue_pitch();
        state
            .board
            .events
            .push(super::events::GameEvent::Collision { pitch });

        if let Some(merge) = state.board.resolve_collision(a, b, direction) {
            state.score += merge.value as u64;
            let pitch = state.cue_pitch();
            state
                .board
                .events
                .push(super::events::GameEvent::Merge { pitch });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{KinematicWorld, Silent};
    use crate::settings::Settings;
    use crate::sim::board::Board;
    use crate::sim::grid::Direction;
    use crate::sim::state::CyclePhase;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn run(state: &mut GameState, world: &mut KinematicWorld, input: &TickInput, dt: f32) {
        let (mut score, mut visuals, mut audio) = (Silent, Silent, Silent);
        let mut out = Collaborators {
            physics: world,
            score: &mut score,
            visuals: &mut visuals,
            audio: &mut audio,
        };
        tick(state, input, dt, &mut out);
    }

    fn left_swipe() -> TickInput {
        TickInput {
            gesture: Some(Gesture::new(Vec2::new(300.0, 0.0), Vec2::new(0.0, 0.0))),
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_dispatches_spawn_to_physics() {
        let mut state = GameState::new(12345, Settings::instant());
        let mut world = KinematicWorld::new();
        run(&mut state, &mut world, &TickInput::default(), DT);
        assert_eq!(world.body_count(), state.board.live_count());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_equal_pair_merges_on_swipe() {
        let mut board = Board::new();
        board.spawn_at(2, 1);
        board.spawn_at(3, 1);
        let settings = Settings {
            settle_delay: 1.0,
            ..Settings::instant()
        };
        let mut state = GameState::with_board(4, settings, board);
        let mut world = KinematicWorld::new();

        // First tick creates the bodies
        run(&mut state, &mut world, &TickInput::default(), 0.0);
        run(&mut state, &mut world, &left_swipe(), 0.0);
        assert_eq!(state.direction, Some(Direction::Left));

        for _ in 0..120 {
            world.step(DT);
            run(&mut state, &mut world, &TickInput::default(), DT);
            if state.phase == CyclePhase::Idle {
                break;
            }
        }
        assert_eq!(state.phase, CyclePhase::Idle);
        assert_eq!(state.score, 2);
        let survivor = state.board.tile(1).expect("leading tile survives");
        assert_eq!(survivor.value, 2);
        assert_eq!(survivor.cell, Some(0));
        assert!(state.board.tile(2).is_none());
    }

    #[test]
    fn test_restart_input_deals_new_board() {
        let mut state = GameState::new(1, Settings::instant());
        let mut world = KinematicWorld::new();
        run(&mut state, &mut world, &TickInput::default(), DT);
        state.board.declare_game_over();
        state.phase = CyclePhase::GameOver;

        let input = TickInput {
            restart: Some(2),
            ..Default::default()
        };
        run(&mut state, &mut world, &input, DT);
        assert!(state.accepts_input());
        assert_eq!(state.seed, 2);
        assert_eq!(world.body_count(), state.board.live_count());
    }
}
