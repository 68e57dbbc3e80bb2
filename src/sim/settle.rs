//! Settle cycle state machine
//!
//! `Pushed -> Settling -> Snapped -> OverlapResolved -> (Spawning -> Idle | GameOver)`
//!
//! Each call to [`advance`] spends the elapsed time on the current wait;
//! leftover time carries into the next phase, so zero delays finish a cycle
//! in a single tick.

use super::grid::Direction;
use super::state::{CyclePhase, GameState};

/// Lock input, push every tile along `direction` and begin the cycle.
///
/// Whatever phase was pending is replaced, which also drops its timer.
pub fn start_cycle(state: &mut GameState, direction: Direction) {
    debug_assert!(state.accepts_input(), "settle cycle started while locked");
    state
        .board
        .begin_push(direction, state.settings.push_impulse);
    state.direction = Some(direction);
    state.phase = CyclePhase::Pushed;
    log::info!(
        "Swipe {}: pushing {} tile(s)",
        direction.as_str(),
        state.board.live_count()
    );
}

/// Spend `remaining` out of `budget`. Returns the time still left to wait, or
/// `None` once the wait is over (the surplus stays in `budget`).
fn wait(remaining: f32, budget: &mut f32) -> Option<f32> {
    if *budget < remaining {
        let left = remaining - *budget;
        *budget = 0.0;
        Some(left)
    } else {
        *budget -= remaining;
        None
    }
}

/// Advance the cycle by `dt` seconds
pub fn advance(state: &mut GameState, dt: f32) {
    let mut budget = dt.max(0.0);
    loop {
        let next = match state.phase {
            CyclePhase::Idle | CyclePhase::GameOver => return,
            CyclePhase::Pushed => CyclePhase::Settling {
                remaining: state.settings.settle_delay,
            },
            CyclePhase::Settling { remaining } => {
                if let Some(left) = wait(remaining, &mut budget) {
                    state.phase = CyclePhase::Settling { remaining: left };
                    return;
                }
                snap(state);
                CyclePhase::Snapped {
                    remaining: state.settings.overlap_delay,
                }
            }
            CyclePhase::Snapped { remaining } => {
                if let Some(left) = wait(remaining, &mut budget) {
                    state.phase = CyclePhase::Snapped { remaining: left };
                    return;
                }
                let report = state.board.resolve_overlaps();
                if !report.is_empty() {
                    log::debug!(
                        "Overlaps: {} displaced, {} destroyed",
                        report.displaced.len(),
                        report.destroyed.len()
                    );
                }
                CyclePhase::OverlapResolved
            }
            CyclePhase::OverlapResolved => {
                if state.board.is_playable() {
                    CyclePhase::Spawning {
                        remaining: state.settings.spawn_delay,
                    }
                } else {
                    state.board.declare_game_over();
                    CyclePhase::GameOver
                }
            }
            CyclePhase::Spawning { remaining } => {
                if let Some(left) = wait(remaining, &mut budget) {
                    state.phase = CyclePhase::Spawning { remaining: left };
                    return;
                }
                let spawned = state.board.spawn_tiles(&mut state.rng, &state.settings);
                state.board.unlock_input();
                state.cycles += 1;
                log::info!(
                    "Cycle {} done: spawned {}, {} tile(s), score {}",
                    state.cycles,
                    spawned.len(),
                    state.board.live_count(),
                    state.score
                );
                CyclePhase::Idle
            }
        };
        log::debug!("Settle cycle: {:?} -> {:?}", state.phase, next);
        state.phase = next;
    }
}

/// Drop tiles whose removal is still pending, then snap the rest to cells
fn snap(state: &mut GameState) {
    let flushed = state.board.flush_removals();
    let lost = state.board.snap();
    log::debug!(
        "Snapped: {} removal(s) flushed, {} tile(s) off the board",
        flushed,
        lost.len()
    );
}
