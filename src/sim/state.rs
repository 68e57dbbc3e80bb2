//! Game session state
//!
//! One [`GameState`] owns the board, the run RNG, the score and the settle
//! cycle phase. There is no global instance; drivers hold it and pass it to
//! [`super::tick`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::events::GameEvent;
use super::grid::Direction;
use crate::settings::Settings;

/// Settle cycle phase.
///
/// Timed phases carry their own remaining time, so replacing the phase is
/// what cancels a pending wait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Waiting for a swipe
    Idle,
    /// Impulses requested, settle timer about to start
    Pushed,
    /// Physics is moving tiles; no board mutation besides merges
    Settling { remaining: f32 },
    /// Tiles snapped to cells; waiting before separating stacked tiles
    Snapped { remaining: f32 },
    /// Stacked tiles separated; playability is evaluated next
    OverlapResolved,
    /// Board still playable; waiting before spawning
    Spawning { remaining: f32 },
    /// Terminal until restart
    GameOver,
}

impl CyclePhase {
    /// Whether a cycle is in flight (contacts are only resolved then)
    pub fn is_active(&self) -> bool {
        !matches!(self, CyclePhase::Idle | CyclePhase::GameOver)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub board: Board,
    pub phase: CyclePhase,
    /// Direction of the cycle in flight (or the last one)
    pub direction: Option<Direction>,
    /// Sum of all merge deltas
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Completed settle cycles
    pub cycles: u32,
    pub settings: Settings,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a fresh run: empty board, then the initial spawn
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut state = Self::with_board(seed, settings, Board::new());
        state.board.spawn_initial(&mut state.rng, &state.settings);
        state
    }

    /// Start from a prepared board (scripted setups, replays)
    pub fn with_board(seed: u64, settings: Settings, board: Board) -> Self {
        Self {
            seed,
            board,
            phase: CyclePhase::Idle,
            direction: None,
            score: 0,
            time_ticks: 0,
            cycles: 0,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Discard the board, score and any pending wait, then deal a new board
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting run with seed {} (final score {})", seed, self.score);
        self.board.clear();
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = CyclePhase::Idle;
        self.direction = None;
        self.score = 0;
        self.cycles = 0;
        self.board.spawn_initial(&mut self.rng, &self.settings);
    }

    pub fn is_game_over(&self) -> bool {
        self.board.game_over
    }

    /// Whether a swipe would be accepted right now
    pub fn accepts_input(&self) -> bool {
        !self.board.input_locked && self.phase == CyclePhase::Idle
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.board.events.drain()
    }

    /// Random pitch for an audio cue
    pub(crate) fn cue_pitch(&mut self) -> f32 {
        let (lo, hi) = (self.settings.pitch_min, self.settings.pitch_max);
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }
}
