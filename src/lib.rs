//! Slide Merge - board core of a physics-assisted 2048-style puzzle
//!
//! Tiles are rigid bodies pushed by swipes; they collide and merge in
//! continuous space, then settle back onto a 4x4 grid.
//!
//! Core modules:
//! - `sim`: Deterministic board state machine (grid, tiles, merges, settle cycle)
//! - `platform`: Collaborator traits (physics, score, visuals, audio) and event dispatch
//! - `settings`: Tunable timings, thresholds and spawn rules

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Board, Direction, GameState, TickInput, tick};

/// Board constants
pub mod consts {
    /// Cells per board edge
    pub const GRID_SIZE: u8 = 4;
    /// Total cells on the board
    pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

    /// Frame timestep used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}
