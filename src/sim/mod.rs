//! Deterministic board simulation
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by tile id)
//! - Collaborators reached only from `tick`, through queued events

pub mod board;
pub mod events;
pub mod grid;
pub mod settle;
pub mod state;
pub mod swipe;
pub mod tick;
pub mod tile;

pub use board::{Board, MergeOutcome, OverlapReport};
pub use events::{EventQueue, GameEvent};
pub use grid::{CellIndex, Direction};
pub use state::{CyclePhase, GameState};
pub use swipe::{Gesture, SwipeOutcome, gesture_direction, swipe};
pub use tick::{TickInput, tick};
pub use tile::{Adjacency, Tile, TileId, TileState};
