//! Board-mediated event queue
//!
//! Board and settle-cycle operations never call collaborators directly. They
//! push [`GameEvent`]s, and the session forwards the drained queue to physics,
//! score, visual and audio collaborators (see `platform::dispatch`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{CellIndex, Direction};
use super::tile::TileId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was created on `cell`
    Spawned { id: TileId, cell: CellIndex, value: u8 },
    /// A tile's value changed (merge survivor or spawn-on-spawn)
    ValueChanged { id: TileId, value: u8 },
    /// A tile was merged away while travelling in `direction`
    MergeRemoved { id: TileId, direction: Direction },
    /// A tile slid off the board or lost an overlap with no free neighbor
    Lost { id: TileId },
    /// A tile was snapped (or displaced) onto `cell`
    Settled { id: TileId, cell: CellIndex, position: Vec2 },
    /// Push impulse requested for a tile
    Impulse { id: TileId, impulse: Vec2 },
    /// Removal acknowledged; the tile no longer exists
    Despawned { id: TileId },
    /// Merge score delta
    ScoreAdded { delta: u32 },
    /// Two tiles physically touched
    Collision { pitch: f32 },
    /// Two tiles merged
    Merge { pitch: f32 },
    /// Terminal state reached
    GameOver,
}

/// FIFO of pending events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
