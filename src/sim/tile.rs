//! Tile entity
//!
//! A tile is owned by the board arena and addressed by its [`TileId`].
//! Adjacency is a cache of neighbor ids, never a live reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{self, CellIndex, Direction};

/// Creation-order tile identity. Never reused within a session.
pub type TileId = u32;

/// Cached neighbor ids, rebuilt by the board after every settle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    /// Tile in the `+z` cell
    pub above: Option<TileId>,
    /// Tile in the `-z` cell
    pub below: Option<TileId>,
    pub left: Option<TileId>,
    pub right: Option<TileId>,
}

impl Adjacency {
    pub fn get(&self, direction: Direction) -> Option<TileId> {
        match direction {
            Direction::Forward => self.above,
            Direction::Back => self.below,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, id: Option<TileId>) {
        match direction {
            Direction::Forward => self.above = id,
            Direction::Back => self.below = id,
            Direction::Left => self.left = id,
            Direction::Right => self.right = id,
        }
    }

    /// Neighbor ids that are present
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        Direction::ALL.into_iter().filter_map(|d| self.get(d))
    }
}

/// Tile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    /// Participates in merges, occupancy and playability
    Live,
    /// Merged away or pushed off the board; waiting for removal to be acknowledged
    Removing,
}

/// A numbered tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Rank; displayed magnitude is `2^value`. Zero only on the merge-loser path.
    pub value: u8,
    /// Occupied cell, `None` while unsettled
    pub cell: Option<CellIndex>,
    /// Last continuous position reported by physics
    pub position: Vec2,
    pub adjacency: Adjacency,
    /// Direction of the last swipe
    pub push_direction: Option<Direction>,
    pub state: TileState,
    /// Received a merge during the current settle cycle
    #[serde(default)]
    pub merged_this_cycle: bool,
}

impl Tile {
    pub fn new(id: TileId, cell: CellIndex, value: u8) -> Self {
        Self {
            id,
            value,
            cell: Some(cell),
            position: grid::cell_center(cell),
            adjacency: Adjacency::default(),
            push_direction: None,
            state: TileState::Live,
            merged_this_cycle: false,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == TileState::Live
    }

    /// Displayed number (`2^value`, or 0 when empty)
    pub fn magnitude(&self) -> u64 {
        if self.value == 0 { 0 } else { 1u64 << self.value.min(63) }
    }

    /// Whether the continuous position sits exactly on a cell center
    pub fn is_on_grid(&self) -> bool {
        self.position.x.fract() == 0.0 && self.position.y.fract() == 0.0
    }

    /// Mark as merged-away: value cleared and excluded from further merges
    pub(crate) fn retire(&mut self) {
        self.value = 0;
        self.state = TileState::Removing;
        self.adjacency = Adjacency::default();
    }
}
