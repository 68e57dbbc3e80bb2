//! Grid index math for the 4x4 board
//!
//! Cells are addressed by a linear index `z * 4 + x` with `x, z` in `0..4`.
//! `x` grows to the right, `z` grows forward (away from the player). Every
//! query here is total: edges yield `None` rather than wrapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_COUNT, GRID_SIZE};

/// Linear cell index in `0..16`
pub type CellIndex = u8;

/// Push / adjacency direction on the board plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// -x
    Left,
    /// +x
    Right,
    /// +z ("above" in adjacency terms, screen up)
    Forward,
    /// -z ("below" in adjacency terms, screen down)
    Back,
}

impl Direction {
    /// All four directions, in adjacency-scan order
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in board space (`x`, `z` stored as `Vec2::x`, `Vec2::y`)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Forward => Vec2::new(0.0, 1.0),
            Direction::Back => Vec2::new(0.0, -1.0),
        }
    }

    /// Signed progress of `pos` along this direction.
    ///
    /// A larger value means the position is further along the push.
    #[inline]
    pub fn progress(self, pos: Vec2) -> f32 {
        pos.dot(self.unit())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Forward => "forward",
            Direction::Back => "back",
        }
    }
}

/// Convert a cell index to `(x, z)`
#[inline]
pub fn to_coord(index: CellIndex) -> (u8, u8) {
    (index % GRID_SIZE, index / GRID_SIZE)
}

/// Convert `(x, z)` to a cell index (caller guarantees both are in range)
#[inline]
pub fn to_index(x: u8, z: u8) -> CellIndex {
    debug_assert!(x < GRID_SIZE && z < GRID_SIZE, "coordinate out of range");
    z * GRID_SIZE + x
}

/// Whether an index addresses a cell on the board
#[inline]
pub fn is_valid(index: i32) -> bool {
    (0..CELL_COUNT as i32).contains(&index)
}

/// Cell index for signed coordinates, `None` when off the board
pub fn checked_index(x: i32, z: i32) -> Option<CellIndex> {
    let size = GRID_SIZE as i32;
    if (0..size).contains(&x) && (0..size).contains(&z) {
        Some(to_index(x as u8, z as u8))
    } else {
        None
    }
}

/// Neighboring cell in `direction`, or `None` at the board edge
pub fn neighbor(index: CellIndex, direction: Direction) -> Option<CellIndex> {
    let (x, z) = to_coord(index);
    let (x, z) = (x as i32, z as i32);
    match direction {
        Direction::Left => checked_index(x - 1, z),
        Direction::Right => checked_index(x + 1, z),
        Direction::Forward => checked_index(x, z + 1),
        Direction::Back => checked_index(x, z - 1),
    }
}

/// Center of a cell in continuous board space
#[inline]
pub fn cell_center(index: CellIndex) -> Vec2 {
    let (x, z) = to_coord(index);
    Vec2::new(x as f32, z as f32)
}

/// Round a continuous position to the nearest integer grid coordinates.
///
/// The result may lie outside the board; that is how tiles pushed off an edge
/// are detected.
#[inline]
pub fn round_to_grid(pos: Vec2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

/// Iterator over all cell indices in ascending order
pub fn cells() -> impl Iterator<Item = CellIndex> {
    0..CELL_COUNT as CellIndex
}
