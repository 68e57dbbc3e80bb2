//! Board: tile arena, occupancy and the merge / settle / spawn rules
//!
//! The board is the only owner of tiles. Every mutation records a
//! [`GameEvent`] so collaborators can follow along without holding
//! references into the arena.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::{EventQueue, GameEvent};
use super::grid::{self, CellIndex, Direction};
use super::tile::{Adjacency, Tile, TileId, TileState};
use crate::consts::CELL_COUNT;
use crate::settings::Settings;

/// Result of a successful merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Destroyed tile
    pub from: TileId,
    /// Surviving tile
    pub to: TileId,
    /// Survivor's value after the increment (also the score delta)
    pub value: u8,
}

/// What overlap resolution did to the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapReport {
    /// `(tile, new cell)` for every displaced tile
    pub displaced: Vec<(TileId, CellIndex)>,
    /// Tiles destroyed because no neighbor was free
    pub destroyed: Vec<TileId>,
}

impl OverlapReport {
    pub fn is_empty(&self) -> bool {
        self.displaced.is_empty() && self.destroyed.is_empty()
    }
}

/// The 4x4 board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Tile arena keyed by id (ascending iteration keeps everything deterministic)
    tiles: BTreeMap<TileId, Tile>,
    /// Settled occupant of each cell
    occupied: [Option<TileId>; CELL_COUNT],
    pub input_locked: bool,
    pub game_over: bool,
    /// Pending events for collaborators
    #[serde(skip)]
    pub events: EventQueue,
    next_id: TileId,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
            occupied: [None; CELL_COUNT],
            input_locked: false,
            game_over: false,
            events: EventQueue::new(),
            next_id: 1,
        }
    }

    // --- queries ---

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Live tiles in ascending id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|t| t.is_live())
    }

    /// Tiles waiting for removal to be acknowledged
    pub fn removing(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|t| !t.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_full(&self) -> bool {
        self.live_count() >= CELL_COUNT
    }

    /// Settled occupant of a cell
    pub fn occupant(&self, cell: CellIndex) -> Option<TileId> {
        self.occupied.get(cell as usize).copied().flatten()
    }

    /// Live tile sitting on `cell`, settled or not
    pub fn tile_at(&self, cell: CellIndex) -> Option<&Tile> {
        self.tiles().find(|t| t.cell == Some(cell))
    }

    /// Cells that no live tile claims, ascending
    pub fn free_cells(&self) -> Vec<CellIndex> {
        let taken: BTreeSet<CellIndex> = self.tiles().filter_map(|t| t.cell).collect();
        grid::cells().filter(|c| !taken.contains(c)).collect()
    }

    /// Id the next spawned tile will get
    pub fn next_tile_id(&self) -> TileId {
        self.next_id
    }

    // --- spawning ---

    /// Place a new tile on a free cell. Returns `None` if the cell is taken.
    pub fn spawn_at(&mut self, cell: CellIndex, value: u8) -> Option<TileId> {
        if !grid::is_valid(cell as i32) || self.tile_at(cell).is_some() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tiles.insert(id, Tile::new(id, cell, value));
        self.occupied[cell as usize] = Some(id);
        self.events.push(GameEvent::Spawned { id, cell, value });
        log::debug!("Spawned tile {} (value {}) at cell {}", id, value, cell);
        Some(id)
    }

    /// Fill a fresh board: one guaranteed tile plus up to
    /// `settings.initial_extra_max` extras on random cells. An extra that
    /// lands on an already placed tile bumps that tile instead.
    pub fn spawn_initial<R: Rng + ?Sized>(&mut self, rng: &mut R, settings: &Settings) {
        debug_assert!(self.live_count() == 0, "initial spawn on a non-empty board");

        let cell = rng.random_range(0..CELL_COUNT) as CellIndex;
        let value = random_value(rng, settings);
        self.spawn_at(cell, value);

        let extras = rng.random_range(0..=settings.initial_extra_max);
        for _ in 0..extras {
            let cell = rng.random_range(0..CELL_COUNT) as CellIndex;
            let value = random_value(rng, settings);
            if let Some(existing) = self.tile_at(cell).map(|t| t.id) {
                self.bump_value(existing);
            } else {
                self.spawn_at(cell, value);
            }
        }

        self.rebuild_adjacency();
        log::info!("Initial board: {} tile(s)", self.live_count());
    }

    /// Post-swipe spawn: `1..=min(spawn_cap, free)` tiles on distinct free
    /// cells. No-op on a full board.
    pub fn spawn_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R, settings: &Settings) -> Vec<TileId> {
        let mut free = self.free_cells();
        if free.is_empty() {
            log::debug!("Spawn skipped: board is full");
            return Vec::new();
        }

        let max = (settings.spawn_cap.max(1) as usize).min(free.len());
        let count = rng.random_range(1..=max);
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let cell = free.remove(rng.random_range(0..free.len()));
            let value = random_value(rng, settings);
            if let Some(id) = self.spawn_at(cell, value) {
                spawned.push(id);
            }
        }

        self.rebuild_adjacency();
        spawned
    }

    fn bump_value(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.value = tile.value.saturating_add(1);
            self.events.push(GameEvent::ValueChanged {
                id,
                value: tile.value,
            });
        }
    }

    // --- swipe ---

    /// Lock input and stamp `direction` on every live tile, requesting an
    /// impulse of `strength` for each
    pub fn begin_push(&mut self, direction: Direction, strength: f32) {
        debug_assert!(!self.input_locked, "push started while input is locked");
        self.input_locked = true;
        for tile in self.tiles.values_mut().filter(|t| t.is_live()) {
            tile.push_direction = Some(direction);
            tile.merged_this_cycle = false;
            self.events.push(GameEvent::Impulse {
                id: tile.id,
                impulse: direction.unit() * strength,
            });
        }
    }

    pub fn unlock_input(&mut self) {
        if !self.game_over {
            self.input_locked = false;
        }
    }

    /// Record the continuous position physics reports for a tile
    pub fn sync_position(&mut self, id: TileId, position: Vec2) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.position = position;
        }
    }

    // --- merging ---

    /// Resolve a physical contact between two tiles travelling along
    /// `direction`.
    ///
    /// The tile further along the push survives and gains one rank; the
    /// trailing tile is retired. Argument order does not matter. Returns
    /// `None` when the contact does not merge: different values, a tile that
    /// is gone or retiring, or a leading tile that already absorbed one this
    /// cycle.
    pub fn resolve_collision(
        &mut self,
        a: TileId,
        b: TileId,
        direction: Direction,
    ) -> Option<MergeOutcome> {
        if a == b {
            return None;
        }
        let (ta, tb) = match (self.tiles.get(&a), self.tiles.get(&b)) {
            (Some(ta), Some(tb)) => (ta, tb),
            _ => return None,
        };
        if !ta.is_live() || !tb.is_live() {
            log::debug!("Ignoring contact {}<->{}: tile already retiring", a, b);
            return None;
        }
        if ta.value != tb.value || ta.value == 0 {
            return None;
        }

        let pa = direction.progress(ta.position);
        let pb = direction.progress(tb.position);
        let a_leads = if pa == pb { a < b } else { pa > pb };
        let (to, from) = if a_leads { (a, b) } else { (b, a) };

        // A survivor may still trail into the next tile, but never absorbs twice
        let to_merged = if a_leads { ta.merged_this_cycle } else { tb.merged_this_cycle };
        if to_merged {
            log::debug!("Ignoring contact {}<->{}: {} already absorbed a tile", a, b, to);
            return None;
        }

        let from_cell = self.tiles.get_mut(&from).and_then(|tile| {
            tile.retire();
            tile.cell.take()
        });
        if let Some(cell) = from_cell {
            if self.occupied[cell as usize] == Some(from) {
                self.occupied[cell as usize] = None;
            }
        }

        let value = match self.tiles.get_mut(&to) {
            Some(tile) => {
                tile.value += 1;
                tile.merged_this_cycle = true;
                tile.value
            }
            None => return None,
        };

        self.events.push(GameEvent::ScoreAdded {
            delta: value as u32,
        });
        self.events.push(GameEvent::MergeRemoved {
            id: from,
            direction,
        });
        self.events.push(GameEvent::ValueChanged { id: to, value });
        log::debug!("Merged {} into {} -> value {}", from, to, value);

        Some(MergeOutcome { from, to, value })
    }

    // --- removal ---

    /// Drop a retiring tile from the arena. Returns false if the tile is
    /// unknown or still live.
    pub fn acknowledge_removal(&mut self, id: TileId) -> bool {
        let retiring = self.tiles.get(&id).is_some_and(|t| t.state == TileState::Removing);
        if !retiring {
            return false;
        }
        self.tiles.remove(&id);
        for slot in self.occupied.iter_mut().filter(|s| **s == Some(id)) {
            *slot = None;
        }
        self.events.push(GameEvent::Despawned { id });
        true
    }

    /// Acknowledge every pending removal
    pub fn flush_removals(&mut self) -> usize {
        let pending: Vec<TileId> = self.removing().map(|t| t.id).collect();
        for &id in &pending {
            self.acknowledge_removal(id);
        }
        pending.len()
    }

    fn lose(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.retire();
            tile.cell = None;
            self.events.push(GameEvent::Lost { id });
        }
    }

    // --- settling ---

    /// Snap every live tile to the cell nearest its continuous position and
    /// report each one as settled.
    ///
    /// Tiles whose rounded coordinates fall off the board are retired. Cells
    /// may end up shared; [`Board::resolve_overlaps`] restores uniqueness.
    /// Returns the ids lost off the edge.
    pub fn snap(&mut self) -> Vec<TileId> {
        let mut lost = Vec::new();
        let mut settled = Vec::new();

        for tile in self.tiles.values_mut().filter(|t| t.is_live()) {
            let (x, z) = grid::round_to_grid(tile.position);
            match grid::checked_index(x, z) {
                Some(cell) => {
                    let center = grid::cell_center(cell);
                    // Reported even when unmoved: physics must drop leftover velocity
                    settled.push((tile.id, cell, center));
                    tile.cell = Some(cell);
                    tile.position = center;
                }
                None => lost.push(tile.id),
            }
        }

        for (id, cell, position) in settled {
            self.events.push(GameEvent::Settled { id, cell, position });
        }
        for &id in &lost {
            log::debug!("Tile {} slid off the board", id);
            self.lose(id);
        }

        self.rebuild_occupancy();
        self.rebuild_adjacency();
        lost
    }

    /// Separate tiles stacked on one cell.
    ///
    /// The lowest id keeps the cell. Each other tile, in ascending id order,
    /// moves to the first free neighbor among `+1, -1, +4, -4`; a tile with
    /// no free neighbor is destroyed. Only direct neighbors are considered.
    pub fn resolve_overlaps(&mut self) -> OverlapReport {
        let mut by_cell: BTreeMap<CellIndex, Vec<TileId>> = BTreeMap::new();
        for tile in self.tiles() {
            if let Some(cell) = tile.cell {
                by_cell.entry(cell).or_default().push(tile.id);
            }
        }

        let mut claimed: BTreeSet<CellIndex> = by_cell.keys().copied().collect();
        let mut report = OverlapReport::default();

        for (&cell, ids) in by_cell.iter().filter(|(_, ids)| ids.len() > 1) {
            // ids are already ascending; the first keeps the cell
            for &id in ids.iter().skip(1) {
                let target = DISPLACEMENT_ORDER
                    .iter()
                    .filter_map(|&d| grid::neighbor(cell, d))
                    .find(|c| !claimed.contains(c));
                match target {
                    Some(target) => {
                        claimed.insert(target);
                        report.displaced.push((id, target));
                    }
                    None => report.destroyed.push(id),
                }
            }
        }

        for &(id, target) in &report.displaced {
            if let Some(tile) = self.tiles.get_mut(&id) {
                let position = grid::cell_center(target);
                tile.cell = Some(target);
                tile.position = position;
                self.events.push(GameEvent::Settled {
                    id,
                    cell: target,
                    position,
                });
                log::debug!("Displaced tile {} to cell {}", id, target);
            }
        }
        for &id in &report.destroyed {
            log::debug!("Tile {} had no free neighbor and was destroyed", id);
            self.lose(id);
        }

        self.rebuild_occupancy();
        self.rebuild_adjacency();
        report
    }

    fn rebuild_occupancy(&mut self) {
        self.occupied = [None; CELL_COUNT];
        for tile in self.tiles.values().filter(|t| t.is_live()) {
            if let Some(cell) = tile.cell {
                let slot = &mut self.occupied[cell as usize];
                // Lower ids win contested cells
                if slot.is_none() {
                    *slot = Some(tile.id);
                }
            }
        }
    }

    /// Recompute every live tile's adjacency cache from occupancy
    pub fn rebuild_adjacency(&mut self) {
        let occupied = self.occupied;
        for tile in self.tiles.values_mut().filter(|t| t.is_live()) {
            let mut adjacency = Adjacency::default();
            if let Some(cell) = tile.cell {
                for direction in Direction::ALL {
                    let id = grid::neighbor(cell, direction)
                        .and_then(|n| occupied[n as usize])
                        .filter(|&id| id != tile.id);
                    adjacency.set(direction, id);
                }
            }
            tile.adjacency = adjacency;
        }
    }

    // --- game over ---

    /// Whether another merge is still possible.
    ///
    /// Relies on the adjacency cache, so call after a settle.
    pub fn is_playable(&self) -> bool {
        if self.live_count() < CELL_COUNT {
            return true;
        }
        self.tiles().any(|tile| {
            tile.adjacency.iter().any(|id| {
                self.tiles
                    .get(&id)
                    .is_some_and(|n| n.is_live() && n.value == tile.value)
            })
        })
    }

    /// Enter the terminal state; input stays locked until the board is replaced
    pub fn declare_game_over(&mut self) {
        self.game_over = true;
        self.input_locked = true;
        self.events.push(GameEvent::GameOver);
        log::info!("Game over with {} tiles on the board", self.live_count());
    }

    /// Retire every tile (live or pending) and report their removal
    pub fn clear(&mut self) {
        let ids: Vec<TileId> = self.tiles.keys().copied().collect();
        for id in ids {
            self.tiles.remove(&id);
            self.events.push(GameEvent::Despawned { id });
        }
        self.occupied = [None; CELL_COUNT];
        self.input_locked = false;
        self.game_over = false;
    }
}

/// Displacement scan order: `cell+1`, `cell-1`, `cell+4`, `cell-4`
const DISPLACEMENT_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Forward,
    Direction::Back,
];

fn random_value<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> u8 {
    let lo = settings.spawn_value_min.max(1);
    let hi = settings.spawn_value_max.max(lo);
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board_with(tiles: &[(CellIndex, u8)]) -> Board {
        let mut board = Board::new();
        for &(cell, value) in tiles {
            board.spawn_at(cell, value).expect("free cell");
        }
        board.rebuild_adjacency();
        board.events.drain();
        board
    }

    #[test]
    fn test_spawn_at_rejects_taken_cell() {
        let mut board = board_with(&[(5, 1)]);
        assert_eq!(board.spawn_at(5, 2), None);
        assert_eq!(board.live_count(), 1);
        assert_eq!(board.occupant(5), Some(1));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut board = board_with(&[(0, 1), (1, 1)]);
        board.resolve_collision(1, 2, Direction::Left);
        board.flush_removals();
        assert_eq!(board.next_tile_id(), 3);
        let id = board.spawn_at(1, 1).expect("cell freed");
        assert_eq!(id, 3);
        assert_eq!(board.next_tile_id(), 4);
    }

    #[test]
    fn test_merge_left_keeps_lower_x() {
        for (a, b) in [(1, 2), (2, 1)] {
            let mut board = board_with(&[(0, 1), (1, 1)]);
            let outcome = board.resolve_collision(a, b, Direction::Left).expect("merge");
            assert_eq!(outcome.to, 1, "tile at x=0 survives");
            assert_eq!(outcome.from, 2, "tile at x=1 is destroyed");
            assert_eq!(outcome.value, 2);
            assert_eq!(board.tile(2).map(|t| t.value), Some(0));
            assert!(!board.tile(2).expect("pending").is_live());
        }
    }

    #[test]
    fn test_merge_right_and_vertical_orientation() {
        let mut board = board_with(&[(0, 1), (1, 1)]);
        let outcome = board.resolve_collision(1, 2, Direction::Right).expect("merge");
        assert_eq!((outcome.to, outcome.from), (2, 1));

        let mut board = board_with(&[(0, 2), (4, 2)]);
        let outcome = board.resolve_collision(1, 2, Direction::Forward).expect("merge");
        assert_eq!((outcome.to, outcome.from), (2, 1));

        let mut board = board_with(&[(0, 2), (4, 2)]);
        let outcome = board.resolve_collision(2, 1, Direction::Back).expect("merge");
        assert_eq!((outcome.to, outcome.from), (1, 2));
    }

    #[test]
    fn test_merge_events_in_order() {
        let mut board = board_with(&[(0, 3), (1, 3)]);
        board.resolve_collision(1, 2, Direction::Left);
        assert_eq!(
            board.events.drain(),
            vec![
                GameEvent::ScoreAdded { delta: 4 },
                GameEvent::MergeRemoved {
                    id: 2,
                    direction: Direction::Left
                },
                GameEvent::ValueChanged { id: 1, value: 4 },
            ]
        );
    }

    #[test]
    fn test_unequal_values_do_not_merge() {
        let mut board = board_with(&[(0, 1), (1, 2)]);
        assert_eq!(board.resolve_collision(1, 2, Direction::Left), None);
        assert!(board.events.is_empty());
    }

    #[test]
    fn test_retired_tile_cannot_merge_again() {
        let mut board = board_with(&[(0, 1), (1, 1), (2, 1)]);
        board.resolve_collision(1, 2, Direction::Left).expect("first merge");
        assert_eq!(board.resolve_collision(2, 3, Direction::Left), None);
        assert_eq!(board.tile(3).map(|t| t.value), Some(1));
    }

    #[test]
    fn test_survivor_can_merge_away_into_next_tile() {
        // [2, _, 1, 1] pushed left: the pair makes a 2 that then trails into the leading 2
        let mut board = board_with(&[(0, 2), (2, 1), (3, 1)]);
        board.begin_push(Direction::Left, 1.0);
        board.events.drain();

        let first = board.resolve_collision(3, 2, Direction::Left).expect("first merge");
        assert_eq!((first.from, first.to, first.value), (3, 2, 2));

        let second = board.resolve_collision(2, 1, Direction::Left).expect("chain merge");
        assert_eq!((second.from, second.to, second.value), (2, 1, 3));
        assert_eq!(board.tile(1).map(|t| t.value), Some(3));
        assert!(!board.tile(2).expect("pending").is_live());

        let score: u32 = board
            .events
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::ScoreAdded { delta } => Some(delta),
                _ => None,
            })
            .sum();
        assert_eq!(score, 2 + 3);
    }

    #[test]
    fn test_survivor_merges_once_per_cycle() {
        let mut board = board_with(&[(0, 1), (1, 1), (2, 2)]);
        board.resolve_collision(1, 2, Direction::Left).expect("first merge");
        // Tile 1 is now value 2 like tile 3, but already merged this cycle
        assert_eq!(board.resolve_collision(1, 3, Direction::Left), None);

        board.begin_push(Direction::Left, 1.0);
        assert!(board.resolve_collision(1, 3, Direction::Left).is_some());
    }

    #[test]
    fn test_snap_rounds_and_reports_settled() {
        let mut board = board_with(&[(5, 1)]);
        board.sync_position(1, Vec2::new(0.2, 0.9));
        let lost = board.snap();
        assert!(lost.is_empty());
        let tile = board.tile(1).expect("tile");
        assert_eq!(tile.cell, Some(4));
        assert_eq!(tile.position, Vec2::new(0.0, 1.0));
        assert_eq!(board.occupant(4), Some(1));
        assert_eq!(board.occupant(5), None);
        assert_eq!(
            board.events.drain(),
            vec![GameEvent::Settled {
                id: 1,
                cell: 4,
                position: Vec2::new(0.0, 1.0)
            }]
        );
    }

    #[test]
    fn test_snap_removes_tiles_off_board() {
        let mut board = board_with(&[(0, 1), (3, 1)]);
        board.sync_position(1, Vec2::new(-0.7, 0.0));
        board.sync_position(2, Vec2::new(3.4, 0.0));
        let lost = board.snap();
        assert_eq!(lost, vec![1]);
        assert_eq!(board.live_count(), 1);
        assert_eq!(board.tile(2).and_then(|t| t.cell), Some(3));
        assert!(board.events.as_slice().contains(&GameEvent::Lost { id: 1 }));
    }

    #[test]
    fn test_overlap_displacement_priority() {
        // Three tiles end up on cell 5; cell 6 (+1) is free, 4 (-1) is taken
        let mut board = board_with(&[(5, 1), (6, 2), (7, 3), (4, 4)]);
        board.sync_position(2, Vec2::new(1.0, 1.0));
        board.sync_position(3, Vec2::new(1.0, 1.0));
        board.snap();
        let report = board.resolve_overlaps();
        // Cell 6 was vacated by tile 2, so it is the first free candidate
        assert_eq!(report.displaced, vec![(2, 6), (3, 9)]);
        assert!(report.destroyed.is_empty());
        assert_eq!(board.occupant(5), Some(1));
    }

    #[test]
    fn test_overlap_without_free_neighbor_destroys_younger() {
        // Cell 5 neighbors (6, 4, 9, 1) are all occupied
        let mut board = board_with(&[(5, 1), (6, 2), (4, 3), (9, 4), (1, 5), (0, 6)]);
        board.sync_position(6, Vec2::new(1.0, 1.0));
        board.snap();
        let report = board.resolve_overlaps();
        assert!(report.displaced.is_empty());
        assert_eq!(report.destroyed, vec![6]);
        assert_eq!(board.occupant(5), Some(1));
        // Cell 0 was vacated, but displacement is one hop only
        assert_eq!(board.occupant(0), None);
    }

    #[test]
    fn test_adjacency_rebuilt_from_occupancy() {
        let board = board_with(&[(5, 1), (9, 1), (1, 1), (4, 1), (6, 1), (7, 1)]);
        let center = board.tile(1).expect("tile");
        assert_eq!(center.adjacency.above, Some(2));
        assert_eq!(center.adjacency.below, Some(3));
        assert_eq!(center.adjacency.left, Some(4));
        assert_eq!(center.adjacency.right, Some(5));
        // Cell 7 is a row end; cell 8 must not show up as its right neighbor
        assert_eq!(board.tile(6).expect("tile").adjacency.right, None);
    }

    #[test]
    fn test_playability_full_board() {
        // Checkerboard of 1/2 with no equal neighbors
        let cells: Vec<(CellIndex, u8)> = grid::cells()
            .map(|c| {
                let (x, z) = grid::to_coord(c);
                (c, 1 + (x + z) % 2)
            })
            .collect();
        let board = board_with(&cells);
        assert!(board.is_full());
        assert!(!board.is_playable());

        let mut cells = cells;
        cells[1].1 = cells[0].1;
        let board = board_with(&cells);
        assert!(board.is_playable());
    }

    #[test]
    fn test_partial_board_always_playable() {
        let board = board_with(&[(0, 1), (1, 2)]);
        assert!(board.is_playable());
    }

    #[test]
    fn test_spawn_tiles_fills_free_cells_only() {
        let mut rng = Pcg32::seed_from_u64(7);
        let settings = Settings::default();
        let occupied: Vec<(CellIndex, u8)> = (0..14).map(|c| (c, 1 + c % 2)).collect();
        let mut board = board_with(&occupied);
        let spawned = board.spawn_tiles(&mut rng, &settings);
        assert!((1..=2).contains(&spawned.len()));
        for id in spawned {
            let tile = board.tile(id).expect("spawned");
            assert!(tile.cell.is_some_and(|c| c >= 14));
            assert!((1..=2).contains(&tile.value));
        }
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let cells: Vec<(CellIndex, u8)> = grid::cells().map(|c| (c, 1)).collect();
        let mut board = board_with(&cells);
        assert!(board.spawn_tiles(&mut rng, &Settings::default()).is_empty());
        assert!(board.events.is_empty());
    }

    #[test]
    fn test_spawn_initial_places_between_one_and_four() {
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut board = Board::new();
            board.spawn_initial(&mut rng, &Settings::default());
            let count = board.live_count();
            assert!((1..=4).contains(&count), "seed {seed}: {count} tiles");
            let cells: BTreeSet<_> = board.tiles().filter_map(|t| t.cell).collect();
            assert_eq!(cells.len(), count, "seed {seed}: cells must be distinct");
        }
    }

    #[test]
    fn test_game_over_locks_input_for_good() {
        let mut board = board_with(&[(0, 1)]);
        board.declare_game_over();
        board.unlock_input();
        assert!(board.input_locked);
        assert_eq!(board.events.drain(), vec![GameEvent::GameOver]);
    }
}
