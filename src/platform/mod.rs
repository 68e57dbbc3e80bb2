//! Collaborator boundary
//!
//! The core talks to the outside world through these traits:
//! - `Physics`: continuous positions, contact reports and body commands
//! - `ScoreSink`: merge score deltas
//! - `Visuals`: fire-and-forget presentation hooks
//! - `Audio`: fire-and-forget sound cues
//!
//! [`dispatch`] routes drained [`GameEvent`]s to the right collaborator.

mod kinematic;

pub use kinematic::KinematicWorld;

use glam::Vec2;

use crate::sim::{CellIndex, Direction, GameEvent, TileId};

/// Rigid-body world the tiles live in
pub trait Physics {
    /// Current continuous position of a tile's body (`x`, `z`)
    fn position(&self, id: TileId) -> Option<Vec2>;
    /// Tile pairs whose bodies started touching since the last call
    fn take_contacts(&mut self) -> Vec<(TileId, TileId)>;
    fn spawn_body(&mut self, id: TileId, position: Vec2);
    fn apply_impulse(&mut self, id: TileId, impulse: Vec2);
    /// Stop a body from colliding (merge losers, tiles off the board)
    fn disable_collision(&mut self, id: TileId);
    fn reset_velocity(&mut self, id: TileId);
    /// Move a body onto a cell center
    fn place(&mut self, id: TileId, position: Vec2);
    fn remove_body(&mut self, id: TileId);
}

pub trait ScoreSink {
    fn add_score(&mut self, delta: u32);
}

#[allow(unused_variables)]
pub trait Visuals {
    fn on_spawn(&mut self, id: TileId, cell: CellIndex, value: u8) {}
    fn on_value_changed(&mut self, id: TileId, value: u8) {}
    fn on_merge_removed(&mut self, id: TileId, direction: Direction) {}
    fn on_move_settled(&mut self, id: TileId, cell: CellIndex) {}
    fn on_lost(&mut self, id: TileId) {}
    fn on_game_over(&mut self) {}
}

#[allow(unused_variables)]
pub trait Audio {
    fn on_collision(&mut self, pitch: f32) {}
    fn on_merge(&mut self, pitch: f32) {}
}

/// Collaborators that ignore everything (headless runs)
#[derive(Debug, Default)]
pub struct Silent;

impl ScoreSink for Silent {
    fn add_score(&mut self, _delta: u32) {}
}
impl Visuals for Silent {}
impl Audio for Silent {}

/// Borrowed set of collaborators handed to each tick
pub struct Collaborators<'a> {
    pub physics: &'a mut dyn Physics,
    pub score: &'a mut dyn ScoreSink,
    pub visuals: &'a mut dyn Visuals,
    pub audio: &'a mut dyn Audio,
}

/// Forward events to collaborators, in order
pub fn dispatch(events: Vec<GameEvent>, out: &mut Collaborators<'_>) {
    for event in events {
        match event {
            GameEvent::Spawned { id, cell, value } => {
                out.physics.spawn_body(id, crate::sim::grid::cell_center(cell));
                out.visuals.on_spawn(id, cell, value);
            }
            GameEvent::ValueChanged { id, value } => out.visuals.on_value_changed(id, value),
            GameEvent::MergeRemoved { id, direction } => {
                out.physics.disable_collision(id);
                out.visuals.on_merge_removed(id, direction);
            }
            GameEvent::Lost { id } => {
                out.physics.disable_collision(id);
                out.visuals.on_lost(id);
            }
            GameEvent::Settled { id, cell, position } => {
                out.physics.reset_velocity(id);
                out.physics.place(id, position);
                out.visuals.on_move_settled(id, cell);
            }
            GameEvent::Impulse { id, impulse } => out.physics.apply_impulse(id, impulse),
            GameEvent::Despawned { id } => out.physics.remove_body(id),
            GameEvent::ScoreAdded { delta } => out.score.add_score(delta),
            GameEvent::Collision { pitch } => out.audio.on_collision(pitch),
            GameEvent::Merge { pitch } => out.audio.on_merge(pitch),
            GameEvent::GameOver => out.visuals.on_game_over(),
        }
    }
}
