//! Kinematic physics stand-in
//!
//! Not a rigid-body solver: bodies slide at constant velocity along their
//! impulse, stop at the board walls, and stop against the first solid body
//! ahead of them in the same lane. Each time a body comes to rest against a
//! new body, the pair is reported as a contact. Enough to drive the board
//! headless and in tests.

use std::collections::BTreeMap;

use glam::Vec2;

use super::Physics;
use crate::consts::GRID_SIZE;
use crate::sim::TileId;

/// Bodies closer than this across the push axis share a lane
const LANE_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone)]
struct Body {
    pos: Vec2,
    /// Velocity from impulses; kept while resting so a body follows once
    /// whatever stopped it gets out of the way
    drive: Vec2,
    solid: bool,
    resting_on: Option<TileId>,
    moved: bool,
}

impl Body {
    fn new(pos: Vec2) -> Self {
        Self {
            pos,
            drive: Vec2::ZERO,
            solid: true,
            resting_on: None,
            moved: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KinematicWorld {
    bodies: BTreeMap<TileId, Body>,
    contacts: Vec<(TileId, TileId)>,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether any body moved during the last step
    pub fn is_moving(&self) -> bool {
        self.bodies.values().any(|b| b.moved)
    }

    /// Move bodies forward by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let max = Vec2::splat((GRID_SIZE - 1) as f32);

        // Leading bodies first so followers see where leaders stopped
        let mut order: Vec<(TileId, f32)> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.drive != Vec2::ZERO)
            .map(|(&id, b)| (id, b.pos.dot(b.drive.normalize_or_zero())))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        for body in self.bodies.values_mut() {
            body.moved = false;
        }

        for (id, _) in order {
            let Some(body) = self.bodies.get(&id).cloned() else {
                continue;
            };
            let dir = body.drive.normalize_or_zero();
            let mut target = (body.pos + body.drive * dt).clamp(Vec2::ZERO, max);
            let mut hit = None;

            if body.solid {
                let from = body.pos.dot(dir);
                let travel = target.dot(dir);
                // Nearest solid body ahead in the same lane
                let blocker = self
                    .bodies
                    .iter()
                    .filter(|(other, b)| **other != id && b.solid)
                    .filter(|(_, b)| (b.pos - body.pos).perp_dot(dir).abs() < LANE_TOLERANCE)
                    .map(|(&other, b)| (other, b.pos.dot(dir)))
                    .filter(|&(_, ahead)| ahead > from)
                    .min_by(|a, b| a.1.total_cmp(&b.1));
                if let Some((other, ahead)) = blocker {
                    let limit = ahead - 1.0;
                    if travel >= limit {
                        // Keep the cross-axis component, land exactly one cell short
                        target = body.pos - dir * from + dir * limit.max(from);
                        hit = Some(other);
                    }
                }
            }

            if hit.is_some() && hit != body.resting_on {
                if let Some(other) = hit {
                    self.contacts.push((id, other));
                }
            }
            if let Some(body) = self.bodies.get_mut(&id) {
                body.moved = target != body.pos;
                body.pos = target;
                body.resting_on = hit;
            }
        }
    }
}

impl Physics for KinematicWorld {
    fn position(&self, id: TileId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn take_contacts(&mut self) -> Vec<(TileId, TileId)> {
        std::mem::take(&mut self.contacts)
    }

    fn spawn_body(&mut self, id: TileId, position: Vec2) {
        self.bodies.insert(id, Body::new(position));
    }

    fn apply_impulse(&mut self, id: TileId, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.drive += impulse;
        }
    }

    fn disable_collision(&mut self, id: TileId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.solid = false;
        }
    }

    fn reset_velocity(&mut self, id: TileId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.drive = Vec2::ZERO;
            body.resting_on = None;
        }
    }

    fn place(&mut self, id: TileId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = position;
        }
    }

    fn remove_body(&mut self, id: TileId) {
        self.bodies.remove(&id);
    }
}
