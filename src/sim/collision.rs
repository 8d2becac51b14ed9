//! Proximity collision queries
//!
//! Entity counts are in the tens, so every query is a linear scan over the
//! registry. Distances are Euclidean over board `{x, y}`.

use glam::Vec2;

use super::entity::{Entity, EntityId};
use super::geom::within;
use super::registry::Registry;
use crate::consts::{BULLET_HIT_RADIUS, ENEMY_HIT_RADIUS, PICKUP_RADIUS};

/// A matched entity and where it was
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: EntityId,
    pub pos: Vec2,
}

impl Hit {
    fn of(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            pos: entity.pos,
        }
    }
}

/// Nearest entity satisfying `pred`
pub fn nearest(registry: &Registry, pos: Vec2, pred: impl Fn(&Entity) -> bool) -> Option<Hit> {
    registry
        .iter()
        .filter(|e| pred(e))
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .partial_cmp(&b.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(Hit::of)
}

/// First entity (in registry order) within `radius` satisfying `pred`
pub fn first_within(
    registry: &Registry,
    pos: Vec2,
    radius: f32,
    pred: impl Fn(&Entity) -> bool,
) -> Option<Hit> {
    registry
        .iter()
        .find(|e| pred(e) && within(e.pos, pos, radius))
        .map(Hit::of)
}

/// Nearest live player
pub fn nearest_player(registry: &Registry, pos: Vec2) -> Option<Hit> {
    nearest(registry, pos, Entity::is_player)
}

/// Enemy a bullet at `pos` would destroy
pub fn bullet_target(registry: &Registry, pos: Vec2) -> Option<Hit> {
    first_within(registry, pos, BULLET_HIT_RADIUS, Entity::is_vulnerable_enemy)
}

/// Player touched by an enemy at `pos`
pub fn struck_player(registry: &Registry, pos: Vec2) -> Option<Hit> {
    first_within(registry, pos, ENEMY_HIT_RADIUS, Entity::is_player)
}

/// Player close enough to collect a pickup at `pos`
pub fn collecting_player(registry: &Registry, pos: Vec2) -> Option<Hit> {
    first_within(registry, pos, PICKUP_RADIUS, Entity::is_player)
}
