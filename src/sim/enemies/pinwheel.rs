//! Pinwheel: drifts at constant speed and bounces off the board edges

use glam::Vec2;

use super::{Enemy, EnemyVariant, strike_player};
use crate::consts::BOARD_SIZE;
use crate::sim::entity::{Body, Entity, Outcome};
use crate::sim::state::GameState;

/// Board units per tick
pub const SPEED: f32 = 0.03;
/// Radians per tick
pub const SPIN: f32 = 0.08;

#[derive(Debug, Clone)]
pub struct Pinwheel {
    pub vel: Vec2,
}

impl Pinwheel {
    pub fn new(heading: Vec2) -> Self {
        Self {
            vel: heading.normalize_or_zero() * SPEED,
        }
    }

    /// A pinwheel that spins in place (targets for tests and demos)
    pub fn stationary_entity(pos: Vec2) -> Entity {
        Enemy::entity(pos, EnemyVariant::Pinwheel(Self { vel: Vec2::ZERO }))
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        let mut next = *body.pos + self.vel;

        // Mirror back inside and flip the offending component
        if next.x < 0.0 {
            next.x = -next.x;
            self.vel.x = self.vel.x.abs();
        } else if next.x > BOARD_SIZE {
            next.x = 2.0 * BOARD_SIZE - next.x;
            self.vel.x = -self.vel.x.abs();
        }
        if next.y < 0.0 {
            next.y = -next.y;
            self.vel.y = self.vel.y.abs();
        } else if next.y > BOARD_SIZE {
            next.y = 2.0 * BOARD_SIZE - next.y;
            self.vel.y = -self.vel.y.abs();
        }

        *body.pos = next;
        body.pose.rotation.y += SPIN;
        strike_player(*body.pos, state)
    }
}
