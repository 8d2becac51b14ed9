//! Purple box: a heavy homing enemy that bursts into orbiting remnants

use std::f32::consts::TAU;

use glam::Vec2;

use super::{Enemy, EnemyVariant, strike_player};
use crate::consts::BOARD_SIZE;
use crate::sim::entity::{Body, Outcome};
use crate::sim::geom::{clamp_to_board, heading_from_angle, normalize_angle};
use crate::sim::state::GameState;

/// Velocity gained per tick toward the nearest player
pub const ACCEL: f32 = 0.0015;
/// Per-tick velocity decay
pub const FRICTION: f32 = 0.995;

/// Remnants released on a scored kill
pub const REMNANT_COUNT: usize = 3;
pub const REMNANT_RADIUS: f32 = 0.6;
/// Radians per tick around the death point
pub const REMNANT_ORBIT_SPEED: f32 = 0.08;
/// Ticks before bullets can hit a fresh remnant
pub const REMNANT_INVULNERABLE_TICKS: u32 = 30;
/// Ticks before an untouched remnant fades out
pub const REMNANT_LIFETIME: u32 = 420;

#[derive(Debug, Clone, Default)]
pub struct PurpleBox {
    pub vel: Vec2,
}

impl PurpleBox {
    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        if let Some(player) = state.nearest_player(*body.pos) {
            let toward = (player.pos - *body.pos).normalize_or_zero();
            self.vel += toward * ACCEL;
        }
        self.vel *= FRICTION;

        let next = *body.pos + self.vel;
        let clamped = clamp_to_board(next);
        if clamped.x != next.x {
            self.vel.x = 0.0;
        }
        if clamped.y != next.y {
            self.vel.y = 0.0;
        }
        *body.pos = clamped;

        body.pose.rotation.y += self.vel.length();
        strike_player(*body.pos, state)
    }
}

/// Short-lived fragment circling where a purple box died
#[derive(Debug, Clone)]
pub struct PurpleBoxRemnant {
    pub center: Vec2,
    pub angle: f32,
    /// Ticks left before bullets can hit it
    pub invulnerable: u32,
    pub age: u32,
}

impl PurpleBoxRemnant {
    pub fn new(center: Vec2, angle: f32) -> Self {
        Self {
            center,
            angle,
            invulnerable: REMNANT_INVULNERABLE_TICKS,
            age: 0,
        }
    }

    /// Orbit position for the current angle
    pub fn orbit_position(&self) -> Vec2 {
        self.center + heading_from_angle(self.angle) * REMNANT_RADIUS
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.age += 1;
        if self.age > REMNANT_LIFETIME {
            return Outcome::Vanish;
        }
        self.invulnerable = self.invulnerable.saturating_sub(1);

        self.angle = normalize_angle(self.angle + REMNANT_ORBIT_SPEED);
        *body.pos = self.orbit_position();
        body.pose.rotation.y = -self.angle;
        body.pose.opacity = if self.invulnerable > 0 { 0.5 } else { 1.0 };

        strike_player(*body.pos, state)
    }
}

/// Release the remnant ring around `pos`
pub(super) fn spawn_remnants(pos: Vec2, state: &mut GameState) {
    let center = pos.clamp(
        Vec2::splat(REMNANT_RADIUS),
        Vec2::splat(BOARD_SIZE - REMNANT_RADIUS),
    );
    for i in 0..REMNANT_COUNT {
        let angle = i as f32 * TAU / REMNANT_COUNT as f32;
        let remnant = PurpleBoxRemnant::new(center, angle);
        let mut entity = Enemy::entity(remnant.orbit_position(), EnemyVariant::PurpleBoxRemnant(remnant));
        entity.pose.opacity = 0.5;
        state.spawn(entity);
    }
}
