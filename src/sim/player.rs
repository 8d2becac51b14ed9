//! The player ship and its bullets

use glam::Vec2;

use super::collision;
use super::entity::{Body, Entity, EntityKind, Outcome};
use super::geom::{angle_of, clamp_to_board, heading_from_angle, in_board};
use super::state::{GameEvent, GamePhase, GameState};

/// Player ship state
#[derive(Debug, Clone, Default)]
pub struct Player {
    /// Facing angle (radians, board space)
    pub facing: f32,
    /// Ticks until the next volley may fire
    pub cooldown: u32,
}

impl Player {
    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        let tuning = &state.tuning.player;
        let dir = state.input.move_dir.clamp_length_max(1.0);

        *body.pos = clamp_to_board(*body.pos + dir * tuning.speed);
        if dir != Vec2::ZERO {
            self.facing = angle_of(dir);
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if let Some(target) = state.input.shoot
            && self.cooldown == 0
        {
            let aim = target - *body.pos;
            if aim.length_squared() > f32::EPSILON {
                self.facing = angle_of(aim);
            }
            self.cooldown = tuning.shoot_cooldown;

            let spread = tuning.volley_spread;
            let speed = tuning.bullet_speed;
            let origin = *body.pos;
            for offset in [-spread, 0.0, spread] {
                let bullet = Bullet::new(heading_from_angle(self.facing + offset), speed);
                state.spawn(Entity::new(origin, EntityKind::Bullet(bullet)));
            }
        }

        body.pose.rotation.y = -self.facing;
        Outcome::Alive
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Unit travel direction
    pub heading: Vec2,
    /// Board units per tick
    pub speed: f32,
}

impl Bullet {
    pub fn new(heading: Vec2, speed: f32) -> Self {
        Self {
            heading: heading.normalize_or_zero(),
            speed,
        }
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        *body.pos += self.heading * self.speed;
        body.pose.rotation.y = -angle_of(self.heading);

        if !in_board(*body.pos) {
            return Outcome::Vanish;
        }

        // First enemy found wins; it leaves the registry immediately so a
        // second bullet this tick cannot score it again
        if let Some(hit) = collision::bullet_target(&state.registry, *body.pos) {
            state.destroy(hit.id, true);
            return Outcome::Vanish;
        }
        Outcome::Alive
    }
}

/// Player death: clear every non-transient entity and commit the high score
pub(super) fn on_player_destroyed(player: &Entity, state: &mut GameState) {
    let doomed: Vec<_> = state
        .registry
        .iter()
        .filter(|e| !e.is_transient())
        .map(|e| e.id)
        .collect();
    for id in doomed {
        state.destroy(id, false);
    }

    let new_best = state.score.commit_high_score();
    let points = state.score.points();
    let high_score = state.score.high_score();
    log::info!(
        "Player {:?} destroyed at ({:.2}, {:.2}): {} points, high score {}{}",
        player.id,
        player.pos.x,
        player.pos.y,
        points,
        high_score,
        if new_best { " (new best)" } else { "" }
    );
    state.push_event(GameEvent::PlayerDied {
        points,
        high_score,
        new_best,
    });

    if state.player().is_none() {
        state.phase = GamePhase::GameOver;
    }
}
