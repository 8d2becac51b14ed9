//! Transient effects: death particles and spawn telegraphs

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, Entity, EntityId, EntityKind, Outcome, Visual};
use super::geom::heading_from_angle;
use super::state::GameState;
use crate::tuning::SpawnTuning;

const PARTICLE_DRAG: f32 = 0.96;
const PARTICLE_FADE: f32 = 0.95;
/// Particles below this opacity are dropped
const PARTICLE_MIN_OPACITY: f32 = 0.05;
const WARNING_OPACITY: f32 = 0.4;
const WARNING_SPIN: f32 = 0.05;

/// One line segment of a destroyed entity, flying off on its own
#[derive(Debug, Clone)]
pub struct DeathParticle {
    pub vel: Vec2,
    /// Radians per tick
    pub spin: f32,
}

impl DeathParticle {
    /// Break `entity` into one particle per visual segment, up to the
    /// remaining particle budget
    pub fn burst(entity: &Entity, state: &mut GameState) {
        let budget = state.particle_budget.saturating_sub(state.particle_count());
        let segments = entity.visual.lines.len().min(budget);
        if segments < entity.visual.lines.len() {
            log::trace!(
                "Particle budget reached, {} of {} segments burst",
                segments,
                entity.visual.lines.len()
            );
        }

        for line in entity.visual.lines.iter().take(segments) {
            let heading = heading_from_angle(state.rng.random_range(0.0..TAU));
            let particle = DeathParticle {
                vel: heading * state.rng.random_range(0.01..0.06),
                spin: state.rng.random_range(-0.2..0.2),
            };
            let mut shard = Entity::with_visual(
                entity.pos,
                EntityKind::DeathParticle(particle),
                Visual::new(vec![*line], entity.visual.color),
            );
            shard.pose = entity.pose;
            state.spawn(shard);
        }
    }

    pub fn tick(&mut self, body: Body<'_>) -> Outcome {
        *body.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        body.pose.rotation.z += self.spin;
        body.pose.opacity *= PARTICLE_FADE;

        if body.pose.opacity < PARTICLE_MIN_OPACITY {
            Outcome::Vanish
        } else {
            Outcome::Alive
        }
    }
}

/// Telegraph placeholder holding an enemy until it goes live
#[derive(Debug, Clone)]
pub struct Spawning {
    pub enemy: Box<Entity>,
    pub age: u32,
    /// Currently visible warning ghost
    pub warning: Option<EntityId>,
    /// Ticks until the enemy is promoted
    pub delay: u32,
    /// Ghost visibility toggle period
    pub blink: u32,
}

impl Spawning {
    /// Wrap a not-yet-spawned enemy in its telegraph
    pub fn wrap(enemy: Entity, tuning: &SpawnTuning) -> Entity {
        let pos = enemy.pos;
        let spawning = Spawning {
            enemy: Box::new(enemy),
            age: 0,
            warning: None,
            delay: tuning.telegraph_ticks,
            blink: tuning.warning_blink_ticks.max(1),
        };
        Entity::with_visual(pos, EntityKind::Spawning(spawning), Visual::empty())
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.age += 1;

        if self.age >= self.delay {
            let enemy = (*self.enemy).clone();
            log::debug!(
                "Telegraph {:?} promoted to live enemy at ({:.2}, {:.2})",
                body.id,
                enemy.pos.x,
                enemy.pos.y
            );
            state.spawn(enemy);
            // The warning ghost goes with the placeholder on vanish
            return Outcome::Vanish;
        }

        if (self.age - 1) % self.blink == 0 {
            match self.warning.take() {
                Some(id) => {
                    state.registry.remove(id);
                }
                None => {
                    self.warning = Some(state.spawn(SpawnWarning::ghost(&self.enemy)));
                }
            }
        }
        Outcome::Alive
    }

    /// Remove the warning ghost, if one is showing
    pub fn clear_warning(&self, state: &mut GameState) {
        if let Some(id) = self.warning {
            state.registry.remove(id);
        }
    }
}

/// Translucent ghost of the enemy about to appear
#[derive(Debug, Clone, Default)]
pub struct SpawnWarning {
    pub age: u32,
}

impl SpawnWarning {
    pub fn ghost(enemy: &Entity) -> Entity {
        let mut ghost = Entity::with_visual(
            enemy.pos,
            EntityKind::SpawnWarning(SpawnWarning::default()),
            enemy.visual.clone(),
        );
        ghost.pose = enemy.pose;
        ghost.pose.opacity = WARNING_OPACITY;
        ghost
    }

    pub fn tick(&mut self, body: Body<'_>) -> Outcome {
        self.age += 1;
        body.pose.rotation.y += WARNING_SPIN;
        Outcome::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemies::Pinwheel;
    use crate::sim::tick::{TickInput, tick};

    fn warnings(state: &GameState) -> usize {
        state
            .registry
            .count(|e| matches!(e.kind, EntityKind::SpawnWarning(_)))
    }

    #[test]
    fn test_burst_one_particle_per_segment() {
        let mut state = GameState::sandbox(11);
        let enemy = Pinwheel::stationary_entity(Vec2::new(2.0, 2.0));
        let segments = enemy.visual.lines.len();
        let id = state.spawn(enemy);
        state.destroy(id, false);
        assert_eq!(state.particle_count(), segments);

        let shard = state
            .registry
            .iter()
            .find(|e| matches!(e.kind, EntityKind::DeathParticle(_)))
            .unwrap();
        assert_eq!(shard.visual.lines.len(), 1);
        assert_eq!(shard.pos, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_burst_respects_budget() {
        let mut state = GameState::sandbox(11);
        state.particle_budget = 5;
        let id = state.spawn(Pinwheel::stationary_entity(Vec2::new(2.0, 2.0)));
        state.destroy(id, false);
        assert_eq!(state.particle_count(), 5);

        state.particle_budget = 0;
        let id = state.spawn(Pinwheel::stationary_entity(Vec2::new(6.0, 6.0)));
        state.destroy(id, false);
        assert_eq!(state.particle_count(), 5);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = GameState::sandbox(11);
        let id = state.spawn(Pinwheel::stationary_entity(Vec2::new(2.0, 2.0)));
        state.destroy(id, false);
        // 0.95^59 < 0.05
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.particle_count(), 0);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_warning_blinks_then_enemy_goes_live() {
        let mut state = GameState::sandbox(11);
        let tuning = state.tuning.spawn.clone();
        state.spawn(Spawning::wrap(
            Pinwheel::stationary_entity(Vec2::new(3.0, 7.0)),
            &tuning,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(warnings(&state), 1);
        assert_eq!(state.enemy_count(), 0);

        for _ in 1..tuning.warning_blink_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(warnings(&state), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(warnings(&state), 0);

        while state.enemy_count() == 0 {
            tick(&mut state, &TickInput::default());
            assert!(state.time_ticks <= tuning.telegraph_ticks as u64);
        }
        assert_eq!(state.time_ticks, tuning.telegraph_ticks as u64);
        assert_eq!(warnings(&state), 0);
        assert_eq!(
            state
                .registry
                .count(|e| matches!(e.kind, EntityKind::Spawning(_))),
            0
        );
    }

    #[test]
    fn test_destroyed_telegraph_takes_its_warning() {
        let mut state = GameState::sandbox(11);
        let tuning = state.tuning.spawn.clone();
        let id = state.spawn(Spawning::wrap(
            Pinwheel::stationary_entity(Vec2::new(3.0, 7.0)),
            &tuning,
        ));
        tick(&mut state, &TickInput::default());
        assert_eq!(warnings(&state), 1);

        state.destroy(id, false);
        assert_eq!(warnings(&state), 0);
        assert!(state.registry.is_empty());
    }
}
