//! Fixed timestep simulation tick
//!
//! One call advances the whole board by one logical tick. Entities update in
//! id order over a snapshot taken at the start of the pass.

use glam::Vec2;

use super::effects::Spawning;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held movement direction (clamped to unit length)
    pub move_dir: Vec2,
    /// Shoot at this board position (rate-limited by the player's cooldown)
    pub shoot: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed at tick {}", state.time_ticks);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;
    state.input = input.clone();

    // Entities spawned during the pass wait for the next tick; entities
    // removed before their turn are skipped by the failed checkout
    for id in state.registry.ids() {
        let Some(mut entity) = state.registry.checkout(id) else {
            continue;
        };
        entity.tick(state);
        state.registry.checkin(entity);
    }

    if state.phase == GamePhase::Playing {
        run_spawner(state);
    }
}

fn run_spawner(state: &mut GameState) {
    let Some(spawner) = state.spawner.as_mut() else {
        return;
    };
    let batch = spawner.tick(&mut state.rng, &state.tuning.spawn);

    if let Some((wave, interval)) = batch.wave {
        log::info!(
            "Wave {} launched: {} enemies (interval {:.1} ticks)",
            wave,
            batch.enemies.len(),
            interval
        );
        state.push_event(GameEvent::WaveLaunched { wave, interval });
    }
    for enemy in batch.enemies {
        log::debug!(
            "Telegraphing {:?} at ({:.2}, {:.2})",
            enemy.enemy().map(|e| e.kind()),
            enemy.pos.x,
            enemy.pos.y
        );
        let telegraph = Spawning::wrap(enemy, &state.tuning.spawn);
        state.spawn(telegraph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SpawnMode;
    use crate::sim::enemies::{BlueDiamond, Enemy, EnemyVariant, Pinwheel};
    use crate::sim::entity::{Entity, EntityKind};
    use crate::sim::pickups::Rice;
    use crate::sim::player::{Bullet, Player};
    use crate::sim::spawner::SpawnPolicy;
    use crate::tuning::Tuning;

    fn player_at(state: &mut GameState, pos: Vec2) {
        state.spawn(Entity::new(pos, EntityKind::Player(Player::default())));
    }

    #[test]
    fn test_removed_entity_never_returns() {
        let mut state = GameState::sandbox(1);
        let id = state.spawn(Pinwheel::stationary_entity(Vec2::new(3.0, 3.0)));
        assert!(state.registry.remove(id).is_some());
        assert!(state.registry.remove(id).is_none());

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.registry.contains(id));
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_entity_destroyed_earlier_in_pass_never_ticks() {
        let mut state = GameState::sandbox(1);
        state.spawn(Entity::new(
            Vec2::new(4.8, 5.0),
            EntityKind::Bullet(Bullet::new(Vec2::X, 0.25)),
        ));
        let enemy = state.spawn(Pinwheel::stationary_entity(Vec2::new(5.0, 5.0)));
        // Close enough that a live pinwheel tick would strike
        player_at(&mut state, Vec2::new(5.5, 5.0));

        tick(&mut state, &TickInput::default());

        assert!(!state.registry.contains(enemy));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player().is_some());
        // Shards copy the pose at destruction, before any spin this tick
        let shards: Vec<&Entity> = state
            .registry
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::DeathParticle(_)))
            .collect();
        assert!(!shards.is_empty());
        for shard in shards {
            assert_eq!(shard.pose.rotation.y, 0.0);
            assert_eq!(shard.pos, Vec2::new(5.0, 5.0));
        }
    }

    #[test]
    fn test_promoted_enemy_waits_for_next_tick() {
        let mut state = GameState::sandbox(1);
        let start = Vec2::new(3.0, 3.0);
        let enemy = Enemy::entity(start, EnemyVariant::Pinwheel(Pinwheel::new(Vec2::X)));
        let rest_pose = enemy.pose;
        state.spawn(Spawning::wrap(enemy, &state.tuning.spawn));

        let delay = state.tuning.spawn.telegraph_ticks;
        for _ in 0..delay {
            tick(&mut state, &TickInput::default());
        }
        let live = state.registry.iter().find(|e| e.is_enemy()).unwrap();
        assert_eq!(live.pos, start);
        assert_eq!(live.pose, rest_pose);
        let id = live.id;

        tick(&mut state, &TickInput::default());
        let live = state.registry.get(id).unwrap();
        assert!(live.pos.x > start.x);
        assert!(live.pose.rotation.y > rest_pose.rotation.y);
    }

    #[test]
    fn test_two_bullets_score_once() {
        let mut state = GameState::sandbox(1);
        let enemy = state.spawn(Pinwheel::stationary_entity(Vec2::new(5.0, 5.0)));
        for from in [Vec2::new(4.6, 5.0), Vec2::new(5.4, 5.0)] {
            state.spawn(Entity::new(
                from,
                EntityKind::Bullet(Bullet::new(Vec2::X, 0.0)),
            ));
        }

        tick(&mut state, &TickInput::default());

        assert!(!state.registry.contains(enemy));
        assert_eq!(state.score.points(), 1);
        assert_eq!(state.score.kills(), 1);
        // The first bullet is spent, the second found nothing and lives on
        assert_eq!(
            state
                .registry
                .count(|e| matches!(e.kind, EntityKind::Bullet(_))),
            1
        );
        let kills = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_blue_diamond_approaches_player() {
        let mut state = GameState::sandbox(1);
        let center = crate::sim::geom::board_center();
        player_at(&mut state, center);
        let start = center + Vec2::new(3.0, -2.0);
        let id = state.spawn(Enemy::entity(
            start,
            EnemyVariant::BlueDiamond(BlueDiamond::default()),
        ));

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        let pos = state.registry.get(id).unwrap().pos;
        assert!(pos.distance(center) < start.distance(center));
    }

    #[test]
    fn test_bullet_kills_stationary_pinwheel() {
        let mut state = GameState::sandbox(1);
        player_at(&mut state, Vec2::new(2.0, 5.0));
        let multiplier = state.score.collect_pickup();
        assert_eq!(multiplier, 2);

        let target = Vec2::new(2.5, 5.0);
        let enemy = state.spawn(Pinwheel::stationary_entity(Vec2::new(2.5 + 0.5, 5.0)));
        state.spawn(Entity::new(
            target,
            EntityKind::Bullet(Bullet::new(Vec2::X, 0.25)),
        ));

        let mut ticks = 0;
        while state.registry.contains(enemy) {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks <= 5, "enemy survived five ticks");
        }
        assert_eq!(state.score.points(), multiplier);
    }

    #[test]
    fn test_fired_volley_hits_enemy() {
        let mut state = GameState::sandbox(1);
        player_at(&mut state, Vec2::new(5.0, 5.0));
        let enemy = state.spawn(Pinwheel::stationary_entity(Vec2::new(5.0, 2.0)));
        let input = TickInput {
            shoot: Some(Vec2::new(5.0, 2.0)),
            ..Default::default()
        };

        for _ in 0..20 {
            tick(&mut state, &input);
        }
        assert!(!state.registry.contains(enemy));
        assert_eq!(state.score.points(), 1);
    }

    #[test]
    fn test_spawned_enemy_is_telegraphed() {
        // No player, so nothing can end the run early
        let mut state = GameState::sandbox(3);
        state.tuning.spawn.random_initial_every = 1.0;
        state.spawner = Some(SpawnPolicy::new(SpawnMode::Random, &state.tuning.spawn));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_count(), 0);
        assert_eq!(
            state
                .registry
                .count(|e| matches!(e.kind, EntityKind::Spawning(_))),
            1
        );

        let delay = state.tuning.spawn.telegraph_ticks;
        for _ in 0..delay {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemy_count() >= 1);
    }

    #[test]
    fn test_rice_raises_multiplier() {
        let mut state = GameState::sandbox(1);
        player_at(&mut state, Vec2::new(5.0, 5.0));
        for offset in [0.5, -0.5, 1.2] {
            state.spawn(Entity::new(
                Vec2::new(5.0 + offset, 5.0),
                EntityKind::Rice(Rice::new(360)),
            ));
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score.multiplier(), 4);

        let enemy = state.spawn(Pinwheel::stationary_entity(Vec2::new(1.0, 1.0)));
        assert!(state.destroy(enemy, true));
        assert_eq!(state.score.points(), 4);
    }

    #[test]
    fn test_game_over_stops_spawner_but_not_particles() {
        let mut tuning = Tuning::default();
        tuning.spawn.random_initial_every = 1.0;
        let mut state = GameState::new(3, tuning, SpawnMode::Random, 0);
        let player = state.player().unwrap().id;
        state.destroy(player, false);
        assert_eq!(state.phase, GamePhase::GameOver);
        let particles = state.particle_count();
        assert!(particles > 0);

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(
            state
                .registry
                .count(|e| matches!(e.kind, EntityKind::Spawning(_))),
            0
        );
        assert_eq!(state.time_ticks, 5);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::sandbox(1);
        player_at(&mut state, Vec2::new(5.0, 5.0));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let moving = TickInput {
            move_dir: Vec2::X,
            ..Default::default()
        };
        tick(&mut state, &moving);
        assert_eq!(state.player_pos(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default(), SpawnMode::Waves, 0);
        let mut state2 = GameState::new(99999, Tuning::default(), SpawnMode::Waves, 0);

        let inputs = [
            TickInput {
                move_dir: Vec2::new(0.3, -1.0),
                ..Default::default()
            },
            TickInput {
                shoot: Some(Vec2::new(9.0, 1.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.registry.len(), state2.registry.len());
        for (a, b) in state1.registry.iter().zip(state2.registry.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.score.scoreboard(), state2.score.scoreboard());
        assert_eq!(state1.phase, state2.phase);
    }
}
