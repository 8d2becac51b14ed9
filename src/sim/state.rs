//! Simulation context
//!
//! `GameState` is the one object every component works through: the entity
//! registry, score, spawn policy, RNG and balance all live here and are only
//! ever mutated synchronously inside a tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hit;
use super::enemies::EnemyKind;
use super::entity::{Entity, EntityId, EntityKind};
use super::geom::board_center;
use super::player::Player;
use super::registry::Registry;
use super::score::ScoreTracker;
use super::spawner::SpawnPolicy;
use super::tick::TickInput;
use crate::settings::SpawnMode;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player destroyed; waiting for a restart
    GameOver,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled {
        kind: EnemyKind,
        pos: Vec2,
        awarded: u64,
    },
    PickupCollected {
        multiplier: u64,
    },
    WaveLaunched {
        wave: u32,
        interval: f32,
    },
    PlayerDied {
        points: u64,
        high_score: u64,
        new_best: bool,
    },
}

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub registry: Registry,
    pub score: ScoreTracker,
    /// Active spawn policy (`None` disables spawning)
    pub spawner: Option<SpawnPolicy>,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Input for the tick in progress
    pub input: TickInput,
    /// Maximum live death particles
    pub particle_budget: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Empty board: no player, no grid, no spawning
    pub fn sandbox(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            registry: Registry::new(),
            score: ScoreTracker::default(),
            spawner: None,
            tuning: Tuning::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            input: TickInput::default(),
            particle_budget: crate::settings::QualityPreset::default().max_particles(),
            events: Vec::new(),
        }
    }

    /// A fresh session: board grid, a player at the center, and the chosen
    /// spawn policy
    pub fn new(seed: u64, tuning: Tuning, mode: SpawnMode, high_score: u64) -> Self {
        let mut state = Self::sandbox(seed);
        state.score = ScoreTracker::new(high_score);
        state.spawner = Some(SpawnPolicy::new(mode, &tuning.spawn));
        state.tuning = tuning;
        state.spawn(Entity::new(Vec2::ZERO, EntityKind::Grid));
        state.spawn_player();
        log::info!(
            "Session started (seed {}, {} spawns, high score {})",
            seed,
            mode.as_str(),
            high_score
        );
        state
    }

    /// Add an entity to the board
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.registry.spawn(entity)
    }

    pub fn spawn_player(&mut self) -> EntityId {
        self.spawn(Entity::new(
            board_center(),
            EntityKind::Player(Player::default()),
        ))
    }

    /// Remove an entity and run its destruction effects.
    /// Returns false if it was not live (already removed or checked out).
    pub fn destroy(&mut self, id: EntityId, scored: bool) -> bool {
        match self.registry.remove(id) {
            Some(entity) => {
                entity.on_destroyed(self, scored);
                true
            }
            None => false,
        }
    }

    /// First live player
    pub fn player(&self) -> Option<&Entity> {
        self.registry.iter().find(|e| e.is_player())
    }

    pub fn player_pos(&self) -> Option<Vec2> {
        self.player().map(|p| p.pos)
    }

    /// Nearest live player to `pos`
    pub fn nearest_player(&self, pos: Vec2) -> Option<Hit> {
        super::collision::nearest_player(&self.registry, pos)
    }

    /// Live enemies (telegraphed spawns excluded)
    pub fn enemy_count(&self) -> usize {
        self.registry.count(Entity::is_enemy)
    }

    pub fn particle_count(&self) -> usize {
        self.registry
            .count(|e| matches!(e.kind, EntityKind::DeathParticle(_)))
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a new life after game over: fresh score run, fresh spawn pacing,
    /// a new player at the center. Leftover transient entities stay.
    pub fn restart(&mut self) {
        self.score.reset_run();
        if let Some(spawner) = self.spawner.as_mut() {
            *spawner = SpawnPolicy::new(spawner.mode(), &self.tuning.spawn);
        }
        if self.player().is_none() {
            self.spawn_player();
        }
        self.phase = GamePhase::Playing;
        log::info!("New life started at tick {}", self.time_ticks);
    }
}
