//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod enemies;
pub mod entity;
pub mod geom;
pub mod pickups;
pub mod player;
pub mod registry;
pub mod score;
pub mod shapes;
pub mod spawner;
pub mod state;
pub mod tick;

pub use entity::{Entity, EntityId, EntityKind, Line, Pose, Visual};
pub use enemies::{Enemy, EnemyVariant};
pub use registry::{RenderEvent, Registry};
pub use score::{Scoreboard, ScoreTracker};
pub use spawner::{RandomSpawner, SpawnPolicy, WaveSpawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
