//! Grid Wars - simulation core of a top-down vector arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, enemy behaviors, spawning, scoring)
//! - `frame`: Fixed timestep pump decoupling tick rate from display rate
//! - `render`: Seam to the external line renderer
//! - `session`: Host glue tying simulation, persistence and rendering together
//! - `highscores`: High score persistence
//! - `settings`: Player-facing preferences
//! - `tuning`: Data-driven game balance

pub mod frame;
pub mod highscores;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use frame::FramePump;
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use session::Session;
pub use settings::{QualityPreset, Settings, SpawnMode};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Side length of the square board (board coordinates span `[0, BOARD_SIZE]`)
    pub const BOARD_SIZE: f32 = 10.0;

    /// Logical simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum ticks per displayed frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Bullet to enemy hit distance
    pub const BULLET_HIT_RADIUS: f32 = 0.75;
    /// Enemy to player hit distance
    pub const ENEMY_HIT_RADIUS: f32 = 0.75;
    /// Player to pickup collection distance
    pub const PICKUP_RADIUS: f32 = 1.5;
}
