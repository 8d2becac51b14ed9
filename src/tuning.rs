//! Data-driven game balance
//!
//! Every field has a default, and partial JSON files only override what they
//! name. Physical constants that are not balance knobs live in `consts`.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::enemies::EnemyKind;

/// Player movement and firing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Board units per tick
    pub speed: f32,
    /// Ticks between volleys
    pub shoot_cooldown: u32,
    /// Angular offset (radians) of the outer bullets of a volley
    pub volley_spread: f32,
    /// Board units per tick
    pub bullet_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 0.08,
            shoot_cooldown: 20,
            volley_spread: 0.12,
            bullet_speed: 0.25,
        }
    }
}

/// Spawn pacing for both policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Total telegraph delay before a spawned enemy goes live
    pub telegraph_ticks: u32,
    /// Warning ghost toggles visibility this often
    pub warning_blink_ticks: u32,

    /// Random policy: initial ticks between spawns
    pub random_initial_every: f32,
    /// Random policy: multiplicative shrink after each spawn (no floor)
    pub random_decay: f32,
    /// Random policy: relative draw weights
    pub weights: Vec<(EnemyKind, u32)>,

    /// Wave policy: initial ticks between waves
    pub wave_initial_interval: f32,
    /// Wave policy: multiplicative shrink after each wave
    pub wave_decay: f32,
    /// Wave policy: interval never drops below this
    pub wave_min_interval: f32,
    /// Wave policy: distance between arrows in a row
    pub wave_row_spacing: f32,
    /// Wave policy: below this interval, add a PinkSquares to each wave
    pub bonus_pink_below: f32,
    /// Wave policy: below this interval, add a BlueDiamond to each wave
    pub bonus_diamond_below: f32,
    /// Wave policy: below this interval, double the bonus enemies
    pub bonus_double_below: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            telegraph_ticks: 60,
            warning_blink_ticks: 10,
            random_initial_every: 90.0,
            random_decay: 0.995,
            weights: vec![
                (EnemyKind::BlueDiamond, 10),
                (EnemyKind::PinkSquares, 10),
                (EnemyKind::Pinwheel, 10),
                (EnemyKind::OrangeArrow, 10),
                (EnemyKind::PurpleBox, 2),
            ],
            wave_initial_interval: 480.0,
            wave_decay: 0.95,
            wave_min_interval: 80.0,
            wave_row_spacing: 1.0,
            bonus_pink_below: 400.0,
            bonus_diamond_below: 250.0,
            bonus_double_below: 150.0,
        }
    }
}

/// Pickup lifetimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    /// Ticks a dropped pickup stays on the board
    pub rice_lifetime: u32,
    /// Ticks the collection visual takes to home into the player
    pub collect_ticks: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            rice_lifetime: 360,
            collect_ticks: 12,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub pickups: PickupTuning,
}

impl Tuning {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid tuning JSON")
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
