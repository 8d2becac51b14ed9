//! High score persistence
//!
//! The simulation only knows the number; hosts pick where it lives. Native
//! builds keep it in a small JSON file, web builds in LocalStorage.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Persistence collaborator: read once at startup, written once per death
pub trait HighScoreStore {
    fn read_high_score(&mut self) -> anyhow::Result<u64>;
    fn write_high_score(&mut self, score: u64) -> anyhow::Result<()>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn read_high_score(&mut self) -> anyhow::Result<u64> {
        (**self).read_high_score()
    }

    fn write_high_score(&mut self, score: u64) -> anyhow::Result<()> {
        (**self).write_high_score(score)
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: u64,
    /// Number of writes seen
    pub writes: u32,
}

impl MemoryStore {
    pub fn new(value: u64) -> Self {
        Self { value, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&mut self) -> anyhow::Result<u64> {
        Ok(self.value)
    }

    fn write_high_score(&mut self, score: u64) -> anyhow::Result<()> {
        self.value = score;
        self.writes += 1;
        Ok(())
    }
}

/// JSON file store; a missing file reads as zero
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn read_high_score(&mut self) -> anyhow::Result<u64> {
        if !self.path.exists() {
            log::info!("No high score at {}, starting fresh", self.path.display());
            return Ok(0);
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading high score file {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("parsing high score file {}", self.path.display()))?;
        log::info!("Loaded high score {}", record.high_score);
        Ok(record.high_score)
    }

    fn write_high_score(&mut self, score: u64) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing high score file {}", self.path.display()))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "grid_wars_highscore";

    fn storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .context("LocalStorage unavailable")
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read_high_score(&mut self) -> anyhow::Result<u64> {
        let json = Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| anyhow::anyhow!("LocalStorage read failed"))?;
        let Some(json) = json else {
            log::info!("No high score found, starting fresh");
            return Ok(0);
        };
        let record: HighScoreRecord =
            serde_json::from_str(&json).context("parsing stored high score")?;
        Ok(record.high_score)
    }

    fn write_high_score(&mut self, score: u64) -> anyhow::Result<()> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| anyhow::anyhow!("LocalStorage write failed"))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}
