//! Points, combo multiplier and high score

use serde::{Deserialize, Serialize};

/// What the display collaborator shows each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub points: u64,
    pub multiplier: u64,
    pub high_score: u64,
}

/// Score state for one session.
///
/// Points only grow on scored kills, by exactly the multiplier in effect.
/// The multiplier only grows (one per collected pickup) and is reset only when
/// a new life starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    points: u64,
    multiplier: u64,
    high_score: u64,
    kills: u64,
}

impl ScoreTracker {
    /// Start a session with the persisted high score
    pub fn new(high_score: u64) -> Self {
        Self {
            points: 0,
            multiplier: 1,
            high_score,
            kills: 0,
        }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn kills(&self) -> u64 {
        self.kills
    }

    /// Credit a scored enemy destruction; returns the points awarded
    pub fn award_kill(&mut self) -> u64 {
        self.points = self.points.saturating_add(self.multiplier);
        self.kills += 1;
        self.multiplier
    }

    /// Credit a collected pickup; returns the new multiplier
    pub fn collect_pickup(&mut self) -> u64 {
        self.multiplier = self.multiplier.saturating_add(1);
        self.multiplier
    }

    /// Fold current points into the high score; returns true on a new best
    pub fn commit_high_score(&mut self) -> bool {
        let improved = self.points > self.high_score;
        self.high_score = self.high_score.max(self.points);
        improved
    }

    /// Fresh life: keep the high score, clear everything else
    pub fn reset_run(&mut self) {
        *self = Self::new(self.high_score);
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            points: self.points,
            multiplier: self.multiplier,
            high_score: self.high_score,
        }
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(0)
    }
}
