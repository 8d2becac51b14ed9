//! Spawn scheduling
//!
//! Two interchangeable pacing policies, one active per run. Both only decide
//! *what* appears and *where*; the tick loop wraps every enemy they produce in
//! a telegraph before it goes live.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::enemies::{EnemyKind, OrangeArrow};
use super::entity::Entity;
use crate::consts::BOARD_SIZE;
use crate::settings::SpawnMode;
use crate::tuning::SpawnTuning;

/// Enemies produced by one spawner tick
#[derive(Debug, Default)]
pub struct SpawnBatch {
    pub enemies: Vec<Entity>,
    /// `(wave number, interval it launched at)` when a wave went out
    pub wave: Option<(u32, f32)>,
}

/// Uniformly random board position
fn random_position(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=BOARD_SIZE),
        rng.random_range(0.0..=BOARD_SIZE),
    )
}

/// Weighted draw from the spawn table; `None` if every weight is zero
pub fn pick_weighted(weights: &[(EnemyKind, u32)], rng: &mut Pcg32) -> Option<EnemyKind> {
    let total: u32 = weights.iter().map(|&(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for &(kind, weight) in weights {
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }
    None
}

/// Steady single spawns; the interval shrinks forever.
///
/// Once `every` drops below one tick a spawn happens on every tick, but the
/// interval keeps shrinking. It is kept in `f64` so it stays strictly
/// decreasing for roughly 149,000 spawns at the default decay (about 41
/// minutes of play); past that it bottoms out at the smallest subnormal.
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    /// Ticks between spawns
    pub every: f64,
    countdown: f64,
}

impl RandomSpawner {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            every: f64::from(tuning.random_initial_every),
            countdown: f64::from(tuning.random_initial_every),
        }
    }

    pub fn tick(&mut self, rng: &mut Pcg32, tuning: &SpawnTuning) -> Option<Entity> {
        self.countdown -= 1.0;
        if self.countdown > 0.0 {
            return None;
        }
        self.every *= f64::from(tuning.random_decay);
        self.countdown = self.every;

        let kind = pick_weighted(&tuning.weights, rng)?;
        let pos = random_position(rng);
        Some(kind.build(pos, rng))
    }
}

/// Board edge a wave row enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Point on this edge at `along` (measured on the other axis)
    fn point(self, along: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along, 0.0),
            Edge::Bottom => Vec2::new(along, BOARD_SIZE),
            Edge::Left => Vec2::new(0.0, along),
            Edge::Right => Vec2::new(BOARD_SIZE, along),
        }
    }

    /// Direction pointing into the board
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
        }
    }
}

/// Which part of an edge a row covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Low,
    High,
    Both,
}

impl Half {
    const ALL: [Half; 3] = [Half::Low, Half::High, Half::Both];

    fn range(self) -> (f32, f32) {
        let mid = BOARD_SIZE / 2.0;
        match self {
            Half::Low => (0.0, mid),
            Half::High => (mid, BOARD_SIZE),
            Half::Both => (0.0, BOARD_SIZE),
        }
    }
}

/// Arrow row along `edge`, evenly spaced over `half`, all heading inward
pub fn wave_row(edge: Edge, half: Half, spacing: f32) -> Vec<Entity> {
    let (lo, hi) = half.range();
    let spacing = spacing.max(0.1);
    let mut along = lo + spacing / 2.0;
    let mut row = Vec::new();
    while along < hi {
        row.push(OrangeArrow::entity(edge.point(along), edge.inward()));
        along += spacing;
    }
    row
}

/// Periodic edge waves with a floored interval
#[derive(Debug, Clone)]
pub struct WaveSpawner {
    /// Ticks between waves
    pub interval: f32,
    countdown: f32,
    /// Waves launched so far
    pub waves: u32,
}

impl WaveSpawner {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            interval: tuning.wave_initial_interval,
            countdown: tuning.wave_initial_interval,
            waves: 0,
        }
    }

    /// Interval after one more wave: decayed, but never below the floor
    pub fn next_interval(interval: f32, tuning: &SpawnTuning) -> f32 {
        (interval * tuning.wave_decay).max(tuning.wave_min_interval)
    }

    /// Bonus enemies for a wave launched at `interval`
    pub fn bonus_kinds(interval: f32, tuning: &SpawnTuning) -> Vec<EnemyKind> {
        let mut kinds = Vec::new();
        let copies = if interval < tuning.bonus_double_below { 2 } else { 1 };
        for _ in 0..copies {
            if interval < tuning.bonus_pink_below {
                kinds.push(EnemyKind::PinkSquares);
            }
            if interval < tuning.bonus_diamond_below {
                kinds.push(EnemyKind::BlueDiamond);
            }
        }
        kinds
    }

    pub fn tick(&mut self, rng: &mut Pcg32, tuning: &SpawnTuning) -> SpawnBatch {
        self.countdown -= 1.0;
        if self.countdown > 0.0 {
            return SpawnBatch::default();
        }

        let launched_at = self.interval;
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let half = Half::ALL[rng.random_range(0..Half::ALL.len())];
        let mut enemies = wave_row(edge, half, tuning.wave_row_spacing);
        for kind in Self::bonus_kinds(launched_at, tuning) {
            let pos = random_position(rng);
            enemies.push(kind.build(pos, rng));
        }

        self.waves += 1;
        self.interval = Self::next_interval(self.interval, tuning);
        self.countdown = self.interval;
        log::trace!("Wave {} from {:?} ({:?})", self.waves, edge, half);

        SpawnBatch {
            enemies,
            wave: Some((self.waves, launched_at)),
        }
    }
}

/// The active pacing policy
#[derive(Debug, Clone)]
pub enum SpawnPolicy {
    Random(RandomSpawner),
    Waves(WaveSpawner),
}

impl SpawnPolicy {
    pub fn new(mode: SpawnMode, tuning: &SpawnTuning) -> Self {
        match mode {
            SpawnMode::Random => SpawnPolicy::Random(RandomSpawner::new(tuning)),
            SpawnMode::Waves => SpawnPolicy::Waves(WaveSpawner::new(tuning)),
        }
    }

    pub fn mode(&self) -> SpawnMode {
        match self {
            SpawnPolicy::Random(_) => SpawnMode::Random,
            SpawnPolicy::Waves(_) => SpawnMode::Waves,
        }
    }

    pub fn tick(&mut self, rng: &mut Pcg32, tuning: &SpawnTuning) -> SpawnBatch {
        match self {
            SpawnPolicy::Random(random) => SpawnBatch {
                enemies: random.tick(rng, tuning).into_iter().collect(),
                wave: None,
            },
            SpawnPolicy::Waves(waves) => waves.tick(rng, tuning),
        }
    }
}
