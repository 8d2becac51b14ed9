//! Enemy variants
//!
//! Each variant is its own small state machine that only touches its own
//! entity. The one behavior they all share, touching the player, is the
//! explicit `strike_player` call at the end of every variant's tick.

pub mod blue_diamond;
pub mod orange_arrow;
pub mod pink_squares;
pub mod pinwheel;
pub mod purple_box;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

pub use blue_diamond::BlueDiamond;
pub use orange_arrow::OrangeArrow;
pub use pink_squares::{Direction, PinkSquares};
pub use pinwheel::Pinwheel;
pub use purple_box::{PurpleBox, PurpleBoxRemnant};

use super::collision;
use super::entity::{Body, Entity, EntityKind, Outcome};
use super::geom::{clamp_to_board, heading_from_angle};
use super::pickups::Rice;
use super::state::{GameEvent, GameState};

/// Variant tag, used by spawn tables and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    BlueDiamond,
    PinkSquares,
    Pinwheel,
    OrangeArrow,
    PurpleBox,
    PurpleBoxRemnant,
}

impl EnemyKind {
    /// Build a fresh enemy of this kind at `pos`, drawing any random initial
    /// state (headings, directions) from `rng`
    pub fn build(self, pos: Vec2, rng: &mut Pcg32) -> Entity {
        let variant = match self {
            EnemyKind::BlueDiamond => EnemyVariant::BlueDiamond(BlueDiamond::default()),
            EnemyKind::PinkSquares => {
                return PinkSquares::entity(pos);
            }
            EnemyKind::Pinwheel => {
                let heading = heading_from_angle(rng.random_range(0.0..std::f32::consts::TAU));
                EnemyVariant::Pinwheel(Pinwheel::new(heading))
            }
            EnemyKind::OrangeArrow => {
                let heading = heading_from_angle(rng.random_range(0.0..std::f32::consts::TAU));
                return OrangeArrow::entity(pos, heading);
            }
            EnemyKind::PurpleBox => EnemyVariant::PurpleBox(PurpleBox::default()),
            EnemyKind::PurpleBoxRemnant => {
                EnemyVariant::PurpleBoxRemnant(PurpleBoxRemnant::new(pos, 0.0))
            }
        };
        Enemy::entity(pos, variant)
    }
}

/// Per-variant state
#[derive(Debug, Clone)]
pub enum EnemyVariant {
    BlueDiamond(BlueDiamond),
    PinkSquares(PinkSquares),
    Pinwheel(Pinwheel),
    OrangeArrow(OrangeArrow),
    PurpleBox(PurpleBox),
    PurpleBoxRemnant(PurpleBoxRemnant),
}

/// A live enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub variant: EnemyVariant,
}

impl Enemy {
    pub fn new(variant: EnemyVariant) -> Self {
        Self { variant }
    }

    /// Wrap a variant in an entity at `pos`
    pub fn entity(pos: Vec2, variant: EnemyVariant) -> Entity {
        Entity::new(pos, EntityKind::Enemy(Self::new(variant)))
    }

    pub fn kind(&self) -> EnemyKind {
        match self.variant {
            EnemyVariant::BlueDiamond(_) => EnemyKind::BlueDiamond,
            EnemyVariant::PinkSquares(_) => EnemyKind::PinkSquares,
            EnemyVariant::Pinwheel(_) => EnemyKind::Pinwheel,
            EnemyVariant::OrangeArrow(_) => EnemyKind::OrangeArrow,
            EnemyVariant::PurpleBox(_) => EnemyKind::PurpleBox,
            EnemyVariant::PurpleBoxRemnant(_) => EnemyKind::PurpleBoxRemnant,
        }
    }

    /// Whether bullets can destroy it right now
    pub fn is_vulnerable(&self) -> bool {
        match &self.variant {
            EnemyVariant::PurpleBoxRemnant(remnant) => remnant.invulnerable == 0,
            _ => true,
        }
    }

    /// Pickups dropped on scored destruction
    pub fn drops(&self) -> u32 {
        match self.variant {
            EnemyVariant::BlueDiamond(_) => 1,
            EnemyVariant::PinkSquares(_) => 2,
            EnemyVariant::Pinwheel(_) => 1,
            EnemyVariant::OrangeArrow(_) => 1,
            EnemyVariant::PurpleBox(_) => 3,
            EnemyVariant::PurpleBoxRemnant(_) => 0,
        }
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        match &mut self.variant {
            EnemyVariant::BlueDiamond(diamond) => diamond.tick(body, state),
            EnemyVariant::PinkSquares(squares) => squares.tick(body, state),
            EnemyVariant::Pinwheel(pinwheel) => pinwheel.tick(body, state),
            EnemyVariant::OrangeArrow(arrow) => arrow.tick(body, state),
            EnemyVariant::PurpleBox(purple) => purple.tick(body, state),
            EnemyVariant::PurpleBoxRemnant(remnant) => remnant.tick(body, state),
        }
    }

    /// Scored destruction: points, pickups, and variant extras
    pub fn on_scored(&self, entity: &Entity, state: &mut GameState) {
        let awarded = state.score.award_kill();
        let kind = self.kind();
        log::debug!(
            "{:?} {:?} destroyed for {} points",
            kind,
            entity.id,
            awarded
        );
        state.push_event(GameEvent::EnemyKilled {
            kind,
            pos: entity.pos,
            awarded,
        });

        let lifetime = state.tuning.pickups.rice_lifetime;
        for _ in 0..self.drops() {
            let jitter = Vec2::new(
                state.rng.random_range(-0.3..0.3),
                state.rng.random_range(-0.3..0.3),
            );
            let pos = clamp_to_board(entity.pos + jitter);
            state.spawn(Entity::new(pos, EntityKind::Rice(Rice::new(lifetime))));
        }

        if let EnemyVariant::PurpleBox(_) = self.variant {
            purple_box::spawn_remnants(entity.pos, state);
        }
    }
}

/// Shared enemy contract: touching the player destroys both
pub fn strike_player(pos: Vec2, state: &GameState) -> Outcome {
    match collision::struck_player(&state.registry, pos) {
        Some(player) => Outcome::Struck { player: player.id },
        None => Outcome::Alive,
    }
}
