//! Entity model
//!
//! An entity is a live simulated object: a board position, a fixed visual
//! descriptor, a render pose, and variant state. Variants are a closed enum
//! dispatched by `match`; shared enemy behavior lives in `enemies` helpers
//! rather than in a type hierarchy.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::effects::{DeathParticle, Spawning, SpawnWarning};
use super::enemies::Enemy;
use super::pickups::{Rice, RiceCollect};
use super::player::{Bullet, Player};
use super::shapes;
use super::state::GameState;

/// Registry-assigned identity of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried by entities that have not been spawned yet
    pub const UNSPAWNED: EntityId = EntityId(0);
}

/// One line segment of a visual descriptor, in the entity's local 3-D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Vec3,
    pub to: Vec3,
}

impl Line {
    pub const fn new(from: Vec3, to: Vec3) -> Self {
        Self { from, to }
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Vec3 {
        (self.from + self.to) * 0.5
    }
}

/// Fixed visual descriptor: ordered line segments plus one color.
///
/// Shared behind an `Arc` so spawn warnings and particles can reuse it
/// without copying. The segment list never changes after construction.
#[derive(Debug, Clone)]
pub struct Visual {
    pub lines: Arc<[Line]>,
    pub color: u32,
}

impl Visual {
    pub fn new(lines: Vec<Line>, color: u32) -> Self {
        Self {
            lines: lines.into(),
            color,
        }
    }

    /// Descriptor with no geometry (for invisible bookkeeping entities)
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Whole-descriptor transform handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Euler rotation (radians)
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Render-only displacement from the board position (animation)
    pub offset: Vec2,
    /// Height above the board plane
    pub lift: f32,
    /// 0 = invisible, 1 = opaque
    pub opacity: f32,
}

impl Pose {
    pub fn scaled(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Self::default()
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            offset: Vec2::ZERO,
            lift: 0.0,
            opacity: 1.0,
        }
    }
}

/// Mutable view of an entity's body handed to variant tick functions
pub struct Body<'a> {
    pub id: EntityId,
    pub pos: &'a mut Vec2,
    pub pose: &'a mut Pose,
}

/// What a variant asks for at the end of its tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep living
    Alive,
    /// Leave the registry without side effects (expired, left the board)
    Vanish,
    /// Destroy with side effects (particles, and score/drops when `scored`)
    Destroy { scored: bool },
    /// Touched the player: destroy self unscored, then destroy the player
    Struck { player: EntityId },
}

/// Variant state
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Static board lattice decoration
    Grid,
    Player(Player),
    Bullet(Bullet),
    Enemy(Enemy),
    Rice(Rice),
    RiceCollect(RiceCollect),
    Spawning(Spawning),
    SpawnWarning(SpawnWarning),
    DeathParticle(DeathParticle),
}

/// A live simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub pose: Pose,
    pub visual: Visual,
    pub kind: EntityKind,
}

impl Entity {
    /// Build an entity, computing its visual descriptor once from its kind
    pub fn new(pos: Vec2, kind: EntityKind) -> Self {
        let visual = shapes::visual_for(&kind);
        Self::with_visual(pos, kind, visual)
    }

    /// Build an entity around an existing descriptor (warnings, particles)
    pub fn with_visual(pos: Vec2, kind: EntityKind, visual: Visual) -> Self {
        Self {
            id: EntityId::UNSPAWNED,
            pos,
            pose: Pose::scaled(shapes::scale_for(&kind)),
            visual,
            kind,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        match &self.kind {
            EntityKind::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn is_enemy(&self) -> bool {
        self.enemy().is_some()
    }

    /// Enemy that a bullet can currently destroy
    pub fn is_vulnerable_enemy(&self) -> bool {
        self.enemy().is_some_and(Enemy::is_vulnerable)
    }

    /// Transient entities survive the player-death board clear
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Grid | EntityKind::DeathParticle(_) | EntityKind::RiceCollect(_)
        )
    }

    /// Render-space position (board x/y map to world x/z)
    pub fn render_position(&self) -> Vec3 {
        let p = self.pos + self.pose.offset;
        Vec3::new(p.x, self.pose.lift, p.y)
    }

    /// Advance one logical tick.
    ///
    /// The entity is checked out of the registry while this runs, so it may
    /// freely spawn, remove or destroy other entities through `state`.
    pub fn tick(&mut self, state: &mut GameState) {
        let Entity {
            id, pos, pose, kind, ..
        } = self;
        let body = Body {
            id: *id,
            pos,
            pose,
        };

        let outcome = match kind {
            EntityKind::Grid => Outcome::Alive,
            EntityKind::Player(player) => player.tick(body, state),
            EntityKind::Bullet(bullet) => bullet.tick(body, state),
            EntityKind::Enemy(enemy) => enemy.tick(body, state),
            EntityKind::Rice(rice) => rice.tick(body, state),
            EntityKind::RiceCollect(collect) => collect.tick(body, state),
            EntityKind::Spawning(spawning) => spawning.tick(body, state),
            EntityKind::SpawnWarning(warning) => warning.tick(body),
            EntityKind::DeathParticle(particle) => particle.tick(body),
        };

        match outcome {
            Outcome::Alive => {}
            Outcome::Vanish => {
                self.vanish(state);
            }
            Outcome::Destroy { scored } => {
                self.destroy(state, scored);
            }
            Outcome::Struck { player } => {
                self.destroy(state, false);
                state.destroy(player, false);
            }
        }
    }

    /// Remove this (checked-out) entity without side effects
    pub fn vanish(&self, state: &mut GameState) {
        state.registry.remove(self.id);
        if let EntityKind::Spawning(spawning) = &self.kind {
            spawning.clear_warning(state);
        }
    }

    /// Remove this (checked-out) entity and run its destruction effects.
    /// Does nothing if it was already removed earlier in the tick.
    pub fn destroy(&self, state: &mut GameState, scored: bool) {
        if !state.registry.contains(self.id) {
            return;
        }
        state.registry.remove(self.id);
        self.on_destroyed(state, scored);
    }

    /// Side effects of destruction; the entity has already left the registry
    pub fn on_destroyed(&self, state: &mut GameState, scored: bool) {
        match &self.kind {
            EntityKind::Player(_) => {
                DeathParticle::burst(self, state);
                super::player::on_player_destroyed(self, state);
            }
            EntityKind::Enemy(enemy) => {
                DeathParticle::burst(self, state);
                if scored {
                    enemy.on_scored(self, state);
                }
            }
            EntityKind::Spawning(spawning) => spawning.clear_warning(state),
            EntityKind::Grid
            | EntityKind::Bullet(_)
            | EntityKind::Rice(_)
            | EntityKind::RiceCollect(_)
            | EntityKind::SpawnWarning(_)
            | EntityKind::DeathParticle(_) => {}
        }
    }
}
