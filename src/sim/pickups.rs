//! Rice pickups and their collection visual

use super::collision;
use super::entity::{Body, Entity, EntityId, EntityKind, Outcome};
use super::geom::lerp;
use super::state::{GameEvent, GameState};

/// Radians per tick
const RICE_SPIN: f32 = 0.05;
/// Fraction of the remaining distance closed per tick while homing
const COLLECT_LERP: f32 = 0.3;
/// Close enough to count as absorbed
const COLLECT_DONE_DIST: f32 = 0.05;

/// A dropped multiplier pickup
#[derive(Debug, Clone)]
pub struct Rice {
    pub age: u32,
    /// Ticks before it expires uncollected
    pub lifetime: u32,
}

impl Rice {
    pub fn new(lifetime: u32) -> Self {
        Self { age: 0, lifetime }
    }

    /// Opacity for the current age: solid, then fading over the last quarter
    pub fn opacity(&self) -> f32 {
        let fade_start = self.lifetime - self.lifetime / 4;
        if self.age <= fade_start || self.lifetime == fade_start {
            1.0
        } else {
            let t = (self.age - fade_start) as f32 / (self.lifetime - fade_start) as f32;
            lerp(1.0, 0.0, t)
        }
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.age += 1;
        if self.age >= self.lifetime {
            return Outcome::Vanish;
        }
        body.pose.opacity = self.opacity();
        body.pose.rotation.y += RICE_SPIN;

        if let Some(player) = collision::collecting_player(&state.registry, *body.pos) {
            let multiplier = state.score.collect_pickup();
            log::trace!("Pickup {:?} collected, multiplier now {}", body.id, multiplier);
            state.push_event(GameEvent::PickupCollected { multiplier });
            state.spawn(Entity::new(
                *body.pos,
                EntityKind::RiceCollect(RiceCollect::new(player.id)),
            ));
            return Outcome::Vanish;
        }
        Outcome::Alive
    }
}

/// Purely visual: a collected pickup homing into the player
#[derive(Debug, Clone)]
pub struct RiceCollect {
    pub player: EntityId,
    pub age: u32,
}

impl RiceCollect {
    pub fn new(player: EntityId) -> Self {
        Self { player, age: 0 }
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.age += 1;
        let Some(target) = state.registry.get(self.player).map(|p| p.pos) else {
            return Outcome::Vanish;
        };

        *body.pos = body.pos.lerp(target, COLLECT_LERP);
        if self.age >= state.tuning.pickups.collect_ticks
            || body.pos.distance(target) < COLLECT_DONE_DIST
        {
            return Outcome::Vanish;
        }
        Outcome::Alive
    }
}
