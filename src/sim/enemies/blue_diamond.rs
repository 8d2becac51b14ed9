//! Blue diamond: a plain homing chaser

use super::strike_player;
use crate::sim::entity::{Body, EntityId, Outcome};
use crate::sim::state::GameState;

/// Ticks between target re-acquisitions
pub const RETARGET_TICKS: u32 = 5;
/// Board units moved per tick
pub const STEP: f32 = 0.035;
const SPIN: f32 = 0.03;

#[derive(Debug, Clone, Default)]
pub struct BlueDiamond {
    /// Current target; `None` means hold position
    pub target: Option<EntityId>,
    timer: u32,
}

impl BlueDiamond {
    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        if self.timer % RETARGET_TICKS == 0 {
            self.target = state.nearest_player(*body.pos).map(|hit| hit.id);
        }
        self.timer = self.timer.wrapping_add(1);

        // A vanished target degrades to holding position
        let goal = self
            .target
            .and_then(|id| state.registry.get(id))
            .map_or(*body.pos, |target| target.pos);

        let to_goal = goal - *body.pos;
        let dist = to_goal.length();
        if dist > STEP {
            *body.pos += to_goal / dist * STEP;
        } else {
            *body.pos = goal;
        }

        body.pose.rotation.y += SPIN;
        strike_player(*body.pos, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemies::{Enemy, EnemyVariant};
    use crate::sim::entity::{Entity, EntityKind};
    use crate::sim::player::Player;
    use crate::sim::tick::{TickInput, tick};
    use glam::Vec2;

    fn diamond_pos(state: &GameState, id: EntityId) -> Vec2 {
        state.registry.get(id).unwrap().pos
    }

    #[test]
    fn test_closes_in_on_player() {
        let mut state = GameState::sandbox(1);
        let center = Vec2::new(5.0, 5.0);
        state.spawn(Entity::new(center, EntityKind::Player(Player::default())));
        let start = Vec2::new(8.0, 7.0);
        let id = state.spawn(Enemy::entity(
            start,
            EnemyVariant::BlueDiamond(BlueDiamond::default()),
        ));

        for _ in 0..6 {
            tick(&mut state, &TickInput::default());
        }
        let dist = diamond_pos(&state, id).distance(center);
        assert!(dist < start.distance(center));
        assert!((start.distance(center) - dist - 6.0 * STEP).abs() < 1e-4);
    }

    #[test]
    fn test_holds_position_without_player() {
        let mut state = GameState::sandbox(1);
        let start = Vec2::new(2.0, 3.0);
        let id = state.spawn(Enemy::entity(
            start,
            EnemyVariant::BlueDiamond(BlueDiamond::default()),
        ));
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(diamond_pos(&state, id), start);
    }

    #[test]
    fn test_retargets_on_interval() {
        let mut state = GameState::sandbox(1);
        let id = state.spawn(Enemy::entity(
            Vec2::new(1.0, 1.0),
            EnemyVariant::BlueDiamond(BlueDiamond::default()),
        ));
        tick(&mut state, &TickInput::default());

        // Player appears after the first acquisition window
        let player = state.spawn(Entity::new(
            Vec2::new(9.0, 9.0),
            EntityKind::Player(Player::default()),
        ));
        for _ in 0..4 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(diamond_pos(&state, id), Vec2::new(1.0, 1.0));

        tick(&mut state, &TickInput::default());
        let target = match &state.registry.get(id).unwrap().enemy().unwrap().variant {
            EnemyVariant::BlueDiamond(d) => d.target,
            _ => unreachable!(),
        };
        assert_eq!(target, Some(player));
        assert_ne!(diamond_pos(&state, id), Vec2::new(1.0, 1.0));
    }
}
