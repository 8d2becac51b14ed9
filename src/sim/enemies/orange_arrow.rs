//! Orange arrow: ping-pongs across the board along a straight line
//!
//! Each leg runs from the current position to where the heading ray leaves
//! the board, eased, with a duration proportional to its length. On arrival
//! the heading reverses and a new leg is planned from the arrival point.

use glam::Vec2;

use super::{Enemy, EnemyVariant, strike_player};
use crate::sim::entity::{Body, Entity, Outcome};
use crate::sim::geom::{angle_of, board_exit, ease_in_out_quad};
use crate::sim::state::GameState;

/// Leg duration per board unit travelled
pub const TICKS_PER_UNIT: f32 = 15.0;
/// Radians per tick about the travel axis
pub const SPIN: f32 = 0.12;

#[derive(Debug, Clone)]
pub struct OrangeArrow {
    /// Unit travel direction of the current leg
    pub heading: Vec2,
    pub origin: Vec2,
    pub target: Vec2,
    /// Ticks into the current leg
    pub time: u32,
    /// Leg duration in ticks (at least 1)
    pub max_time: u32,
}

impl OrangeArrow {
    pub fn new(pos: Vec2, heading: Vec2) -> Self {
        let mut arrow = Self {
            heading: heading.normalize_or(Vec2::X),
            origin: pos,
            target: pos,
            time: 0,
            max_time: 1,
        };
        arrow.plan_leg(pos);
        arrow
    }

    pub fn entity(pos: Vec2, heading: Vec2) -> Entity {
        let arrow = Self::new(pos, heading);
        let yaw = -angle_of(arrow.heading);
        let mut entity = Enemy::entity(pos, EnemyVariant::OrangeArrow(arrow));
        entity.pose.rotation.y = yaw;
        entity
    }

    /// Start a leg at `origin` along the current heading.
    ///
    /// A ray that does not leave the board (standing on an edge pointing out,
    /// or numerically degenerate) is retried with the flipped heading, then
    /// with the x axis.
    pub fn plan_leg(&mut self, origin: Vec2) {
        self.origin = origin;
        self.time = 0;
        self.target = origin;

        for heading in [self.heading, -self.heading, Vec2::X, Vec2::NEG_X] {
            if let Some(exit) = board_exit(origin, heading) {
                if heading != self.heading {
                    log::debug!(
                        "Arrow ray from ({:.2}, {:.2}) degenerate, retrying with ({:.2}, {:.2})",
                        origin.x,
                        origin.y,
                        heading.x,
                        heading.y
                    );
                }
                self.heading = heading;
                self.target = exit;
                break;
            }
        }

        let dist = origin.distance(self.target);
        self.max_time = ((dist * TICKS_PER_UNIT).round() as u32).max(1);
    }

    /// Eased position along the current leg
    pub fn position(&self) -> Vec2 {
        let t = self.time as f32 / self.max_time as f32;
        self.origin.lerp(self.target, ease_in_out_quad(t))
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.time += 1;
        if self.time >= self.max_time {
            *body.pos = self.target;
            self.heading = -self.heading;
            self.plan_leg(self.target);
        } else {
            *body.pos = self.position();
        }

        body.pose.rotation.x += SPIN;
        body.pose.rotation.y = -angle_of(self.heading);
        strike_player(*body.pos, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOARD_SIZE;
    use crate::sim::entity::EntityId;
    use crate::sim::tick::{TickInput, tick};

    fn arrow(state: &GameState, id: EntityId) -> (Vec2, OrangeArrow) {
        let entity = state.registry.get(id).unwrap();
        match &entity.enemy().unwrap().variant {
            EnemyVariant::OrangeArrow(a) => (entity.pos, a.clone()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_leg_endpoints() {
        let mut leg = OrangeArrow::new(Vec2::new(2.0, 5.0), Vec2::X);
        assert_eq!(leg.position(), leg.origin);
        assert_eq!(leg.max_time, 120);

        leg.time = leg.max_time;
        assert!((leg.position() - leg.target).length() < 1e-5);
        assert!((leg.target - Vec2::new(BOARD_SIZE, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_heading_reverses_on_arrival() {
        let mut state = GameState::sandbox(3);
        let id = state.spawn(OrangeArrow::entity(Vec2::new(9.0, 5.0), Vec2::X));
        let (_, start) = arrow(&state, id);
        assert_eq!(start.max_time, 15);

        for _ in 0..14 {
            tick(&mut state, &TickInput::default());
        }
        let (pos, mid) = arrow(&state, id);
        assert_eq!(mid.heading, Vec2::X);
        assert!(pos.x < BOARD_SIZE);

        tick(&mut state, &TickInput::default());
        let (pos, next) = arrow(&state, id);
        assert!((pos - Vec2::new(BOARD_SIZE, 5.0)).length() < 1e-5);
        assert_eq!(next.heading, Vec2::NEG_X);
        assert_eq!(next.time, 0);
        assert_eq!(next.origin, pos);
        assert!((next.target - Vec2::new(0.0, 5.0)).length() < 1e-5);
        assert_eq!(next.position(), next.origin);
    }

    #[test]
    fn test_edge_pointing_out_flips() {
        let leg = OrangeArrow::new(Vec2::new(BOARD_SIZE, 3.0), Vec2::X);
        assert_eq!(leg.heading, Vec2::NEG_X);
        assert!((leg.target - Vec2::new(0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_corner_falls_back_to_axis() {
        // Both the diagonal and its flip graze the corner
        let leg = OrangeArrow::new(Vec2::ZERO, Vec2::new(1.0, -1.0));
        assert_eq!(leg.heading, Vec2::X);
        assert!(leg.max_time >= 1);
    }
}
