//! Pink squares: a grid hopper that rolls one cell at a time
//!
//! A cycle is a wait (phase 1) followed by an eased roll into the adjacent
//! cell (phase 2). The board position only changes when the roll completes;
//! during the roll the motion lives entirely in the render pose.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Enemy, EnemyVariant, strike_player};
use crate::sim::entity::{Body, Entity, Outcome};
use crate::sim::geom::{clamp_to_board, ease_in_out_sine, in_board};
use crate::sim::state::GameState;

/// Ticks spent sitting still
pub const PHASE1_TICKS: u32 = 60;
/// Ticks spent rolling into the next cell
pub const PHASE2_TICKS: u32 = 120;

/// Roll direction sign, indexed `[dir_positive][along_x][flipped]`.
/// Found by eye so the squares keep rolling the same way they travel;
/// every entry matters.
const ROLL_SIGN: [[[f32; 2]; 2]; 2] = [[[-1.0, -1.0], [1.0, -1.0]], [[1.0, 1.0], [-1.0, 1.0]]];

/// Cardinal direction on the board (+y is "down")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn is_positive(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    fn along_x(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

fn rest_rotation_x(flipped: bool) -> f32 {
    if flipped { PI } else { 0.0 }
}

/// Euler `(x, z)` rotation a fraction `t` of the way through a roll
pub fn roll_rotation(dir: Direction, flipped: bool, t: f32) -> (f32, f32) {
    let sign = ROLL_SIGN[dir.is_positive() as usize][dir.along_x() as usize][flipped as usize];
    if dir.along_x() {
        (rest_rotation_x(flipped), sign * PI * t)
    } else {
        (rest_rotation_x(flipped) + sign * PI * t, 0.0)
    }
}

/// Pick a random cardinal step from `cell`, reversing it if it would leave
/// the board
pub fn choose_direction(cell: Vec2, rng: &mut Pcg32) -> Direction {
    let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    if in_board(cell + dir.vector()) {
        dir
    } else {
        dir.opposite()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PinkSquares {
    /// Ticks into the current wait/roll cycle
    pub anim_time: u32,
    /// Upside-down after an odd number of rolls
    pub flipped: bool,
    pub direction: Direction,
}

impl PinkSquares {
    /// Spawn on the nearest grid cell
    pub fn entity(pos: Vec2) -> Entity {
        let cell = clamp_to_board(pos.round());
        Enemy::entity(cell, EnemyVariant::PinkSquares(Self::default()))
    }

    fn rest_rotation_x(&self) -> f32 {
        rest_rotation_x(self.flipped)
    }

    pub fn tick(&mut self, body: Body<'_>, state: &mut GameState) -> Outcome {
        self.anim_time += 1;
        if self.anim_time == 1 {
            self.direction = choose_direction(*body.pos, &mut state.rng);
        }

        if self.anim_time > PHASE1_TICKS {
            let t = ease_in_out_sine((self.anim_time - PHASE1_TICKS) as f32 / PHASE2_TICKS as f32);
            let (x, z) = roll_rotation(self.direction, self.flipped, t);
            body.pose.offset = self.direction.vector() * t;
            body.pose.rotation.x = x;
            body.pose.rotation.z = z;
        }

        if self.anim_time >= PHASE1_TICKS + PHASE2_TICKS {
            *body.pos = clamp_to_board((*body.pos + self.direction.vector()).round());
            self.flipped = !self.flipped;
            self.anim_time = 0;
            body.pose.offset = Vec2::ZERO;
            body.pose.rotation.x = self.rest_rotation_x();
            body.pose.rotation.z = 0.0;
        }

        // Hits use the committed cell; the drawing leads it by `pose.offset`
        // until the roll lands
        strike_player(*body.pos, state)
    }
}
