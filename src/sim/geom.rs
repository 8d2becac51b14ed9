//! Vector and geometry primitives
//!
//! Board space is a square `[0, BOARD_SIZE]` on both axes. Everything here is
//! pure math with no knowledge of entities.

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::BOARD_SIZE;

/// Smallest ray parameter accepted as a real exit (rejects zero-length legs)
const RAY_EPSILON: f32 = 1e-4;

/// Center of the board
#[inline]
pub fn board_center() -> Vec2 {
    Vec2::splat(BOARD_SIZE / 2.0)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle` (radians, counter-clockwise from +x)
#[inline]
pub fn heading_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a direction vector
#[inline]
pub fn angle_of(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

/// True when two points are strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Scalar linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sine ease-in-out over `t` in [0, 1]
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    0.5 - 0.5 * (PI * t).cos()
}

/// Quadratic ease-in-out over `t` in [0, 1]
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// True when `p` lies on the board (edges inclusive)
#[inline]
pub fn in_board(p: Vec2) -> bool {
    (0.0..=BOARD_SIZE).contains(&p.x) && (0.0..=BOARD_SIZE).contains(&p.y)
}

/// Clamp a point onto the board
#[inline]
pub fn clamp_to_board(p: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, Vec2::splat(BOARD_SIZE))
}

/// Point where a ray from `origin` along `heading` leaves the board.
///
/// Slab test against the board's axis-aligned bounds, taking the nearest exit
/// plane. Returns `None` when the heading is zero or the exit lies at (or
/// behind) the origin, which happens for a ray starting on an edge and
/// pointing outward.
pub fn board_exit(origin: Vec2, heading: Vec2) -> Option<Vec2> {
    let mut t_exit = f32::INFINITY;

    for (o, d) in [(origin.x, heading.x), (origin.y, heading.y)] {
        if d.abs() < f32::EPSILON {
            continue;
        }
        let plane = if d > 0.0 { BOARD_SIZE } else { 0.0 };
        t_exit = t_exit.min((plane - o) / d);
    }

    if !t_exit.is_finite() || t_exit <= RAY_EPSILON {
        return None;
    }
    Some(clamp_to_board(origin + heading * t_exit))
}
