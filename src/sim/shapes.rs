//! Line geometry for every entity kind
//!
//! Shapes are authored on a small drawing grid (x right, z down, y up out of
//! the board plane), centered on the origin, and shrunk onto the board by the
//! per-kind scale. Colors are 0xRRGGBB.

use std::f32::consts::{SQRT_2, TAU};

use glam::Vec3;

use super::enemies::{Enemy, EnemyVariant};
use super::entity::{EntityKind, Line, Visual};
use crate::consts::BOARD_SIZE;

pub mod colors {
    pub const GRID: u32 = 0x888888;
    pub const PLAYER: u32 = 0xFFFFFF;
    pub const BULLET: u32 = 0xFFEE88;
    pub const BLUE_DIAMOND: u32 = 0x6688FF;
    pub const PINK_SQUARES: u32 = 0xFF11FF;
    pub const PINWHEEL: u32 = 0x8833FF;
    pub const ORANGE_ARROW: u32 = 0xFF8800;
    pub const PURPLE_BOX: u32 = 0x7700FF;
    pub const RICE: u32 = 0x55FF66;
}

/// Visual descriptor for a freshly constructed entity
pub fn visual_for(kind: &EntityKind) -> Visual {
    match kind {
        EntityKind::Grid => Visual::new(grid(), colors::GRID),
        EntityKind::Player(_) => Visual::new(player(), colors::PLAYER),
        EntityKind::Bullet(_) => Visual::new(bullet(), colors::BULLET),
        EntityKind::Enemy(enemy) => enemy_visual(enemy),
        EntityKind::Rice(_) | EntityKind::RiceCollect(_) => Visual::new(rice(), colors::RICE),
        // Built around a borrowed descriptor or deliberately invisible
        EntityKind::Spawning(_) | EntityKind::SpawnWarning(_) | EntityKind::DeathParticle(_) => {
            Visual::empty()
        }
    }
}

/// Uniform scale from drawing units to board units
pub fn scale_for(kind: &EntityKind) -> f32 {
    match kind {
        EntityKind::Grid => 1.0,
        EntityKind::Player(_) => 0.1,
        EntityKind::Bullet(_) => 0.08,
        EntityKind::Enemy(enemy) => match enemy.variant {
            EnemyVariant::PinkSquares(_) => 0.3,
            EnemyVariant::PurpleBox(_) => 0.15,
            EnemyVariant::PurpleBoxRemnant(_) => 0.06,
            _ => 0.1,
        },
        EntityKind::Rice(_) => 0.04,
        EntityKind::RiceCollect(_) => 0.03,
        EntityKind::Spawning(_) | EntityKind::SpawnWarning(_) | EntityKind::DeathParticle(_) => {
            0.1
        }
    }
}

fn enemy_visual(enemy: &Enemy) -> Visual {
    match enemy.variant {
        EnemyVariant::BlueDiamond(_) => Visual::new(blue_diamond(), colors::BLUE_DIAMOND),
        EnemyVariant::PinkSquares(_) => Visual::new(pink_squares(), colors::PINK_SQUARES),
        EnemyVariant::Pinwheel(_) => Visual::new(pinwheel(), colors::PINWHEEL),
        EnemyVariant::OrangeArrow(_) => Visual::new(orange_arrow(), colors::ORANGE_ARROW),
        EnemyVariant::PurpleBox(_) | EnemyVariant::PurpleBoxRemnant(_) => {
            Visual::new(purple_box(), colors::PURPLE_BOX)
        }
    }
}

#[inline]
fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Connect consecutive drawing-plane points at height `y`
fn polyline(points: &[(f32, f32)], y: f32) -> Vec<Line> {
    points
        .windows(2)
        .map(|w| Line::new(v(w[0].0, y, w[0].1), v(w[1].0, y, w[1].1)))
        .collect()
}

/// Shift every endpoint so `center` lands on the origin
fn centered(lines: Vec<Line>, center: Vec3) -> Vec<Line> {
    lines
        .into_iter()
        .map(|l| Line::new(l.from - center, l.to - center))
        .collect()
}

/// Board lattice in board coordinates (entity sits at the origin)
pub fn grid() -> Vec<Line> {
    let size = BOARD_SIZE as i32;
    let mut lines = Vec::with_capacity(((size + 1) * 2) as usize);
    for i in 0..=size {
        let f = i as f32;
        lines.push(Line::new(v(f, 0.0, 0.0), v(f, 0.0, BOARD_SIZE)));
        lines.push(Line::new(v(0.0, 0.0, f), v(BOARD_SIZE, 0.0, f)));
    }
    lines
}

/// Claw-shaped ship pointing along +x
pub fn player() -> Vec<Line> {
    let mut lines = polyline(
        &[(-4.0, -4.0), (4.0, 0.0), (-4.0, 4.0), (-1.5, 0.0), (-4.0, -4.0)],
        0.0,
    );
    lines.extend(polyline(&[(-2.5, -2.0), (1.5, 0.0), (-2.5, 2.0)], 0.0));
    lines
}

pub fn bullet() -> Vec<Line> {
    vec![
        Line::new(v(-2.0, 0.0, 0.0), v(2.0, 0.0, 0.0)),
        Line::new(v(0.0, 0.0, -0.6), v(2.0, 0.0, 0.0)),
        Line::new(v(0.0, 0.0, 0.6), v(2.0, 0.0, 0.0)),
    ]
}

/// Parallelogram with inset edges
pub fn blue_diamond() -> Vec<Line> {
    let mut lines = polyline(
        &[(0.0, 0.0), (6.0, 0.0), (10.0, 6.0), (4.0, 6.0), (0.0, 0.0)],
        0.0,
    );
    lines.extend([
        Line::new(v(0.4, 0.0, 0.6), v(6.4, 0.0, 0.6)),
        Line::new(v(3.6, 0.0, 5.4), v(9.6, 0.0, 5.4)),
        Line::new(v(1.2, 0.0, 0.6), v(4.4, 0.0, 5.4)),
        Line::new(v(5.6, 0.0, 0.6), v(8.8, 0.0, 5.4)),
    ]);
    centered(lines, v(5.0, 0.0, 3.0))
}

/// Two overlapping squares extruded into a slab
pub fn pink_squares() -> Vec<Line> {
    let mut front = polyline(
        &[(-1.5, -1.5), (-1.5, 0.5), (0.5, 0.5), (0.5, -1.5), (-1.5, -1.5)],
        0.5,
    );
    let offset = v(1.0, 0.0, 1.0);
    let shifted: Vec<Line> = front
        .iter()
        .map(|l| Line::new(l.from + offset, l.to + offset))
        .collect();
    front.extend(shifted);

    let down = v(0.0, -1.0, 0.0);
    let mut lines = front.clone();
    lines.extend(front.iter().map(|l| Line::new(l.from + down, l.to + down)));
    lines.extend(front.iter().map(|l| Line::new(l.from, l.from + down)));
    lines
}

/// Four triangular vanes around a small octagon
pub fn pinwheel() -> Vec<Line> {
    const INSIDE: f32 = 0.5;
    const OUTSIDE: f32 = 4.0;
    let point = |turn: f32, radius: f32| {
        let rad = turn * TAU;
        v(rad.cos() * radius, 0.0, rad.sin() * radius)
    };

    let mut lines = Vec::with_capacity(20);
    for i in 0..8 {
        let a = i as f32 / 8.0;
        let b = (i + 1) as f32 / 8.0;
        lines.push(Line::new(point(a, INSIDE), point(b, INSIDE)));
        if i % 2 == 0 {
            lines.push(Line::new(point(a, INSIDE), point(a, OUTSIDE)));
            lines.push(Line::new(point(a, OUTSIDE), point(b, OUTSIDE * SQRT_2)));
            lines.push(Line::new(point(b, OUTSIDE * SQRT_2), point(b, INSIDE)));
        }
    }
    lines
}

/// Arrowhead crossed with a perpendicular copy, pointing along +x
pub fn orange_arrow() -> Vec<Line> {
    let plane = [
        // arrow
        ((0.0, 0.0), (8.0, 5.0)),
        ((8.0, 5.0), (0.0, 10.0)),
        ((0.0, 10.0), (0.0, 0.0)),
        // box
        ((-1.0, 4.0), (1.0, 4.0)),
        ((1.0, 4.0), (1.0, 6.0)),
        ((1.0, 6.0), (-1.0, 6.0)),
        ((-1.0, 6.0), (-1.0, 4.0)),
    ];
    let mut lines: Vec<Line> = plane
        .iter()
        .map(|&((x1, z1), (x2, z2))| Line::new(v(x1, 0.0, z1), v(x2, 0.0, z2)))
        .collect();
    lines.extend(
        plane
            .iter()
            .map(|&((x1, z1), (x2, z2))| Line::new(v(x1, z1 - 5.0, 5.0), v(x2, z2 - 5.0, 5.0))),
    );
    lines.push(Line::new(v(0.0, 0.0, 5.0), v(8.0, 0.0, 5.0)));
    centered(lines, v(4.0, 0.0, 5.0))
}

/// Square pyramid with an inset ring
pub fn purple_box() -> Vec<Line> {
    const S: f32 = 2.0; // half the base width
    const H: f32 = 3.0; // apex height
    const M: f32 = 0.45; // inset ring height fraction

    let base = polyline(&[(-S, -S), (-S, S), (S, S), (S, -S), (-S, -S)], 0.0);
    let mut lines = base.clone();
    lines.extend(base.iter().map(|l| {
        let shrink = |p: Vec3| v(p.x * (1.0 - M), H * M, p.z * (1.0 - M));
        Line::new(shrink(l.from), shrink(l.to))
    }));
    lines.extend(base.iter().map(|l| Line::new(l.from, v(0.0, H, 0.0))));
    lines
}

/// Small square with an inner diamond
pub fn rice() -> Vec<Line> {
    let mut lines = polyline(
        &[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)],
        0.0,
    );
    lines.extend(polyline(
        &[(5.0, 1.0), (9.0, 5.0), (5.0, 9.0), (1.0, 5.0), (5.0, 1.0)],
        0.0,
    ));
    centered(lines, v(5.0, 0.0, 5.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_are_nonempty() {
        for lines in [
            grid(),
            player(),
            bullet(),
            blue_diamond(),
            pink_squares(),
            pinwheel(),
            orange_arrow(),
            purple_box(),
            rice(),
        ] {
            assert!(!lines.is_empty());
        }
    }

    #[test]
    fn test_segment_counts() {
        assert_eq!(grid().len(), 22);
        assert_eq!(pink_squares().len(), 24);
        assert_eq!(pinwheel().len(), 20);
        assert_eq!(orange_arrow().len(), 15);
        assert_eq!(purple_box().len(), 12);
    }

    #[test]
    fn test_rice_is_centered() {
        let sum: Vec3 = rice().iter().map(|l| l.midpoint()).sum();
        assert!((sum / rice().len() as f32).length() < 1e-4);
    }
}
