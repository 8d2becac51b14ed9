//! Seam to the external line renderer
//!
//! The simulation never draws. Once per displayed frame the host hands the
//! registry to `present`, which forwards incremental add/remove notifications
//! to a [`SceneSink`] and then the per-frame transforms of every live entity.

use std::collections::BTreeSet;

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Quat, Vec3};

use crate::sim::{EntityId, Line, RenderEvent, Registry, Visual};

/// What the renderer needs to draw one entity this frame
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub id: EntityId,
    /// World position (board x/y on world x/z, lift on y)
    pub position: Vec3,
    /// Euler rotation, applied in Y-X-Z order
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
    pub lines: &'a [Line],
    /// 0xRRGGBB
    pub color: u32,
}

impl RenderItem<'_> {
    /// Local-to-world transform of a point in the descriptor's space
    pub fn transform(&self, local: Vec3) -> Vec3 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        );
        self.position + rotation * (local * self.scale)
    }
}

/// Rendering collaborator
pub trait SceneSink {
    /// A new entity appeared; its descriptor never changes afterwards
    fn add(&mut self, id: EntityId, visual: &Visual);
    /// An entity left the board
    fn remove(&mut self, id: EntityId);
    /// Per-frame transforms for every live entity
    fn draw(&mut self, items: &[RenderItem<'_>]);
}

/// Render items for every live entity, in id order
pub fn frame_items(registry: &Registry) -> Vec<RenderItem<'_>> {
    registry
        .iter()
        .map(|e| RenderItem {
            id: e.id,
            position: e.render_position(),
            rotation: e.pose.rotation,
            scale: e.pose.scale,
            opacity: e.pose.opacity,
            lines: &e.visual.lines,
            color: e.visual.color,
        })
        .collect()
}

/// Flush pending scene changes and the current frame to `sink`.
///
/// Entities that appeared and vanished between two frames are never
/// announced.
pub fn present(registry: &mut Registry, sink: &mut impl SceneSink) {
    let mut added: Vec<EntityId> = Vec::new();
    let mut removed: Vec<EntityId> = Vec::new();
    for event in registry.drain_events() {
        match event {
            RenderEvent::Added(id) => added.push(id),
            RenderEvent::Removed(id) => match added.iter().position(|&a| a == id) {
                Some(idx) => {
                    added.remove(idx);
                }
                None => removed.push(id),
            },
        }
    }

    for id in removed {
        sink.remove(id);
    }
    for id in added {
        if let Some(entity) = registry.get(id) {
            sink.add(id, &entity.visual);
        }
    }
    sink.draw(&frame_items(registry));
}

/// Line-list vertex ready for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Unpack 0xRRGGBB into linear RGBA floats
pub fn rgba(color: u32, opacity: f32) -> [f32; 4] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), opacity.clamp(0.0, 1.0)]
}

/// Scene sink that flattens every frame into a line-list vertex array
#[derive(Debug, Default)]
pub struct LineBuffer {
    scene: BTreeSet<EntityId>,
    vertices: Vec<LineVertex>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities currently in the scene
    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.scene.contains(&id)
    }

    /// Two vertices per segment, last frame
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Raw vertex bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl SceneSink for LineBuffer {
    fn add(&mut self, id: EntityId, _visual: &Visual) {
        self.scene.insert(id);
    }

    fn remove(&mut self, id: EntityId) {
        self.scene.remove(&id);
    }

    fn draw(&mut self, items: &[RenderItem<'_>]) {
        self.vertices.clear();
        for item in items {
            if !self.scene.contains(&item.id) {
                log::warn!("Drawing {:?} that was never added to the scene", item.id);
                continue;
            }
            if item.opacity <= 0.0 {
                continue;
            }
            let color = rgba(item.color, item.opacity);
            for line in item.lines {
                self.vertices
                    .push(LineVertex::new(item.transform(line.from), color));
                self.vertices
                    .push(LineVertex::new(item.transform(line.to), color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemies::Pinwheel;
    use crate::sim::{Entity, EntityKind, GameState};
    use glam::Vec2;

    #[test]
    fn test_rgba_unpacks_channels() {
        assert_eq!(rgba(0xFF8800, 0.5), [1.0, 0x88 as f32 / 255.0, 0.0, 0.5]);
    }

    #[test]
    fn test_transform_maps_board_to_world() {
        let entity = Entity::new(Vec2::new(2.0, 3.0), EntityKind::Grid);
        let items = {
            let mut registry = Registry::new();
            registry.spawn(entity);
            frame_items(&registry)
                .into_iter()
                .map(|i| (i.position, i.transform(Vec3::new(1.0, 0.0, 0.0))))
                .collect::<Vec<_>>()
        };
        assert_eq!(items[0].0, Vec3::new(2.0, 0.0, 3.0));
        assert!((items[0].1 - Vec3::new(3.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_yaw_rotates_about_up_axis() {
        let item = RenderItem {
            id: EntityId(1),
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            scale: Vec3::ONE,
            opacity: 1.0,
            lines: &[],
            color: 0,
        };
        let p = item.transform(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_present_is_incremental() {
        let mut state = GameState::sandbox(1);
        let mut sink = LineBuffer::new();
        let a = state.spawn(Pinwheel::stationary_entity(Vec2::new(2.0, 2.0)));
        let b = state.spawn(Pinwheel::stationary_entity(Vec2::new(6.0, 6.0)));

        present(&mut state.registry, &mut sink);
        assert_eq!(sink.len(), 2);
        let segments = state.registry.get(a).unwrap().visual.lines.len()
            + state.registry.get(b).unwrap().visual.lines.len();
        assert_eq!(sink.vertices().len(), segments * 2);
        assert_eq!(
            sink.as_bytes().len(),
            segments * 2 * std::mem::size_of::<LineVertex>()
        );

        state.registry.remove(a);
        present(&mut state.registry, &mut sink);
        assert!(!sink.contains(a));
        assert!(sink.contains(b));
    }

    #[test]
    fn test_short_lived_entities_never_reach_sink() {
        let mut state = GameState::sandbox(1);
        let mut sink = LineBuffer::new();
        let id = state.spawn(Pinwheel::stationary_entity(Vec2::new(2.0, 2.0)));
        state.destroy(id, false);

        present(&mut state.registry, &mut sink);
        assert!(!sink.contains(id));
        // The particles it burst into are announced
        assert_eq!(sink.len(), state.particle_count());
    }
}
