//! Entity registry
//!
//! The single owner of every live entity. Entities are kept sorted by id
//! (ids are handed out monotonically and spawns append), which gives a stable
//! iteration order for determinism.
//!
//! Ticking uses a checkout discipline: the entity being updated is moved out
//! of the collection for the duration of its tick so it can receive
//! `&mut GameState` alongside `&mut self`. Removing the checked-out entity
//! only flags it; it is then simply not checked back in.

use super::entity::{Entity, EntityId};

/// Incremental scene change for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    Added(EntityId),
    Removed(EntityId),
}

/// The entity currently checked out for its tick
#[derive(Debug, Clone, Copy)]
struct Checkout {
    id: EntityId,
    removed: bool,
}

#[derive(Debug)]
pub struct Registry {
    entities: Vec<Entity>,
    current: Option<Checkout>,
    events: Vec<RenderEvent>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            current: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an entity, assigning it a fresh id
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        self.events.push(RenderEvent::Added(id));
        id
    }

    /// Detach an entity.
    ///
    /// Returns the entity so the caller can run its destruction effects. The
    /// checked-out entity is only flagged (and `None` is returned); any later
    /// removal of an already-removed id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(current) = self.current.as_mut()
            && current.id == id
        {
            if !current.removed {
                current.removed = true;
                self.events.push(RenderEvent::Removed(id));
            }
            return None;
        }

        let idx = self.index_of(id)?;
        let entity = self.entities.remove(idx);
        self.events.push(RenderEvent::Removed(id));
        Some(entity)
    }

    /// Whether the entity is live (the checked-out one counts until removed)
    pub fn contains(&self, id: EntityId) -> bool {
        match self.current {
            Some(current) if current.id == id => !current.removed,
            _ => self.index_of(id).is_some(),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|idx| &self.entities[idx])
    }

    /// Entities resting in the registry (excludes the checked-out one)
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Snapshot of all live ids, including the checked-out entity
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.iter().map(|e| e.id).collect();
        if let Some(current) = self.current
            && !current.removed
        {
            let pos = ids.partition_point(|&id| id < current.id);
            ids.insert(pos, current.id);
        }
        ids
    }

    pub fn len(&self) -> usize {
        let current = self.current.is_some_and(|c| !c.removed) as usize;
        self.entities.len() + current
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live entities matching a predicate
    pub fn count(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(e)).count()
    }

    /// Drain queued add/remove notifications for the renderer
    pub fn drain_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move an entity out for its tick
    pub(crate) fn checkout(&mut self, id: EntityId) -> Option<Entity> {
        debug_assert!(self.current.is_none(), "nested checkout");
        let idx = self.index_of(id)?;
        self.current = Some(Checkout { id, removed: false });
        Some(self.entities.remove(idx))
    }

    /// Return the checked-out entity unless it removed itself
    pub(crate) fn checkin(&mut self, entity: Entity) {
        let Some(current) = self.current.take() else {
            return;
        };
        debug_assert_eq!(current.id, entity.id);
        if current.removed {
            return;
        }
        let pos = self.entities.partition_point(|e| e.id < entity.id);
        self.entities.insert(pos, entity);
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}
