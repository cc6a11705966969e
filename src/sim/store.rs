//! Live entity population
//!
//! Removal is two-phase: entities are marked during the frame and dropped in a
//! single [`EntityStore::compact`] pass at the end, so indices stay stable
//! while the frame iterates.

use super::entity::Entity;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Append an entity, returning its index for the rest of this frame
    pub fn add(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Entity exists and is not marked for removal
    pub fn is_live(&self, index: usize) -> bool {
        self.entities.get(index).is_some_and(|e| !e.removed)
    }

    /// Mark for removal. Returns true only the first time.
    pub fn mark_removed(&mut self, index: usize) -> bool {
        match self.entities.get_mut(index) {
            Some(entity) if !entity.removed => {
                entity.removed = true;
                true
            }
            _ => false,
        }
    }

    /// Drop every marked entity, preserving the order of survivors.
    /// Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.removed);
        before - self.entities.len()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities not marked for removal
    pub fn live(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{ColorTag, EntityKind};
    use glam::Vec2;

    fn shard(id: u32) -> Entity {
        Entity::new(
            id,
            EntityKind::Collectible { rotation: 0.0 },
            Vec2::ZERO,
            Vec2::splat(25.0),
            Vec2::ZERO,
            ColorTag::Shard,
        )
    }

    #[test]
    fn test_mark_removed_is_idempotent() {
        let mut store = EntityStore::new();
        let i = store.add(shard(1));
        assert!(store.mark_removed(i));
        assert!(!store.mark_removed(i));
        assert!(!store.is_live(i));
        assert_eq!(store.compact(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_compact_preserves_survivor_order() {
        let mut store = EntityStore::new();
        for id in 1..=5 {
            store.add(shard(id));
        }
        store.mark_removed(1);
        store.mark_removed(3);

        // Marked entities stay addressable until compaction
        assert_eq!(store.len(), 5);
        assert_eq!(store.live().count(), 3);

        store.compact();
        let ids: Vec<u32> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut store = EntityStore::new();
        assert!(!store.is_live(0));
        assert!(!store.mark_removed(3));
        assert_eq!(store.index_of(42), None);
    }
}
