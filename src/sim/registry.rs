//! Entity arena with stable handles
//!
//! Entities are addressed by an [`EntityId`] that is never reused. Killing an
//! entity only marks its slot; slots are dropped in [`Registry::sweep`], which
//! the tick calls once per frame after all iteration is done.

use serde::{Deserialize, Serialize};

use super::body::{Collidable, Shape};

/// Stable entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    id: EntityId,
    alive: bool,
    value: T,
}

/// A live entity borrowed from the registry
#[derive(Debug)]
pub struct Entry<'a, T> {
    pub id: EntityId,
    pub value: &'a T,
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

impl<T: Collidable> Collidable for Entry<'_, T> {
    #[inline]
    fn position(&self) -> glam::Vec2 {
        self.value.position()
    }

    #[inline]
    fn shape(&self) -> &Shape {
        self.value.shape()
    }
}

/// Owner of all entities of one kind (sorted by id for determinism)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new live entity
    pub fn spawn(&mut self, value: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            alive: true,
            value,
        });
        id
    }

    // Ids are handed out in increasing order, so slots stay sorted
    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |s| s.id).ok()
    }

    /// Live entity by id
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.index_of(id)
            .map(|i| &self.slots[i])
            .filter(|s| s.alive)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let i = self.index_of(id)?;
        let slot = &mut self.slots[i];
        slot.alive.then_some(&mut slot.value)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Mark an entity for removal at the next sweep.
    ///
    /// Returns false if it was already dead or unknown.
    pub fn mark_dead(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(i) if self.slots[i].alive => {
                self.slots[i].alive = false;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of live entities in id order
    pub fn alive(&self) -> impl Iterator<Item = Entry<'_, T>> {
        self.slots.iter().filter(|s| s.alive).map(|s| Entry {
            id: s.id,
            value: &s.value,
        })
    }

    /// Mutable access to live entities in id order
    pub fn alive_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots
            .iter_mut()
            .filter(|s| s.alive)
            .map(|s| (s.id, &mut s.value))
    }

    /// Drop dead slots, returning their ids
    pub fn sweep(&mut self) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .slots
            .iter()
            .filter(|s| !s.alive)
            .map(|s| s.id)
            .collect();
        self.slots.retain(|s| s.alive);
        removed
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_lookup() {
        let mut reg = Registry::new();
        let a = reg.spawn("a");
        let b = reg.spawn("b");
        assert_ne!(a, b);
        assert_eq!(reg.get(a), Some(&"a"));
        assert_eq!(reg.get(b), Some(&"b"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_dead_entities_stay_until_sweep() {
        let mut reg = Registry::new();
        let a = reg.spawn(1);
        let b = reg.spawn(2);

        assert!(reg.mark_dead(a));
        assert!(!reg.mark_dead(a));
        assert!(!reg.is_alive(a));
        assert!(reg.get_mut(a).is_none());
        let live: Vec<EntityId> = reg.alive().map(|e| e.id).collect();
        assert_eq!(live, vec![b]);

        assert_eq!(reg.sweep(), vec![a]);
        assert!(reg.sweep().is_empty());
        assert_eq!(reg.get(b), Some(&2));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut reg = Registry::new();
        let a = reg.spawn(());
        reg.mark_dead(a);
        reg.sweep();
        let b = reg.spawn(());
        assert!(b > a);
        assert!(reg.get(a).is_none());
    }

    #[test]
    fn test_alive_mut_skips_dead() {
        let mut reg = Registry::new();
        let a = reg.spawn(1);
        let b = reg.spawn(2);
        reg.mark_dead(a);
        for (_, v) in reg.alive_mut() {
            *v *= 10;
        }
        assert_eq!(reg.get(b), Some(&20));
        assert!(!reg.is_empty());
    }
}
