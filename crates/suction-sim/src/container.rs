//! Bounded storage for captured entities.

use hecs::Entity;

/// Ordered, fixed-capacity list of stored captures.
#[derive(Debug, Clone)]
pub struct Container {
    items: Vec<Entity>,
    capacity: usize,
}

impl Container {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Store `entity`. Returns false, leaving the container untouched, when full.
    pub fn try_add(&mut self, entity: Entity) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(entity);
        true
    }

    /// Empty the container, returning how many entries it held.
    pub fn drain_all(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }
}
