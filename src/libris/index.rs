//! # Id Index
//!
//! Records live in insertion-ordered `Vec`s so listings keep their order. An
//! [`IdIndex`] maps a record id to its position in that `Vec`.
//!
//! Insertions patch the index with one entry. Removals rebuild it from the
//! surviving collection: removing from the middle shifts every later
//! position, and a full rebuild is O(n) but cannot leave a stale entry behind.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    positions: HashMap<u32, usize>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `items`, keyed by `id_of`.
    pub fn build<T>(items: &[T], id_of: impl Fn(&T) -> u32) -> Self {
        let mut index = Self::new();
        index.rebuild(items, id_of);
        index
    }

    pub fn insert(&mut self, id: u32, position: usize) {
        self.positions.insert(id, position);
    }

    pub fn get(&self, id: u32) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn rebuild<T>(&mut self, items: &[T], id_of: impl Fn(&T) -> u32) {
        self.positions.clear();
        for (position, item) in items.iter().enumerate() {
            self.positions.insert(id_of(item), position);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indexed ids, ascending.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.positions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// True when the index describes exactly `items`, in position.
    pub fn mirrors<T>(&self, items: &[T], id_of: impl Fn(&T) -> u32) -> bool {
        self.positions.len() == items.len()
            && items
                .iter()
                .enumerate()
                .all(|(position, item)| self.get(id_of(item)) == Some(position))
    }
}
