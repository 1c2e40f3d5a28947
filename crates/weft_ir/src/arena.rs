//! Append-only arena for dense, ID-indexed storage of IR entities.
//!
//! The [`Arena`] provides O(1) insertion and lookup by opaque [`ArenaId`] keys.
//! The only removal is [`Arena::truncate`], which the context uses to roll back
//! a failed load to a previous length.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
///
/// Implementors must provide a bijection between `u32` indices and the ID type.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, ID-indexed container for IR entities.
///
/// Items are appended and never reordered, so IDs stay stable for as long as
/// the item lives.
#[derive(Debug, Clone)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the ID the next call to [`alloc`](Self::alloc) will hand out.
    pub fn next_id(&self) -> I {
        I::from_raw(self.items.len() as u32)
    }

    /// Allocates a new item in the arena and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        id
    }

    /// Returns a reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Drops every item allocated at or after index `len`.
    ///
    /// IDs handed out for the dropped items become invalid.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over references to items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Iterates over mutable references to items in allocation order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ModuleId;

    #[test]
    fn alloc_and_get() {
        let mut arena: Arena<ModuleId, String> = Arena::new();
        let id = arena.alloc("adder".to_string());
        assert_eq!(arena[id], "adder");
    }

    #[test]
    fn next_id_matches_alloc() {
        let mut arena: Arena<ModuleId, u32> = Arena::new();
        arena.alloc(1);
        let predicted = arena.next_id();
        let actual = arena.alloc(2);
        assert_eq!(predicted, actual);
    }

    #[test]
    fn get_mut_modifies() {
        let mut arena: Arena<ModuleId, String> = Arena::new();
        let id = arena.alloc("decl".to_string());
        *arena.get_mut(id) = "defined".to_string();
        assert_eq!(arena[id], "defined");
    }

    #[test]
    fn truncate_rolls_back() {
        let mut arena: Arena<ModuleId, &str> = Arena::new();
        arena.alloc("kept");
        let mark = arena.len();
        arena.alloc("dropped");
        arena.alloc("dropped too");
        arena.truncate(mark);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.next_id().as_raw(), 1);
    }

    #[test]
    fn iter_ids_are_sequential() {
        let mut arena: Arena<ModuleId, u32> = Arena::new();
        arena.alloc(100);
        arena.alloc(200);
        let ids: Vec<u32> = arena.iter().map(|(id, _)| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn default_is_empty() {
        let arena: Arena<ModuleId, u32> = Arena::default();
        assert!(arena.is_empty());
    }
}
