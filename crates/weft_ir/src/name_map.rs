//! Insertion-ordered map keyed by interned names.
//!
//! Every name-keyed collection in the IR (parameters, arguments, namespace
//! symbols, instances) preserves insertion order so that a saved document
//! lists entries in the same order they were declared or loaded.

use std::collections::HashMap;
use weft_common::Ident;

/// An insertion-ordered map from [`Ident`] to `V` with O(1) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap<V> {
    entries: Vec<(Ident, V)>,
    index: HashMap<Ident, usize>,
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NameMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts a value under `name`.
    ///
    /// If the name was already present its value is replaced in place (keeping
    /// its original position) and the old value is returned.
    pub fn insert(&mut self, name: Ident, value: V) -> Option<V> {
        match self.index.get(&name) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(name, self.entries.len());
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Inserts a value under a name that must not be present yet.
    ///
    /// Returns a reference to the stored value, or gives `value` back if the
    /// name is taken.
    pub fn try_insert(&mut self, name: Ident, value: V) -> Result<&mut V, V> {
        if self.index.contains_key(&name) {
            return Err(value);
        }
        let slot = self.entries.len();
        self.index.insert(name, slot);
        self.entries.push((name, value));
        Ok(&mut self.entries[slot].1)
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: Ident) -> Option<&V> {
        self.index.get(&name).map(|&slot| &self.entries[slot].1)
    }

    /// Returns `true` if `name` is present.
    pub fn contains(&self, name: Ident) -> bool {
        self.index.contains_key(&name)
    }

    /// Iterates over `(name, &value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &V)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Iterates over names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = Ident> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Keeps only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        for (name, _) in self.entries.drain(len.min(self.entries.len())..) {
            self.index.remove(&name);
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> FromIterator<(Ident, V)> for NameMap<V> {
    fn from_iter<T: IntoIterator<Item = (Ident, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
