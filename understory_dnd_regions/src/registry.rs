// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered region registries.
//!
//! ## Usage
//!
//! 1) Call [`RegionRegistry::insert`] when a host element starts acting as a region.
//! 2) Keep the returned [`RegionKey`]; pass it to [`RegionRegistry::remove`] to undo
//!    exactly that registration.
//! 3) Iterate with [`RegionRegistry::iter`] (or hit test with [`crate::hit_test`]);
//!    entries come back in the order they were first inserted.
//!
//! Re-inserting an id that is already present overwrites the entry in place: it
//! keeps its original position, takes the new node, and the key issued by the
//! earlier insert goes stale. Callers are expected to keep ids unique per kind.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// The three kinds of region a drag-and-drop backend tracks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Elements that can start a drag.
    Source,
    /// Elements used to render the dragged item.
    Preview,
    /// Elements that can accept a drop.
    Target,
}

/// Identifies one specific registration in a [`RegionRegistry`].
///
/// A key only removes the entry it was issued for. Once that entry is gone, or
/// has been overwritten by a later insert of the same id, the key is stale and
/// removing with it does nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegionKey<Id> {
    id: Id,
    generation: u64,
}

impl<Id> RegionKey<Id> {
    /// The region id this key was issued for.
    pub fn id(&self) -> &Id {
        &self.id
    }
}

#[derive(Clone, Debug)]
struct Entry<Id, N, O> {
    id: Id,
    node: N,
    options: O,
    generation: u64,
}

/// Ordered mapping from region ids to host nodes, with optional per-entry options.
#[derive(Clone, Debug)]
pub struct RegionRegistry<Id, N, O = ()> {
    // Tombstoned slots keep positions stable until the next compaction.
    slots: Vec<Option<Entry<Id, N, O>>>,
    index: HashMap<Id, usize>,
    next_generation: u64,
}

impl<Id, N, O> Default for RegionRegistry<Id, N, O> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<Id: Clone + Eq + Hash, N, O> RegionRegistry<Id, N, O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `id`, returning the key that removes this registration.
    pub fn insert(&mut self, id: Id, node: N, options: O) -> RegionKey<Id> {
        let generation = self.next_generation;
        self.next_generation += 1;
        let entry = Entry {
            id: id.clone(),
            node,
            options,
            generation,
        };
        if let Some(&slot) = self.index.get(&id) {
            self.slots[slot] = Some(entry);
        } else {
            self.index.insert(id.clone(), self.slots.len());
            self.slots.push(Some(entry));
        }
        RegionKey { id, generation }
    }

    /// Remove the entry `key` was issued for.
    ///
    /// Returns `false` (and changes nothing) if the key is stale.
    pub fn remove(&mut self, key: &RegionKey<Id>) -> bool {
        let Some(&slot) = self.index.get(&key.id) else {
            return false;
        };
        if !matches!(&self.slots[slot], Some(e) if e.generation == key.generation) {
            return false;
        }
        self.slots[slot] = None;
        self.index.remove(&key.id);
        if self.slots.len() - self.index.len() > self.index.len() {
            self.compact();
        }
        true
    }

    /// Node registered under `id`.
    pub fn get(&self, id: &Id) -> Option<&N> {
        self.entry(id).map(|e| &e.node)
    }

    /// Options registered alongside `id`.
    pub fn options(&self, id: &Id) -> Option<&O> {
        self.entry(id).map(|e| &e.options)
    }

    /// Returns `true` if `id` is currently registered.
    pub fn contains(&self, id: &Id) -> bool {
        self.index.contains_key(id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, &N)> + '_ {
        self.slots.iter().flatten().map(|e| (&e.id, &e.node))
    }

    fn entry(&self, id: &Id) -> Option<&Entry<Id, N, O>> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_ref()
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (slot, entry) in self.slots.iter().flatten().enumerate() {
            self.index.insert(entry.id.clone(), slot);
        }
    }
}

/// One registry per [`RegionKind`].
///
/// Previews carry options of type `P`; sources and targets carry none.
#[derive(Clone, Debug)]
pub struct RegionRegistries<Id, N, P = ()> {
    /// Drag sources.
    pub sources: RegionRegistry<Id, N>,
    /// Drag previews and their options.
    pub previews: RegionRegistry<Id, N, P>,
    /// Drop targets.
    pub targets: RegionRegistry<Id, N>,
}

impl<Id, N, P> Default for RegionRegistries<Id, N, P> {
    fn default() -> Self {
        Self {
            sources: RegionRegistry::default(),
            previews: RegionRegistry::default(),
            targets: RegionRegistry::default(),
        }
    }
}

impl<Id: Clone + Eq + Hash, N, P> RegionRegistries<Id, N, P> {
    /// Create three empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` is registered as a region of `kind`.
    pub fn contains(&self, kind: RegionKind, id: &Id) -> bool {
        match kind {
            RegionKind::Source => self.sources.contains(id),
            RegionKind::Preview => self.previews.contains(id),
            RegionKind::Target => self.targets.contains(id),
        }
    }

    /// Remove the registration `key` names from the registry of `kind`.
    pub fn remove(&mut self, kind: RegionKind, key: &RegionKey<Id>) -> bool {
        match kind {
            RegionKind::Source => self.sources.remove(key),
            RegionKind::Preview => self.previews.remove(key),
            RegionKind::Target => self.targets.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ids<O>(reg: &RegionRegistry<&'static str, u32, O>) -> Vec<&'static str> {
        reg.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut reg = RegionRegistry::new();
        reg.insert("c", 3, ());
        reg.insert("a", 1, ());
        reg.insert("b", 2, ());
        assert_eq!(ids(&reg), vec!["c", "a", "b"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn key_removes_exactly_its_entry_once() {
        let mut reg = RegionRegistry::new();
        let a = reg.insert("a", 1, ());
        reg.insert("b", 2, ());
        assert!(reg.remove(&a));
        assert!(!reg.remove(&a));
        assert_eq!(ids(&reg), vec!["b"]);
        assert_eq!(reg.get(&"a"), None);
    }

    #[test]
    fn reinsert_overwrites_in_place_and_stales_old_key() {
        let mut reg = RegionRegistry::new();
        let first = reg.insert("a", 1, ());
        reg.insert("b", 2, ());
        let second = reg.insert("a", 10, ());
        assert_eq!(ids(&reg), vec!["a", "b"]);
        assert_eq!(reg.get(&"a"), Some(&10));

        assert!(!reg.remove(&first));
        assert!(reg.contains(&"a"));
        assert!(reg.remove(&second));
        assert!(!reg.contains(&"a"));
    }

    #[test]
    fn compaction_preserves_order_and_lookups() {
        let mut reg = RegionRegistry::new();
        let keys: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .zip(0_u32..)
            .map(|(id, n)| reg.insert(id, n, ()))
            .collect();
        assert!(reg.remove(&keys[0]));
        assert!(reg.remove(&keys[1]));
        assert!(reg.remove(&keys[3]));
        reg.insert("f", 5, ());
        assert_eq!(ids(&reg), vec!["c", "e", "f"]);
        assert_eq!(reg.get(&"e"), Some(&4));
        assert!(reg.remove(&keys[4]));
        assert_eq!(ids(&reg), vec!["c", "f"]);
    }

    #[test]
    fn options_travel_with_the_entry() {
        let mut reg: RegionRegistry<&str, u32, Option<u8>> = RegionRegistry::new();
        reg.insert("p", 1, Some(7));
        assert_eq!(reg.options(&"p"), Some(&Some(7)));
        assert_eq!(reg.options(&"q"), None);
    }

    #[test]
    fn registries_route_by_kind() {
        let mut regs: RegionRegistries<&str, u32> = RegionRegistries::new();
        let key = regs.targets.insert("t", 1, ());
        assert!(regs.contains(RegionKind::Target, &"t"));
        assert!(!regs.contains(RegionKind::Source, &"t"));
        assert!(!regs.remove(RegionKind::Source, &key));
        assert!(regs.remove(RegionKind::Target, &key));
        assert!(regs.targets.is_empty());
    }
}
