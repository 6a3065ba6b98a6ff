//! Bidirectional coordinate/handle map that decides which entity occupies which tile.
//! This module exists to keep placement in one authoritative structure with deferred edits.
//! It does not own entity data or judge walkability; callers check terrain first.
//!
//! Producers that run while a phase iterates the index queue their structural changes
//! with [`SpatialIndex::add_later`] and [`SpatialIndex::remove_later`]. Queued changes stay
//! invisible to every query until the matching `commit_*` call.

use std::collections::BTreeMap;
use std::mem;

use slotmap::{Key, SecondaryMap};

use crate::error::IndexError;
use crate::types::Pos;

#[derive(Clone, Debug)]
pub struct SpatialIndex<K: Key> {
    by_pos: BTreeMap<Pos, K>,
    by_key: SecondaryMap<K, Pos>,
    pending_adds: Vec<(K, Pos)>,
    pending_removals: Vec<K>,
}

impl<K: Key> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            by_pos: BTreeMap::new(),
            by_key: SecondaryMap::new(),
            pending_adds: Vec::new(),
            pending_removals: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.by_pos.contains_key(&pos)
    }

    pub fn entity_at(&self, pos: Pos) -> Option<K> {
        self.by_pos.get(&pos).copied()
    }

    pub fn coord_of(&self, key: K) -> Result<Pos, IndexError> {
        self.by_key.get(key).copied().ok_or(IndexError::NotFound)
    }

    /// Places `key` at `pos` immediately. A key that is already indexed is moved.
    pub fn add(&mut self, key: K, pos: Pos) -> Result<(), IndexError> {
        if let Some(existing) = self.entity_at(pos) {
            if existing == key {
                return Ok(());
            }
            return Err(IndexError::Occupied { pos });
        }
        if let Some(old) = self.by_key.insert(key, pos) {
            self.by_pos.remove(&old);
        }
        self.by_pos.insert(pos, key);
        Ok(())
    }

    pub fn remove(&mut self, key: K) -> Option<Pos> {
        let pos = self.by_key.remove(key)?;
        self.by_pos.remove(&pos);
        Some(pos)
    }

    pub fn remove_at(&mut self, pos: Pos) -> Option<K> {
        let key = self.by_pos.remove(&pos)?;
        self.by_key.remove(key);
        Some(key)
    }

    /// Remove-then-insert, applied as one step so no caller sees the key missing.
    pub fn move_to(&mut self, key: K, pos: Pos) -> Result<(), IndexError> {
        let old = self.coord_of(key)?;
        if old == pos {
            return Ok(());
        }
        if self.is_occupied(pos) {
            return Err(IndexError::Occupied { pos });
        }
        self.by_pos.remove(&old);
        self.by_pos.insert(pos, key);
        self.by_key.insert(key, pos);
        Ok(())
    }

    /// Drops every placement and every queued change.
    pub fn clear(&mut self) {
        self.by_pos.clear();
        self.by_key.clear();
        self.pending_adds.clear();
        self.pending_removals.clear();
    }

    pub fn add_later(&mut self, key: K, pos: Pos) {
        self.pending_adds.push((key, pos));
    }

    pub fn has_pending_add_at(&self, pos: Pos) -> bool {
        self.pending_adds.iter().any(|&(_, queued)| queued == pos)
    }

    pub fn pending_add_count(&self) -> usize {
        self.pending_adds.len()
    }

    /// Applies queued insertions in queue order and returns the keys that could not be
    /// placed because their coordinate was already taken.
    pub fn commit_adds(&mut self) -> Vec<K> {
        let pending = mem::take(&mut self.pending_adds);
        let mut rejected = Vec::new();
        for (key, pos) in pending {
            if self.add(key, pos).is_err() {
                rejected.push(key);
            }
        }
        rejected
    }

    pub fn remove_later(&mut self, key: K) {
        if !self.pending_removals.contains(&key) {
            self.pending_removals.push(key);
        }
    }

    pub fn is_pending_removal(&self, key: K) -> bool {
        self.pending_removals.contains(&key)
    }

    pub fn pending_removal_count(&self) -> usize {
        self.pending_removals.len()
    }

    /// Applies queued removals and returns what was actually removed, with the coordinate
    /// each key held. Keys that were no longer indexed are skipped.
    pub fn commit_removals(&mut self) -> Vec<(K, Pos)> {
        let pending = mem::take(&mut self.pending_removals);
        pending.into_iter().filter_map(|key| self.remove(key).map(|pos| (key, pos))).collect()
    }

    /// Placements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, K)> + '_ {
        self.by_pos.iter().map(|(&pos, &key)| (pos, key))
    }

    /// Owned copy of the current placements, safe to walk while mutating the index.
    pub fn snapshot(&self) -> Vec<(Pos, K)> {
        self.iter().collect()
    }

    /// Linear reverse scan for the first placement whose key satisfies `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(K) -> bool) -> Option<(Pos, K)> {
        self.by_pos.iter().rev().map(|(&pos, &key)| (pos, key)).find(|&(_, key)| predicate(key))
    }

    /// Checks that both views describe the same placements.
    pub fn is_consistent(&self) -> bool {
        self.by_pos.len() == self.by_key.len()
            && self.by_pos.iter().all(|(pos, &key)| self.by_key.get(key) == Some(pos))
    }
}
