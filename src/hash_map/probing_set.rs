//! ProbingSet - membership set with open addressing and linear probing
//!
//! Keys live directly in a flat array of [`Slot`]s. A key starts at slot
//! `hash(key) mod capacity`; when that slot is taken the probe moves one slot
//! to the right, wrapping from the last slot back to slot 0.
//!
//! Removing a key leaves a [`Slot::Deleted`] tombstone rather than an empty
//! slot. Searches walk over tombstones and stop only at an empty slot or
//! after a full lap of the table, so a key placed behind a since-removed
//! collider stays reachable. Inserts reuse the first tombstone or empty slot
//! on their probe run.
//!
//! Live keys (`len`) and tombstones are counted separately. The table is
//! full only when every slot holds a live key, so tombstones never block an
//! insert. Growth, when enabled, counts tombstones toward the load factor
//! since they lengthen probe runs, and the rehash drops them.
//!
//! # Examples
//!
//! ```rust
//! use hashtab::hash_map::{IdentityHash, ProbingSet, Slot};
//!
//! let mut set = ProbingSet::with_hasher(7, IdentityHash).unwrap();
//! assert!(set.insert(10u64)); // slot 3
//! assert!(set.insert(17));    // collides at 3, lands in 4
//! assert!(set.remove(&10));
//! assert_eq!(set.slot(3), Some(&Slot::Deleted));
//! assert!(set.search(&17));
//! assert!(!set.search(&24)); // skips the tombstone, stops at empty slot 5
//! ```

use crate::config::{Config, HashTableConfig};
use crate::error::{check_capacity, HashTableError, Result};
use crate::hash_map::hash_functions::{bucket_index, DefaultHashFn, HashFn};
use crate::hash_map::sizing;
use crate::hash_map::table_traits::{HashTable, TableStats};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

/// State of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K> {
    /// Never held a key since construction or the last rehash
    Empty,
    /// Holds a live key
    Occupied(K),
    /// Held a key that was removed; probes continue past it
    Deleted,
}

impl<K> Slot<K> {
    /// Whether the slot has never been used
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Whether the slot holds a live key
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Whether the slot is a tombstone
    pub fn is_deleted(&self) -> bool {
        matches!(self, Slot::Deleted)
    }

    /// The live key, if any
    pub fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied(key) => Some(key),
            _ => None,
        }
    }
}

/// Linear probing hash set over a fixed number of slots
#[derive(Clone)]
pub struct ProbingSet<K, H = DefaultHashFn> {
    /// Slot array, `slots.len()` is the capacity
    slots: Vec<Slot<K>>,
    /// Occupied slots
    len: usize,
    /// Deleted slots
    tombstones: usize,
    /// Injected hash function
    hash_fn: H,
    /// Sizing and growth settings
    config: HashTableConfig,
    /// Rehashes performed so far
    rehash_count: usize,
}

impl<K> ProbingSet<K, DefaultHashFn>
where
    K: Hash + Eq,
{
    /// Create a fixed-capacity set with the default number of slots
    pub fn new() -> Self {
        Self::from_parts(HashTableConfig::default(), DefaultHashFn::new())
    }

    /// Create a fixed-capacity set with `capacity` slots
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, DefaultHashFn::new())
    }
}

impl<K> Default for ProbingSet<K, DefaultHashFn>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> ProbingSet<K, H>
where
    K: Eq,
    H: HashFn<K>,
{
    /// Create a fixed-capacity set with `capacity` slots and the given hash function
    pub fn with_hasher(capacity: usize, hash_fn: H) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self::from_parts(HashTableConfig::with_capacity(capacity), hash_fn))
    }

    /// Create a set from a validated configuration
    pub fn with_config(config: HashTableConfig, hash_fn: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, hash_fn))
    }

    fn from_parts(config: HashTableConfig, hash_fn: H) -> Self {
        Self {
            slots: empty_slots(config.initial_capacity),
            len: 0,
            tombstones: 0,
            hash_fn,
            config,
            rehash_count: 0,
        }
    }

    #[inline]
    fn home_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        H: HashFn<Q>,
    {
        bucket_index(<H as HashFn<Q>>::hash(&self.hash_fn, key), self.slots.len())
    }

    /// Index of the slot holding `key`
    ///
    /// Walks the probe run from the home slot over occupied slots and
    /// tombstones. Stops at the first empty slot, or after a full lap when
    /// the table has no empty slot left.
    fn find_slot<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let capacity = self.slots.len();
        let start = self.home_of(key);
        let mut idx = start;
        loop {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k) if key.eq(k.borrow()) => return Some(idx),
                Slot::Occupied(_) | Slot::Deleted => {}
            }
            idx = (idx + 1) % capacity;
            if idx == start {
                return None;
            }
        }
    }

    /// Check if `key` is in the set
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        self.find_slot(key).is_some()
    }

    /// Alias of [`search`](Self::search)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        self.search(key)
    }

    /// Number of slots visited to find `key`, counting the home slot as 1
    pub fn probe_length<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let idx = self.find_slot(key)?;
        Some(self.distance(self.home_of(key), idx) + 1)
    }

    #[inline]
    fn distance(&self, home: usize, idx: usize) -> usize {
        (idx + self.slots.len() - home) % self.slots.len()
    }

    /// Add `key`, returning whether it was inserted
    ///
    /// Returns false without touching the table when the key is already
    /// present or every slot holds a live key.
    pub fn insert(&mut self, key: K) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Add `key`, reporting why it was rejected
    ///
    /// # Errors
    ///
    /// [`HashTableError::Full`] when every slot holds a live key and growth is
    /// disabled; no probe is attempted. [`HashTableError::Duplicate`] when
    /// the key is already present. The table is unchanged in both cases.
    pub fn try_insert(&mut self, key: K) -> Result<()> {
        if self.is_full() && !self.config.auto_grow {
            log::trace!("ProbingSet insert rejected: {} slots all live", self.slots.len());
            return Err(HashTableError::full(self.slots.len()));
        }
        if self.find_slot(&key).is_some() {
            log::trace!("ProbingSet insert rejected: duplicate key");
            return Err(HashTableError::Duplicate);
        }
        self.maybe_grow();

        let idx = self.free_slot_for(&key);
        if self.slots[idx].is_deleted() {
            self.tombstones -= 1;
        }
        self.slots[idx] = Slot::Occupied(key);
        self.len += 1;
        Ok(())
    }

    /// First empty or deleted slot on the probe run of `key`
    ///
    /// Callers must guarantee at least one slot is not occupied.
    fn free_slot_for(&self, key: &K) -> usize {
        let capacity = self.slots.len();
        let mut idx = self.home_of(key);
        while self.slots[idx].is_occupied() {
            idx = (idx + 1) % capacity;
        }
        idx
    }

    /// Remove `key`, leaving a tombstone in its slot
    ///
    /// Returns whether the key was present. A second call for the same key
    /// returns false and changes nothing.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        match self.find_slot(key) {
            Some(idx) => {
                self.slots[idx] = Slot::Deleted;
                self.len -= 1;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    /// Grow before adding a key if the configuration allows it and the
    /// used slots (live plus tombstones) would exceed the load factor.
    fn maybe_grow(&mut self) -> bool {
        if !self.config.auto_grow {
            return false;
        }
        let capacity = self.slots.len();
        let used = self.len + self.tombstones + 1;
        if !sizing::exceeds_load_factor(used, capacity, self.config.max_load_factor) {
            return false;
        }
        let max = self.config.max_load_factor;
        let grown = if sizing::exceeds_load_factor(self.len + 1, capacity, max) {
            sizing::grown_capacity(capacity)
        } else {
            // tombstones alone pushed the load over; sweeping them is enough
            capacity
        };
        self.rehash_into(grown);
        true
    }

    /// Rebuild the slot array with `new_capacity` slots, dropping tombstones
    ///
    /// # Errors
    ///
    /// [`HashTableError::InvalidCapacity`] when `new_capacity` is zero or too
    /// small to hold the live keys. The table is unchanged.
    pub fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        check_capacity(new_capacity)?;
        if new_capacity < self.len {
            return Err(HashTableError::invalid_capacity(new_capacity));
        }
        self.rehash_into(new_capacity);
        Ok(())
    }

    /// Rehash in place at the current capacity, turning every tombstone
    /// back into an empty slot
    pub fn purge_tombstones(&mut self) {
        if self.tombstones > 0 {
            self.rehash_into(self.slots.len());
        }
    }

    fn rehash_into(&mut self, new_capacity: usize) {
        log::debug!(
            "Rehashing probing set: {} keys, {} tombstones, {} -> {} slots",
            self.len,
            self.tombstones,
            self.slots.len(),
            new_capacity
        );
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(key) = slot {
                let idx = self.free_slot_for(&key);
                self.slots[idx] = Slot::Occupied(key);
            }
        }
        self.rehash_count += 1;
    }
}

impl<K, H> ProbingSet<K, H> {
    /// Number of live keys
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot holds a live key
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of deleted slots awaiting reuse
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Live keys per slot
    pub fn load_factor(&self) -> f64 {
        sizing::load_factor(self.len, self.slots.len())
    }

    /// Configuration the set was built with
    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// The injected hash function
    pub fn hash_fn(&self) -> &H {
        &self.hash_fn
    }

    /// State of slot `idx`, `None` past the last slot
    pub fn slot(&self, idx: usize) -> Option<&Slot<K>> {
        self.slots.get(idx)
    }

    /// Remove every key and tombstone, keeping the slot array
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Iterate over live keys in slot order
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.slots.iter().filter_map(Slot::key)
    }
}

impl<K, H> HashTable<K> for ProbingSet<K, H>
where
    K: Eq,
    H: HashFn<K>,
{
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn stats(&self) -> TableStats {
        let mut max_probe_length = 0;
        let mut collisions = 0;
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(key) = slot {
                let run = self.distance(self.home_of(key), idx) + 1;
                max_probe_length = max_probe_length.max(run);
                if run > 1 {
                    collisions += 1;
                }
            }
        }
        TableStats {
            capacity: self.slots.len(),
            len: self.len,
            tombstones: self.tombstones,
            load_factor: self.load_factor(),
            max_probe_length,
            collisions,
            rehash_count: self.rehash_count,
        }
    }

    fn validate(&self) -> Result<()> {
        let occupied = self.slots.iter().filter(|s| s.is_occupied()).count();
        let deleted = self.slots.iter().filter(|s| s.is_deleted()).count();
        if occupied != self.len {
            return Err(breach(format!(
                "len is {} but {} slots are occupied",
                self.len, occupied
            )));
        }
        if deleted != self.tombstones {
            return Err(breach(format!(
                "tombstone count is {} but {} slots are deleted",
                self.tombstones, deleted
            )));
        }
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(key) = slot {
                // the probe from the home slot must reach this slot first,
                // which also rules out a second copy earlier on the run
                match self.find_slot(key) {
                    Some(found) if found == idx => {}
                    Some(found) => {
                        return Err(breach(format!(
                            "key in slot {} shadowed by a copy in slot {}",
                            idx, found
                        )))
                    }
                    None => {
                        return Err(breach(format!(
                            "key in slot {} unreachable from slot {}",
                            idx,
                            self.home_of(key)
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}

impl<K: fmt::Debug, H> fmt::Debug for ProbingSet<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingSet")
            .field("capacity", &self.slots.len())
            .field("len", &self.len)
            .field("tombstones", &self.tombstones)
            .field("slots", &self.slots)
            .finish()
    }
}

fn empty_slots<K>(capacity: usize) -> Vec<Slot<K>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

fn breach(message: String) -> HashTableError {
    log::warn!("ProbingSet invariant violated: {}", message);
    HashTableError::corrupted(message)
}
