//! Contract shared by the hash table implementations
//!
//! [`ChainedMap`](super::ChainedMap) and [`ProbingSet`](super::ProbingSet)
//! store entries differently but answer the same questions about keys, so
//! generic code (and the test harness) can drive either through
//! [`HashTable`].

use crate::error::Result;
use crate::hash_map::sizing;

/// Key lookup and removal common to every table
pub trait HashTable<K> {
    /// Number of live keys
    fn len(&self) -> usize;

    /// Number of buckets or slots backing the table
    fn capacity(&self) -> usize;

    /// Whether the table holds no keys
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ratio of live keys to capacity
    fn load_factor(&self) -> f64 {
        sizing::load_factor(self.len(), self.capacity())
    }

    /// Whether `key` is stored
    fn contains(&self, key: &K) -> bool;

    /// Remove `key`, returning whether it was present
    fn delete(&mut self, key: &K) -> bool;

    /// Snapshot of occupancy and collision statistics
    fn stats(&self) -> TableStats;

    /// Check every structural invariant of the table
    fn validate(&self) -> Result<()>;
}

/// Occupancy and collision statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableStats {
    /// Buckets or slots in the table
    pub capacity: usize,
    /// Live keys
    pub len: usize,
    /// Deleted slots still present (always 0 for chaining)
    pub tombstones: usize,
    /// Live keys over capacity
    pub load_factor: f64,
    /// Longest chain, or longest probe run to reach a live key
    pub max_probe_length: usize,
    /// Keys not stored at their home index, or sharing a bucket with an earlier key
    pub collisions: usize,
    /// Rehashes performed since construction
    pub rehash_count: usize,
}
