//! ChainedMap - associative hash table with separate chaining
//!
//! Each of the `capacity` buckets is an ordered `Vec` of `(key, value)`
//! pairs. A key lives in bucket `hash(key) mod capacity`; colliding keys are
//! appended to the end of the bucket, so chains are unbounded and the map
//! never reports itself full.
//!
//! The bucket array keeps its size unless growth is enabled in the
//! [`HashTableConfig`], in which case a new key that would push the load
//! factor past the configured maximum first rehashes every entry into a
//! prime capacity roughly twice as large.
//!
//! # Examples
//!
//! ```rust
//! use hashtab::hash_map::ChainedMap;
//!
//! let mut map = ChainedMap::new();
//! map.put("name", "frodo");
//! assert_eq!(map.get("name"), Some(&"frodo"));
//!
//! map.put("name", "gandalf");
//! assert_eq!(map.get("name"), Some(&"gandalf"));
//! assert_eq!(map.len(), 1);
//!
//! map.delete("name");
//! assert_eq!(map.get("name"), None);
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

/// One bucket: entries in insertion order
type Bucket<K, V> = Vec<(K, V)>;

/// Separate chaining hash map over a fixed number of buckets
#[derive(Clone)]
pub struct ChainedMap<K, V, H = DefaultHashFn> {
    /// Bucket array, `buckets.len()` is the capacity
    buckets: Vec<Bucket<K, V>>,
    /// Number of stored entries
    len: usize,
    /// Injected hash function
    hash_fn: H,
    /// Sizing and growth settings
    config: HashTableConfig,
    /// Rehashes performed so far
    rehash_count: usize,
}

impl<K, V> ChainedMap<K, V, DefaultHashFn>
where
    K: Hash + Eq,
{
    /// Create a fixed-capacity map with the default number of buckets
    pub fn new() -> Self {
        Self::from_parts(HashTableConfig::default(), DefaultHashFn::new())
    }

    /// Create a fixed-capacity map with `capacity` buckets
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, DefaultHashFn::new())
    }
}

impl<K, V> Default for ChainedMap<K, V, DefaultHashFn>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> ChainedMap<K, V, H>
where
    K: Eq,
    H: HashFn<K>,
{
    /// Create a fixed-capacity map with `capacity` buckets and the given hash function
    pub fn with_hasher(capacity: usize, hash_fn: H) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self::from_parts(HashTableConfig::with_capacity(capacity), hash_fn))
    }

    /// Create a map from a validated configuration
    pub fn with_config(config: HashTableConfig, hash_fn: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, hash_fn))
    }

    fn from_parts(config: HashTableConfig, hash_fn: H) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            hash_fn,
            config,
            rehash_count: 0,
        }
    }

    #[inline]
    fn index_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        H: HashFn<Q>,
    {
        bucket_index(<H as HashFn<Q>>::hash(&self.hash_fn, key), self.buckets.len())
    }

    /// Get a reference to the value stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let idx = self.index_of(key);
        self.buckets[idx]
            .iter()
            .find(|(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// Get a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let idx = self.index_of(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// Check if `key` is stored
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        self.get(key).is_some()
    }

    /// Store `value` under `key`, overwriting any previous value
    pub fn put(&mut self, key: K, value: V) {
        let _ = self.insert(key, value);
    }

    /// Store `value` under `key`, returning the previous value if the key existed
    ///
    /// An existing entry is updated in place and keeps its position in the
    /// chain. A new entry goes to the end of its bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.index_of(&key);
        if let Some((_, slot)) = self.buckets[idx].iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(slot, value));
        }

        let idx = if self.maybe_grow() {
            self.index_of(&key)
        } else {
            idx
        };
        self.buckets[idx].push((key, value));
        self.len += 1;
        None
    }

    /// Remove `key`; absent keys are ignored
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let _ = self.remove(key);
    }

    /// Remove `key` and return its value
    ///
    /// The remaining entries of the bucket keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashFn<Q>,
    {
        let idx = self.index_of(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|(k, _)| key.eq(k.borrow()))?;
        let (_, value) = bucket.remove(pos);
        self.len -= 1;
        Some(value)
    }

    /// Grow before adding a new entry if the configuration allows it and
    /// the load factor would be exceeded. Returns whether a rehash happened.
    fn maybe_grow(&mut self) -> bool {
        if !self.config.auto_grow {
            return false;
        }
        let capacity = self.buckets.len();
        if !sizing::exceeds_load_factor(self.len + 1, capacity, self.config.max_load_factor) {
            return false;
        }
        self.rehash_into(sizing::grown_capacity(capacity));
        true
    }

    /// Rebuild the bucket array with `new_capacity` buckets
    ///
    /// Entries keep their relative order within each new bucket.
    pub fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        check_capacity(new_capacity)?;
        self.rehash_into(new_capacity);
        Ok(())
    }

    fn rehash_into(&mut self, new_capacity: usize) {
        log::debug!(
            "Rehashing chained map: {} entries, {} -> {} buckets",
            self.len,
            self.buckets.len(),
            new_capacity
        );
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, value) in old.into_iter().flatten() {
            let idx = self.index_of(&key);
            self.buckets[idx].push((key, value));
        }
        self.rehash_count += 1;
    }
}

impl<K, V, H> ChainedMap<K, V, H> {
    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket
    pub fn load_factor(&self) -> f64 {
        sizing::load_factor(self.len, self.buckets.len())
    }

    /// Configuration the map was built with
    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// The injected hash function
    pub fn hash_fn(&self) -> &H {
        &self.hash_fn
    }

    /// Entries of bucket `idx` in chain order, `None` past the last bucket
    pub fn bucket(&self, idx: usize) -> Option<&[(K, V)]> {
        self.buckets.get(idx).map(Vec::as_slice)
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Remove every entry, keeping the bucket array
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.len = 0;
    }

    /// Iterate over entries in bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Iterate over keys
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over values
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, H> HashTable<K> for ChainedMap<K, V, H>
where
    K: Eq,
    H: HashFn<K>,
{
    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    fn stats(&self) -> TableStats {
        let collisions = self
            .buckets
            .iter()
            .map(|bucket| bucket.len().saturating_sub(1))
            .sum();
        TableStats {
            capacity: self.buckets.len(),
            len: self.len,
            tombstones: 0,
            load_factor: self.load_factor(),
            max_probe_length: self.longest_chain(),
            collisions,
            rehash_count: self.rehash_count,
        }
    }

    fn validate(&self) -> Result<()> {
        let mut counted = 0;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (pos, (key, _)) in bucket.iter().enumerate() {
                let home = self.index_of(key);
                if home != idx {
                    return Err(breach(format!(
                        "entry in bucket {} hashes to bucket {}",
                        idx, home
                    )));
                }
                if bucket[..pos].iter().any(|(k, _)| k == key) {
                    return Err(breach(format!("duplicate key in bucket {}", idx)));
                }
            }
            counted += bucket.len();
        }
        if counted != self.len {
            return Err(breach(format!(
                "len is {} but buckets hold {} entries",
                self.len, counted
            )));
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for ChainedMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("capacity", &self.buckets.len())
            .field("len", &self.len)
            .field("buckets", &self.buckets)
            .finish()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    (0..capacity).map(|_| Vec::new()).collect()
}

fn breach(message: String) -> HashTableError {
    log::warn!("ChainedMap invariant violated: {}", message);
    HashTableError::corrupted(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_map::IdentityHash;

    fn identity_map(capacity: usize) -> ChainedMap<u64, &'static str, IdentityHash> {
        ChainedMap::with_hasher(capacity, IdentityHash).unwrap()
    }

    #[test]
    fn test_basic_operations() {
        let mut map = ChainedMap::new();

        map.put("name", "frodo");
        assert_eq!(map.get("name"), Some(&"frodo"));

        map.put("name", "gandalf");
        assert_eq!(map.get("name"), Some(&"gandalf"));
        assert_eq!(map.len(), 1);

        map.delete("name");
        assert_eq!(map.get("name"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        let map: ChainedMap<String, i32> = ChainedMap::default();
        assert_eq!(map.capacity(), 7);
        assert!(map.is_empty());
        assert_eq!(map.load_factor(), 0.0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            ChainedMap::<u64, u64>::with_capacity(0),
            Err(HashTableError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn test_collisions_append_in_order() {
        let mut map = identity_map(7);
        map.put(3, "a");
        map.put(10, "b");
        map.put(17, "c");

        assert_eq!(map.bucket(3).unwrap(), &[(3, "a"), (10, "b"), (17, "c")]);
        assert_eq!(map.longest_chain(), 3);
        assert_eq!(map.get(&10), Some(&"b"));
        assert_eq!(map.get(&24), None);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = identity_map(7);
        map.put(3, "a");
        map.put(10, "b");
        assert_eq!(map.insert(3, "z"), Some("a"));
        assert_eq!(map.bucket(3).unwrap(), &[(3, "z"), (10, "b")]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map = identity_map(7);
        for (k, v) in [(3, "a"), (10, "b"), (17, "c"), (24, "d")] {
            map.put(k, v);
        }
        assert_eq!(map.remove(&10), Some("b"));
        assert_eq!(map.bucket(3).unwrap(), &[(3, "a"), (17, "c"), (24, "d")]);
        assert_eq!(map.remove(&10), None);
        assert_eq!(map.len(), 3);
        map.validate().unwrap();
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut map = identity_map(7);
        map.put(1, "one");
        map.delete(&8);
        map.delete(&99);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"one"));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedMap::new();
        map.put(String::from("count"), 1);
        if let Some(v) = map.get_mut("count") {
            *v += 41;
        }
        assert_eq!(map.get("count"), Some(&42));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_fixed_capacity_never_grows() {
        let mut map = identity_map(3);
        for k in 0..100 {
            map.put(k, "v");
        }
        assert_eq!(map.capacity(), 3);
        assert_eq!(map.len(), 100);
        assert_eq!(map.stats().rehash_count, 0);
        map.validate().unwrap();
    }

    #[test]
    fn test_auto_grow() {
        let config = HashTableConfig::growable_preset().initial_capacity(7);
        let mut map = ChainedMap::with_config(config, IdentityHash).unwrap();
        for k in 0u64..50 {
            map.put(k, k * 10);
        }
        assert!(map.capacity() > 7);
        assert!(sizing::is_prime(map.capacity()));
        assert!(map.load_factor() <= 0.7);
        for k in 0u64..50 {
            assert_eq!(map.get(&k), Some(&(k * 10)));
        }
        map.validate().unwrap();
        assert!(map.stats().rehash_count >= 1);
    }

    #[test]
    fn test_overwrite_does_not_trigger_growth() {
        let config = HashTableConfig::default()
            .initial_capacity(2)
            .max_load_factor(0.5)
            .auto_grow(true);
        let mut map = ChainedMap::with_config(config, IdentityHash).unwrap();
        map.put(1u64, 'a');
        assert_eq!(map.capacity(), 2);
        map.put(1u64, 'b');
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get(&1), Some(&'b'));
    }

    #[test]
    fn test_manual_rehash() {
        let mut map = identity_map(7);
        for k in 0..20 {
            map.put(k, "v");
        }
        map.rehash(23).unwrap();
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.len(), 20);
        map.validate().unwrap();
        assert!(map.rehash(0).is_err());
        assert_eq!(map.capacity(), 23);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut map = identity_map(5);
        for k in 0..10 {
            map.put(k, "v");
        }
        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..10).collect::<Vec<_>>());
        assert_eq!(map.values().count(), 10);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_stats() {
        let mut map = identity_map(7);
        map.put(3, "a");
        map.put(10, "b");
        map.put(4, "c");
        let stats = map.stats();
        assert_eq!(stats.capacity, 7);
        assert_eq!(stats.len, 3);
        assert_eq!(stats.tombstones, 0);
        assert_eq!(stats.max_probe_length, 2);
        assert_eq!(stats.collisions, 1);
    }

    #[test]
    fn test_skewed_hash_still_correct() {
        let mut map = ChainedMap::with_hasher(7, |_: &u32| 0u64).unwrap();
        for k in 0..20u32 {
            map.put(k, k);
        }
        assert_eq!(map.longest_chain(), 20);
        for k in 0..20u32 {
            assert_eq!(map.get(&k), Some(&k));
        }
        map.validate().unwrap();
    }

    #[test]
    fn test_hash_table_trait() {
        let mut map = identity_map(7);
        map.put(5, "five");
        assert!(HashTable::contains(&map, &5));
        assert!(HashTable::delete(&mut map, &5));
        assert!(!HashTable::delete(&mut map, &5));
        assert!(HashTable::is_empty(&map));
    }

    #[test]
    fn test_debug_output() {
        let mut map = identity_map(2);
        map.put(1, "one");
        let debug = format!("{:?}", map);
        assert!(debug.contains("ChainedMap"));
        assert!(debug.contains("capacity: 2"));
        assert!(debug.contains("\"one\""));
    }
}
