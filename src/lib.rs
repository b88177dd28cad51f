//! # hashtab: Fixed-Capacity Hash Tables
//!
//! This crate provides a generic hash table engine with two collision
//! resolution strategies over a fixed-capacity backing array.
//!
//! ## Key Features
//!
//! - **Separate chaining**: [`ChainedMap`] stores key-value pairs in ordered per-bucket chains
//! - **Linear probing**: [`ProbingSet`] stores keys in a flat slot array with tombstoned deletion
//! - **Injected hashing**: any [`HashFn`], including closures, selects the bucket or slot
//! - **Optional growth**: rehash into a larger prime capacity past a configurable load factor
//! - **Invariant checks**: every table can validate its own structure
//!
//! ## Quick Start
//!
//! ```rust
//! use hashtab::{ChainedMap, IdentityHash, ProbingSet};
//!
//! // Key-value map with separate chaining
//! let mut map = ChainedMap::new();
//! map.put("name", "frodo");
//! map.put("name", "gandalf");
//! assert_eq!(map.get("name"), Some(&"gandalf"));
//! map.delete("name");
//! assert_eq!(map.get("name"), None);
//!
//! // Membership set with linear probing, hash(x) = x
//! let mut set = ProbingSet::with_hasher(7, IdentityHash).unwrap();
//! assert!(set.insert(10u64));
//! assert!(set.insert(17));
//! assert!(!set.insert(17));
//! assert!(set.remove(&10));
//! assert!(set.search(&17));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod hash_map;

// Re-export core types
pub use config::{Config, HashTableConfig};
pub use error::{HashTableError, Result};
pub use hash_map::{
    ChainedMap, DefaultHashFn, HashFn, HashTable, IdentityHash, PolynomialHash, ProbingSet, Slot,
    TableStats,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing hashtab v{}", VERSION);
}
