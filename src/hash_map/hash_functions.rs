//! Hash functions injected into the tables
//!
//! The tables never hash keys themselves. They call a [`HashFn`] and reduce
//! its output modulo their capacity. Any deterministic function works; a
//! skewed one lengthens chains and probe runs but never breaks lookups.
//!
//! # Usage
//!
//! ```rust
//! use hashtab::hash_map::{HashFn, IdentityHash, PolynomialHash, bucket_index};
//!
//! // hash(x) = x, so with 7 slots key 10 starts at slot 3
//! assert_eq!(bucket_index(IdentityHash.hash(&10u64), 7), 3);
//!
//! // weighted byte sum with base 33
//! let h = PolynomialHash::default();
//! assert_eq!(h.hash("ab"), 97 + 98 * 33);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

/// Fixed seeds for [`DefaultHashFn`], so hashing is stable for the life of
/// the process.
const DEFAULT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Base of the weighted byte sum used by [`PolynomialHash`]
pub const DEFAULT_POLYNOMIAL_BASE: u64 = 33;

/// Maps a key to an unsigned integer.
///
/// Implementations must be pure: the same key always yields the same value.
/// Closures of type `Fn(&K) -> u64` implement this trait.
pub trait HashFn<K: ?Sized> {
    /// Hash a key
    fn hash(&self, key: &K) -> u64;
}

impl<K, F> HashFn<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Reduce a hash to an index in `0..capacity`
#[inline]
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

/// General purpose hash for any `K: Hash`, backed by AHash with fixed seeds
#[derive(Clone)]
pub struct DefaultHashFn {
    state: ahash::RandomState,
}

impl DefaultHashFn {
    /// Create a hash function with the built-in seeds
    pub fn new() -> Self {
        Self::with_seeds(DEFAULT_SEEDS)
    }

    /// Create a hash function with caller supplied seeds
    pub fn with_seeds(seeds: [u64; 4]) -> Self {
        Self {
            state: ahash::RandomState::with_seeds(seeds[0], seeds[1], seeds[2], seeds[3]),
        }
    }
}

impl Default for DefaultHashFn {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefaultHashFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHashFn").finish_non_exhaustive()
    }
}

impl<K: Hash + ?Sized> HashFn<K> for DefaultHashFn {
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        let mut hasher = self.state.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Integer keys hash to their own value.
///
/// Signed values are reinterpreted as two's complement, so the result is
/// always non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityHash;

macro_rules! impl_identity_hash {
    ($($t:ty),*) => {
        $(
            impl HashFn<$t> for IdentityHash {
                #[inline]
                fn hash(&self, key: &$t) -> u64 {
                    *key as u64
                }
            }
        )*
    };
}

impl_identity_hash!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl HashFn<char> for IdentityHash {
    #[inline]
    fn hash(&self, key: &char) -> u64 {
        *key as u64
    }
}

/// Weighted sum of the key bytes: `b[0] + b[1]*base + b[2]*base^2 + ...`,
/// wrapping on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialHash {
    base: u64,
}

impl PolynomialHash {
    /// Create a polynomial hash with the given base
    pub fn new(base: u64) -> Self {
        Self { base }
    }

    /// The multiplier applied per byte position
    pub fn base(&self) -> u64 {
        self.base
    }
}

impl Default for PolynomialHash {
    fn default() -> Self {
        Self::new(DEFAULT_POLYNOMIAL_BASE)
    }
}

impl<K: AsRef<[u8]> + ?Sized> HashFn<K> for PolynomialHash {
    fn hash(&self, key: &K) -> u64 {
        let mut sum = 0u64;
        let mut weight = 1u64;
        for &byte in key.as_ref() {
            sum = sum.wrapping_add((byte as u64).wrapping_mul(weight));
            weight = weight.wrapping_mul(self.base);
        }
        sum
    }
}
