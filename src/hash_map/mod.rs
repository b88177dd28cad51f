//! Hash table implementations
//!
//! Two collision resolution strategies over a fixed-capacity backing array:
//! - `ChainedMap`: key-value map, each bucket an ordered chain of entries
//! - `ProbingSet`: key-only set, linear probing with tombstoned deletion
//!
//! Both take an injected [`HashFn`] and implement the [`HashTable`] contract.

mod chained_map;
mod hash_functions;
mod probing_set;
pub mod sizing;
mod table_traits;

pub use chained_map::ChainedMap;
pub use probing_set::{ProbingSet, Slot};
pub use table_traits::{HashTable, TableStats};

pub use hash_functions::{
    bucket_index, DefaultHashFn, HashFn, IdentityHash, PolynomialHash, DEFAULT_POLYNOMIAL_BASE,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<T: HashTable<u64>>(table: &mut T, insert: impl Fn(&mut T, u64)) {
        for k in [10, 17, 24, 3] {
            insert(table, k);
        }
        assert_eq!(table.len(), 4);
        assert!(table.contains(&17));
        assert!(table.delete(&10));
        assert!(!table.delete(&10));
        assert!(table.contains(&17));
        assert!(table.contains(&24));
        assert!(!table.contains(&10));
        assert_eq!(table.len(), 3);
        table.validate().unwrap();
    }

    #[test]
    fn test_module_exports() {
        let _map = ChainedMap::<i32, String>::new();
        let _set = ProbingSet::<i32>::new();
        let _h = DefaultHashFn::default();
        assert_eq!(PolynomialHash::default().base(), DEFAULT_POLYNOMIAL_BASE);
        assert_eq!(bucket_index(IdentityHash.hash(&10u64), 7), 3);
    }

    #[test]
    fn test_shared_contract() {
        let mut map = ChainedMap::with_hasher(7, IdentityHash).unwrap();
        exercise(&mut map, |m, k| m.put(k, ()));

        let mut set = ProbingSet::with_hasher(7, IdentityHash).unwrap();
        exercise(&mut set, |s, k| assert!(s.insert(k)));
    }

    #[test]
    fn test_stats_through_trait() {
        let mut set = ProbingSet::with_hasher(7, IdentityHash).unwrap();
        set.insert(1u64);
        let stats: TableStats = HashTable::stats(&set);
        assert_eq!(stats.len, 1);
        assert!((HashTable::load_factor(&set) - 1.0 / 7.0).abs() < f64::EPSILON);
    }
}
