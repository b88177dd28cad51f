//! Capacity sizing for rehashing
//!
//! Tables grow to roughly double their capacity, rounded up to a prime. A
//! prime modulus keeps `hash mod capacity` from discarding high bits the way
//! a power of two would.

/// Primes roughly doubling from one to the next
const PRIMES: &[usize] = &[
    7, 17, 37, 79, 163, 331, 673, 1361, 2729, 5471, 10949, 21911, 43853, 87719,
    175447, 350899, 701819, 1403641, 2807303, 5614657, 11229331, 22458671,
    44917381, 89834777, 179669557, 359339171, 718678369, 1437356741,
];

/// Default load factor that triggers growth
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Check primality by trial division
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime greater than or equal to `n`
pub fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Capacity to rehash into when a table of `capacity` slots grows
pub fn grown_capacity(capacity: usize) -> usize {
    let target = capacity.saturating_mul(2).max(PRIMES[0]);
    match PRIMES.iter().find(|&&p| p >= target) {
        Some(&prime) => prime,
        None => next_prime(target),
    }
}

/// Ratio of stored keys to capacity
#[inline]
pub fn load_factor(len: usize, capacity: usize) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        len as f64 / capacity as f64
    }
}

/// Whether holding `occupied` entries in `capacity` slots exceeds `max_load_factor`
#[inline]
pub fn exceeds_load_factor(occupied: usize, capacity: usize, max_load_factor: f64) -> bool {
    load_factor(occupied, capacity) > max_load_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
        for n in 0..40 {
            assert_eq!(is_prime(n), primes.contains(&n), "n = {}", n);
        }
        assert!(is_prime(1437356741));
    }

    #[test]
    fn test_prime_table_is_prime() {
        for &p in PRIMES {
            assert!(is_prime(p), "{} in table is not prime", p);
        }
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(14), 17);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(100), 101);
        for n in 0..2000 {
            let p = next_prime(n);
            assert!(p >= n);
            assert!(is_prime(p));
            assert!(!(n..p).any(is_prime));
        }
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(1), 7);
        assert_eq!(grown_capacity(7), 17);
        assert_eq!(grown_capacity(17), 37);
        for cap in [5, 11, 23, 100, 1000] {
            let grown = grown_capacity(cap);
            assert!(grown >= cap * 2);
            assert!(is_prime(grown));
        }
    }

    #[test]
    fn test_load_factor() {
        assert_eq!(load_factor(0, 0), 0.0);
        assert_eq!(load_factor(7, 7), 1.0);
        assert!((load_factor(5, 7) - 0.714).abs() < 0.001);
        assert!(exceeds_load_factor(5, 7, DEFAULT_MAX_LOAD_FACTOR));
        assert!(!exceeds_load_factor(4, 7, DEFAULT_MAX_LOAD_FACTOR));
    }
}
