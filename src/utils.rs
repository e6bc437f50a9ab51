use fnv::FnvHasher;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set with the specified capacity. The hashing algorithm is much faster than the default
/// on short keys such as integers and small strings.
/// On large keys it is actually slower.
/// Note it is less robust against security attacks on key collisions.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Construct a hash map with the specified capacity. See `fnv_hashset` for the hashing trade offs.
/// Cell indices are small integer keys, the best case for FNV.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}

/// A fast, non-cryptographic generator seeded from the operating system.
pub fn weak_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// A fast generator that replays the same maze for the same seed.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn seeded_rngs_repeat() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);
        let xs: Vec<u32> = (0..16).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn fnv_collections_start_empty() {
        let set: FnvHashSet<usize> = fnv_hashset(8);
        let map: FnvHashMap<usize, usize> = fnv_hashmap(8);
        assert!(set.is_empty());
        assert!(map.is_empty());
        assert!(map.capacity() >= 8);
    }
}
