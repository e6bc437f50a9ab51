//! Bookkeeping for the set of cells a generator is working with.
//!
//! Cells are tracked by their flat grid index. Removal swaps the last entry into the vacated slot,
//! so insertion order holds only until the first removal.

use bit_set::BitSet;
use rand::Rng;
use std::slice;

use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone, Default)]
pub struct CellSet {
    cells: Vec<usize>,
    positions: FnvHashMap<usize, usize>,
}

impl CellSet {
    pub fn with_capacity(capacity: usize) -> CellSet {
        CellSet {
            cells: Vec::with_capacity(capacity),
            positions: utils::fnv_hashmap(capacity),
        }
    }

    /// None when the memory for `capacity` cells cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> Option<CellSet> {
        let mut set = CellSet::default();
        set.cells.try_reserve_exact(capacity).ok()?;
        set.positions.try_reserve(capacity).ok()?;
        Some(set)
    }

    /// Returns false if the cell was already present.
    pub fn insert(&mut self, cell: usize) -> bool {
        if self.positions.contains_key(&cell) {
            return false;
        }
        self.positions.insert(cell, self.cells.len());
        self.cells.push(cell);
        true
    }

    /// O(1) removal by swap and pop. Returns false if the cell was absent.
    pub fn remove(&mut self, cell: usize) -> bool {
        if let Some(position) = self.positions.remove(&cell) {
            let _ = self.cells.swap_remove(position);
            if let Some(&moved) = self.cells.get(position) {
                self.positions.insert(moved, position);
            }
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        self.positions.contains_key(&cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.cells.first().cloned()
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.cells.is_empty() {
            None
        } else {
            Some(self.cells[rng.gen_range(0..self.cells.len())])
        }
    }

    pub fn iter(&self) -> slice::Iter<usize> {
        self.cells.iter()
    }
}

/// The growth points of a frontier growth maze.
///
/// A cell evicted for having no room left is never admitted again, so the frontier can only
/// shrink through exhaustion.
#[derive(Debug, Clone)]
pub struct Frontier {
    active: CellSet,
    evicted: BitSet,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Frontier {
        Frontier {
            active: CellSet::with_capacity(capacity),
            evicted: BitSet::with_capacity(capacity),
        }
    }

    /// Returns false if the cell is already active or was evicted earlier.
    pub fn insert(&mut self, cell: usize) -> bool {
        if self.evicted.contains(cell) {
            return false;
        }
        self.active.insert(cell)
    }

    pub fn evict(&mut self, cell: usize) -> bool {
        if self.active.remove(cell) {
            let _ = self.evicted.insert(cell);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        self.active.contains(cell)
    }

    #[inline]
    pub fn is_evicted(&self, cell: usize) -> bool {
        self.evicted.contains(cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.active.random(rng)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use quickcheck::quickcheck;

    use super::*;
    use crate::utils::seeded_rng;

    #[test]
    fn insert_is_idempotent() {
        let mut set = CellSet::with_capacity(4);
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(3));
    }

    #[test]
    fn removal_keeps_positions_consistent() {
        let mut set = CellSet::with_capacity(8);
        for cell in 0..5 {
            set.insert(cell);
        }
        assert!(set.remove(1));
        assert!(!set.remove(1));
        // 4 moved into the vacated slot
        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![0, 4, 2, 3]);
        assert!(set.remove(4));
        assert!(set.remove(0));
        assert_eq!(set.iter().cloned().sorted().collect::<Vec<_>>(), vec![2, 3]);
        assert!(set.contains(2) && set.contains(3));
    }

    #[test]
    fn removing_last_entry() {
        let mut set = CellSet::with_capacity(2);
        set.insert(9);
        assert!(set.remove(9));
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
    }

    #[test]
    fn random_draws_members() {
        let mut set = CellSet::with_capacity(3);
        let mut rng = seeded_rng(3);
        assert_eq!(set.random(&mut rng), None);
        set.insert(10);
        set.insert(20);
        for _ in 0..100 {
            let cell = set.random(&mut rng).unwrap();
            assert!(cell == 10 || cell == 20);
        }
    }

    #[test]
    fn evicted_cells_never_return() {
        let mut frontier = Frontier::with_capacity(4);
        assert!(frontier.insert(2));
        assert!(frontier.evict(2));
        assert!(frontier.is_evicted(2));
        assert!(!frontier.insert(2));
        assert!(!frontier.contains(2));
        assert!(frontier.is_empty());
        assert!(!frontier.evict(2));
    }

    #[test]
    fn quickcheck_cellset_matches_model() {
        // (cell, insert?) operations applied to both a CellSet and a simple Vec model
        fn p(ops: Vec<(u8, bool)>) -> bool {
            let mut set = CellSet::with_capacity(ops.len());
            let mut model: Vec<usize> = vec![];
            for (cell, is_insert) in ops {
                let cell = cell as usize;
                if is_insert {
                    let fresh = !model.contains(&cell);
                    if fresh {
                        model.push(cell);
                    }
                    if set.insert(cell) != fresh {
                        return false;
                    }
                } else {
                    let present = model.contains(&cell);
                    model.retain(|&c| c != cell);
                    if set.remove(cell) != present {
                        return false;
                    }
                }
            }
            model.sort();
            set.len() == model.len() &&
            set.iter().cloned().sorted().collect::<Vec<_>>() == model &&
            model.iter().all(|&c| set.contains(c))
        }
        quickcheck(p as fn(Vec<(u8, bool)>) -> bool)
    }
}
