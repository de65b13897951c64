use std::hash::{BuildHasherDefault, Hasher};

use hashbrown::HashSet;

const SEED: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// Multiplicative hasher for small integer keys.
///
/// Unlike the default `hashbrown` hasher, this one carries no per-process random
/// state: two sets that see the same sequence of insertions iterate in the same
/// order. Every algorithm in this crate shuffles or samples from set contents, so
/// this is what makes a seeded run reproducible end to end.
#[derive(Default, Clone, Copy)]
pub struct ElementHasher {
    hash: u64,
}

impl ElementHasher {
    #[inline]
    fn add_to_hash(&mut self, word: u64) {
        self.hash = (self.hash.rotate_left(5) ^ word).wrapping_mul(SEED);
    }
}

impl Hasher for ElementHasher {
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.add_to_hash(u64::from_le_bytes(word));
        }
    }

    fn write_usize(&mut self, i: usize) {
        self.add_to_hash(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.add_to_hash(i);
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

pub type ElementBuildHasher = BuildHasherDefault<ElementHasher>;

/// A set of ground-set elements, identified by their index in `0..n`.
pub type ElementSet = HashSet<usize, ElementBuildHasher>;

/// Collects the given elements into a fresh [`ElementSet`].
pub fn element_set<I: IntoIterator<Item = usize>>(elements: I) -> ElementSet {
    elements.into_iter().collect()
}

/// Returns the contents of `set` in ascending order. Used wherever a set leaves
/// the algorithms (trajectories, logs) so that output does not depend on hashing.
pub fn sorted_elements(set: &ElementSet) -> Vec<usize> {
    let mut elements: Vec<usize> = set.iter().copied().collect();
    elements.sort_unstable();
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher;

    #[test]
    fn hasher_is_deterministic_across_instances() {
        let builder = ElementBuildHasher::default();
        assert_eq!(builder.hash_one(42usize), builder.hash_one(42usize));
        assert_eq!(
            ElementBuildHasher::default().hash_one(7usize),
            ElementBuildHasher::default().hash_one(7usize)
        );
    }

    #[test]
    fn hasher_separates_neighbouring_keys() {
        let builder = ElementBuildHasher::default();
        assert_ne!(builder.hash_one(1usize), builder.hash_one(2usize));
    }

    #[test]
    fn write_bytes_matches_on_equal_input() {
        let mut a = ElementHasher::default();
        let mut b = ElementHasher::default();
        a.write(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        b.write(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn identical_insertions_iterate_identically() {
        let first = element_set([9, 3, 17, 250, 4, 0, 88]);
        let second = element_set([9, 3, 17, 250, 4, 0, 88]);
        let a: Vec<_> = first.iter().copied().collect();
        let b: Vec<_> = second.iter().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn sorted_elements_orders_contents() {
        let set = element_set([5, 1, 3]);
        assert_eq!(sorted_elements(&set), vec![1, 3, 5]);
        assert!(sorted_elements(&ElementSet::default()).is_empty());
    }
}
