//! Synthetic oracles for unit tests.

use crate::{oracle::ValueOracle, sets::ElementSet};

/// Modular function: `f(S) = Σ_{x∈S} weights[x]`.
pub struct AdditiveOracle {
    pub weights: Vec<f64>,
}

impl AdditiveOracle {
    pub fn new(weights: Vec<f64>) -> Self {
        AdditiveOracle { weights }
    }
}

impl ValueOracle for AdditiveOracle {
    fn num_nodes(&self) -> usize {
        self.weights.len()
    }

    fn value(&self, set: &ElementSet) -> f64 {
        set.iter().map(|&x| self.weights[x]).sum()
    }

    fn marginal_value(&self, element: usize, set: &ElementSet) -> f64 {
        if set.contains(&element) {
            0.0
        } else {
            self.weights[element]
        }
    }
}

/// Weighted coverage: element `x` covers `covers[x]` out of a universe with
/// per-item `item_weights`. Monotone submodular.
pub struct CoverageOracle {
    pub covers: Vec<Vec<usize>>,
    pub item_weights: Vec<f64>,
}

impl CoverageOracle {
    /// Element `i` covers items `i..i + width` of a universe of `n + width` items
    /// with unit weights.
    pub fn sliding(n: usize, width: usize) -> Self {
        CoverageOracle {
            covers: (0..n).map(|i| (i..i + width).collect()).collect(),
            item_weights: vec![1.0; n + width],
        }
    }
}

impl ValueOracle for CoverageOracle {
    fn num_nodes(&self) -> usize {
        self.covers.len()
    }

    fn value(&self, set: &ElementSet) -> f64 {
        let mut covered = vec![false; self.item_weights.len()];
        for &x in set {
            for &item in &self.covers[x] {
                covered[item] = true;
            }
        }
        covered
            .iter()
            .zip(&self.item_weights)
            .filter(|(c, _)| **c)
            .map(|(_, w)| w)
            .sum()
    }
}

/// Undirected cut of an explicit edge list. Non-monotone submodular.
pub struct CutOracle {
    pub num_nodes: usize,
    pub edges: Vec<(usize, usize, f64)>,
}

impl CutOracle {
    /// Complete graph on `n` vertices with unit weights.
    pub fn complete(n: usize) -> Self {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v, 1.0));
            }
        }
        CutOracle {
            num_nodes: n,
            edges,
        }
    }
}

impl ValueOracle for CutOracle {
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn value(&self, set: &ElementSet) -> f64 {
        self.edges
            .iter()
            .filter(|(u, v, _)| set.contains(u) != set.contains(v))
            .map(|(_, _, w)| w)
            .sum()
    }
}

/// Checks the marginal contract of `oracle` on every prefix of `order`.
pub fn assert_consistent<O: ValueOracle>(oracle: &O, order: &[usize]) {
    let mut set = ElementSet::default();
    for &x in order {
        for probe in 0..oracle.num_nodes() {
            let mut extended = set.clone();
            extended.insert(probe);
            let expected = oracle.value(&extended) - oracle.value(&set);
            let actual = oracle.marginal_value(probe, &set);
            assert!(
                (expected - actual).abs() < 1e-9,
                "marginal of {probe} against {set:?}: expected {expected}, got {actual}"
            );
        }
        let addition: ElementSet = order.iter().copied().filter(|y| *y != x).collect();
        let mut union = set.clone();
        union.extend(addition.iter().copied());
        let expected = oracle.value(&union) - oracle.value(&set);
        let actual = oracle.marginal_set_value(&addition, &set);
        assert!(
            (expected - actual).abs() < 1e-9,
            "set marginal against {set:?}: expected {expected}, got {actual}"
        );
        set.insert(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{oracle::best_singleton, sets::element_set};

    #[test]
    fn additive_oracle_is_consistent() {
        let oracle = AdditiveOracle::new(vec![5.0, 3.0, 3.0, 1.0]);
        assert_eq!(oracle.value(&ElementSet::default()), 0.0);
        assert_consistent(&oracle, &[2, 0, 3, 1]);
    }

    #[test]
    fn coverage_oracle_is_consistent() {
        let oracle = CoverageOracle::sliding(6, 3);
        assert_eq!(oracle.value(&element_set([0, 1])), 4.0);
        assert_consistent(&oracle, &[0, 4, 1]);
    }

    #[test]
    fn cut_oracle_is_consistent_and_non_monotone() {
        let oracle = CutOracle::complete(4);
        assert_eq!(oracle.value(&element_set([0, 1])), 4.0);
        assert_eq!(oracle.value(&element_set([0, 1, 2, 3])), 0.0);
        assert_consistent(&oracle, &[3, 1, 0, 2]);
    }

    #[test]
    fn queries_are_idempotent() {
        let oracle = CoverageOracle::sliding(8, 2);
        let set = element_set([1, 5]);
        let first = (oracle.value(&set), oracle.marginal_value(2, &set));
        let second = (oracle.value(&set), oracle.marginal_value(2, &set));
        assert_eq!(first, second);
    }

    #[test]
    fn best_singleton_keeps_lowest_index_on_ties() {
        let oracle = AdditiveOracle::new(vec![1.0, 4.0, 4.0, 2.0]);
        assert_eq!(best_singleton(&oracle), Some((1, 4.0)));
        assert_eq!(best_singleton(&AdditiveOracle::new(vec![])), None);
    }
}
