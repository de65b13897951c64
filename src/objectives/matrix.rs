use crate::sets::ElementSet;

/// Trade-off between coverage and diversity in the recommendation objective.
pub const RECOMMENDATION_LAMBDA: f64 = 0.95;

/// Dense row-major `n × n` similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    entries: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn zeros(size: usize) -> Self {
        SimilarityMatrix {
            size,
            entries: vec![0.0; size * size],
        }
    }

    /// Wraps row-major `entries`; returns `None` unless there are `size²` of them.
    pub fn from_entries(size: usize, entries: Vec<f64>) -> Option<Self> {
        (entries.len() == size * size).then_some(SimilarityMatrix { size, entries })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i * self.size + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.entries[i * self.size + j] = value;
    }

    fn best_similarity(&self, row: usize, set: &ElementSet) -> f64 {
        set.iter().map(|&j| self.get(row, j)).fold(0.0, f64::max)
    }

    /// `Σ_{i∈S} Σ_{j∈T} (A[i][j] + A[j][i]) + Σ_{i,j∈T} A[i][j]` for disjoint `S`, `T`.
    fn diversity_increase(&self, addition: &[usize], set: &ElementSet) -> f64 {
        let mut total = 0.0;
        for &j in addition {
            for &i in set {
                total += self.get(i, j) + self.get(j, i);
            }
            for &i in addition {
                total += self.get(j, i);
            }
        }
        total
    }

    fn diversity(&self, set: &ElementSet) -> f64 {
        set.iter()
            .flat_map(|&i| set.iter().map(move |&j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .sum()
    }

    /// Coverage minus a diversity penalty:
    /// `Σ_i max_{j∈S} A[i][j] - (1/n) Σ_{i,j∈S} A[i][j]`.
    pub fn summarization_value(&self, set: &ElementSet) -> f64 {
        if set.is_empty() {
            return 0.0;
        }
        let coverage: f64 = (0..self.size).map(|i| self.best_similarity(i, set)).sum();
        coverage - self.diversity(set) / self.size as f64
    }

    pub fn summarization_set_marginal(&self, addition: &ElementSet, set: &ElementSet) -> f64 {
        let fresh: Vec<usize> = addition.iter().copied().filter(|x| !set.contains(x)).collect();
        if fresh.is_empty() {
            return 0.0;
        }
        let coverage: f64 = (0..self.size)
            .map(|i| {
                let before = self.best_similarity(i, set);
                let after = fresh.iter().map(|&j| self.get(i, j)).fold(before, f64::max);
                after - before
            })
            .sum();
        coverage - self.diversity_increase(&fresh, set) / self.size as f64
    }

    /// Column mass minus a diversity penalty:
    /// `Σ_i Σ_{j∈S} A[i][j] - λ Σ_{i,j∈S} A[i][j]`.
    pub fn recommendation_value(&self, set: &ElementSet) -> f64 {
        let coverage: f64 = set.iter().map(|&j| self.column_sum(j)).sum();
        coverage - RECOMMENDATION_LAMBDA * self.diversity(set)
    }

    pub fn recommendation_set_marginal(&self, addition: &ElementSet, set: &ElementSet) -> f64 {
        let fresh: Vec<usize> = addition.iter().copied().filter(|x| !set.contains(x)).collect();
        let coverage: f64 = fresh.iter().map(|&j| self.column_sum(j)).sum();
        coverage - RECOMMENDATION_LAMBDA * self.diversity_increase(&fresh, set)
    }

    fn column_sum(&self, column: usize) -> f64 {
        (0..self.size).map(|i| self.get(i, column)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::element_set;

    fn sample() -> SimilarityMatrix {
        let entries = vec![
            1.0, 0.5, 0.0, //
            0.5, 1.0, 0.2, //
            0.0, 0.2, 1.0,
        ];
        SimilarityMatrix::from_entries(3, entries).unwrap()
    }

    #[test]
    fn test_from_entries_checks_shape() {
        assert!(SimilarityMatrix::from_entries(2, vec![0.0; 3]).is_none());
        let mut matrix = SimilarityMatrix::zeros(2);
        matrix.set(1, 0, 3.0);
        assert_eq!(matrix.get(1, 0), 3.0);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_summarization_value() {
        let matrix = sample();
        assert_eq!(matrix.summarization_value(&ElementSet::default()), 0.0);
        // coverage 1 + 0.5 + 0 minus diversity 1/3
        let value = matrix.summarization_value(&element_set([0]));
        assert!((value - (1.5 - 1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_set_marginals_match_differences() {
        let matrix = sample();
        let set = element_set([1]);
        let addition = element_set([0, 1, 2]);
        let union = element_set([0, 1, 2]);

        let expected = matrix.summarization_value(&union) - matrix.summarization_value(&set);
        assert!((matrix.summarization_set_marginal(&addition, &set) - expected).abs() < 1e-12);

        let expected = matrix.recommendation_value(&union) - matrix.recommendation_value(&set);
        assert!((matrix.recommendation_set_marginal(&addition, &set) - expected).abs() < 1e-12);
    }
}
