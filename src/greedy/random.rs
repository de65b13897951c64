use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    error::{MaximizationResult, validate_cardinality},
    oracle::ValueOracle,
    sets::{ElementSet, TotalF64},
    trajectory::Trajectory,
};

/// Number of independent random permutations drawn by [`random`].
pub const RANDOM_SAMPLES: usize = 25;

/// Random baseline.
///
/// Draws [`RANDOM_SAMPLES`] random permutations of the ground set. With `prefix`
/// set, each permutation is scanned with marginal queries and its best-valued
/// prefix of length at most `k` is kept; otherwise its first `min(n, k)` elements
/// are taken and valued with a single query. The sample of median value is
/// reported as a single round, which makes the baseline robust to a lucky or
/// unlucky outlier draw. The round is charged the average number of queries per
/// sample.
pub fn random<O, R>(oracle: &O, k: usize, prefix: bool, rng: &mut R) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let n = oracle.num_nodes();
    validate_cardinality(n, k)?;

    let mut elements: Vec<usize> = (0..n).collect();
    let mut samples: Vec<(TotalF64, ElementSet)> = Vec::with_capacity(RANDOM_SAMPLES);
    let mut num_queries = 0;

    for _ in 0..RANDOM_SAMPLES {
        elements.shuffle(rng);
        let mut best_value = 0.0;
        let mut best_set = ElementSet::default();

        if prefix {
            let mut current = ElementSet::default();
            let mut current_value = 0.0;
            for &x in &elements {
                current_value += oracle.marginal_value(x, &current);
                num_queries += 1;
                current.insert(x);
                if current_value > best_value {
                    best_value = current_value;
                    best_set = current.clone();
                }
                if current.len() >= k {
                    break;
                }
            }
        } else {
            best_set = elements.iter().take(k).copied().collect();
            best_value = oracle.value(&best_set);
            num_queries += 1;
        }

        samples.push((best_value.into(), best_set));
    }

    samples.sort_by(|a, b| a.0.cmp(&b.0));
    let (TotalF64(median_value), median_set) = samples.swap_remove(RANDOM_SAMPLES / 2);
    debug!(
        prefix,
        value = median_value,
        size = median_set.len(),
        "random baseline"
    );

    let mut trajectory = Trajectory::new();
    trajectory.advance_round();
    trajectory.set_elements_added(median_set.iter().copied());
    trajectory.add_marginal_gain(median_value);
    trajectory.raise_value(median_value);
    trajectory.record_queries(num_queries / RANDOM_SAMPLES);
    trajectory.set_solution(&median_set);
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::{AdditiveOracle, CoverageOracle};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_single_round_of_size_at_most_k() {
        let oracle = CoverageOracle::sliding(20, 3);
        let mut rng = StdRng::seed_from_u64(1);
        for prefix in [true, false] {
            let trajectory = random(&oracle, 5, prefix, &mut rng).unwrap();
            assert_eq!(trajectory.num_rounds(), 1);
            assert!(trajectory.solution().len() <= 5);
            assert!(trajectory.total_queries() >= 1);
        }
    }

    #[test]
    fn test_without_prefix_takes_exactly_k() {
        let oracle = AdditiveOracle::new(vec![1.0; 12]);
        let mut rng = StdRng::seed_from_u64(2);
        let trajectory = random(&oracle, 4, false, &mut rng).unwrap();
        assert_eq!(trajectory.solution().len(), 4);
        assert_eq!(trajectory.final_value(), 4.0);
        assert_eq!(trajectory.total_queries(), 1);
    }

    #[test]
    fn test_prefix_value_matches_solution() {
        let oracle = CoverageOracle::sliding(15, 4);
        let mut rng = StdRng::seed_from_u64(3);
        let trajectory = random(&oracle, 6, true, &mut rng).unwrap();
        let solution: ElementSet = trajectory.solution().iter().copied().collect();
        assert_eq!(trajectory.final_value(), oracle.value(&solution));
    }

    #[test]
    fn test_reports_median_sample() {
        // every sample of a constant function has the same value
        let oracle = AdditiveOracle::new(vec![2.0; 10]);
        let mut rng = StdRng::seed_from_u64(4);
        let trajectory = random(&oracle, 3, true, &mut rng).unwrap();
        assert_eq!(trajectory.final_value(), 6.0);
    }

    #[test]
    fn test_rejects_invalid_k() {
        let oracle = AdditiveOracle::new(vec![1.0; 3]);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(random(&oracle, 0, true, &mut rng).is_err());
        assert!(random(&oracle, 4, true, &mut rng).is_err());
    }

    #[test]
    fn test_reproducible_with_seed() {
        let oracle = CoverageOracle::sliding(30, 3);
        let a = random(&oracle, 5, true, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = random(&oracle, 5, true, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
