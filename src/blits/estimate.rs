use rand::{Rng, seq::index};

use crate::{oracle::ValueOracle, sets::ElementSet, trajectory::Trajectory};

/// Monte-Carlo samples per estimate.
pub const ESTIMATE_SAMPLES: usize = 100;

/// Expected marginal gain of `a` once a random `min(k / r, |X|)` subset of
/// `pool` has joined `solution`.
///
/// Returns 0 without querying when `a` is already in `solution`.
pub fn delta_estimate<O, R>(
    oracle: &O,
    a: usize,
    solution: &ElementSet,
    pool: &[usize],
    batch_size: usize,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> f64
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    if solution.contains(&a) {
        return 0.0;
    }
    let amount = batch_size.min(pool.len());
    let mut scratch = solution.clone();
    let mut total = 0.0;
    for _ in 0..ESTIMATE_SAMPLES {
        let picks = index::sample(rng, pool.len(), amount);
        scratch.extend(picks.iter().map(|i| pool[i]));
        scratch.remove(&a);
        total += oracle.marginal_value(a, &scratch);
        for i in picks.iter() {
            if !solution.contains(&pool[i]) {
                scratch.remove(&pool[i]);
            }
        }
    }
    trajectory.record_queries(ESTIMATE_SAMPLES);
    total / ESTIMATE_SAMPLES as f64
}

/// Expected gain of adding a random `k / r` subset of `pool`, keeping only the
/// members of `positive`.
pub fn function_estimate<O, R>(
    oracle: &O,
    solution: &ElementSet,
    pool: &[usize],
    positive: &ElementSet,
    batch_size: usize,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> f64
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let amount = batch_size.min(pool.len());
    let mut total = 0.0;
    for _ in 0..ESTIMATE_SAMPLES {
        let subset: ElementSet = index::sample(rng, pool.len(), amount)
            .iter()
            .map(|i| pool[i])
            .filter(|x| positive.contains(x))
            .collect();
        total += oracle.marginal_set_value(&subset, solution);
    }
    trajectory.record_queries(ESTIMATE_SAMPLES);
    total / ESTIMATE_SAMPLES as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        oracle::testing::{AdditiveOracle, CoverageOracle},
        sets::element_set,
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn open_trajectory() -> Trajectory {
        let mut trajectory = Trajectory::new();
        trajectory.advance_round();
        trajectory
    }

    #[test]
    fn test_delta_of_member_is_free() {
        let oracle = AdditiveOracle::new(vec![2.0; 6]);
        let mut trajectory = open_trajectory();
        let mut rng = StdRng::seed_from_u64(0);
        let estimate = delta_estimate(
            &oracle,
            1,
            &element_set([1]),
            &[0, 2, 3],
            2,
            &mut trajectory,
            &mut rng,
        );
        assert_eq!(estimate, 0.0);
        assert_eq!(trajectory.total_queries(), 0);
    }

    #[test]
    fn test_delta_of_additive_is_its_weight() {
        let oracle = AdditiveOracle::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut trajectory = open_trajectory();
        let mut rng = StdRng::seed_from_u64(1);
        // `a` itself is in the pool; sampling it must not hide its gain
        let estimate = delta_estimate(
            &oracle,
            4,
            &ElementSet::default(),
            &[0, 1, 2, 3, 4],
            3,
            &mut trajectory,
            &mut rng,
        );
        assert_eq!(estimate, 5.0);
        assert_eq!(trajectory.total_queries(), ESTIMATE_SAMPLES);
    }

    #[test]
    fn test_delta_sees_overlap() {
        // every element covers 4 items and overlaps its neighbours
        let oracle = CoverageOracle::sliding(6, 4);
        let mut trajectory = open_trajectory();
        let mut rng = StdRng::seed_from_u64(2);
        let estimate = delta_estimate(
            &oracle,
            0,
            &ElementSet::default(),
            &[1, 2, 3, 4, 5],
            5,
            &mut trajectory,
            &mut rng,
        );
        // with 1..=5 all present only item 0 is new
        assert_eq!(estimate, 1.0);
    }

    #[test]
    fn test_function_estimate_ignores_non_positive() {
        let oracle = AdditiveOracle::new(vec![1.0; 4]);
        let mut trajectory = open_trajectory();
        let mut rng = StdRng::seed_from_u64(3);
        let estimate = function_estimate(
            &oracle,
            &ElementSet::default(),
            &[0, 1, 2, 3],
            &ElementSet::default(),
            2,
            &mut trajectory,
            &mut rng,
        );
        assert_eq!(estimate, 0.0);

        let estimate = function_estimate(
            &oracle,
            &ElementSet::default(),
            &[0, 1, 2, 3],
            &element_set([0, 1, 2, 3]),
            2,
            &mut trajectory,
            &mut rng,
        );
        assert_eq!(estimate, 2.0);
        assert_eq!(trajectory.total_queries(), 2 * ESTIMATE_SAMPLES);
    }
}
