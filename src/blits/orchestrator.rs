use rand::Rng;
use tracing::{debug, info};

use crate::{
    blits::{SievePass, sieve},
    error::{MaximizationError, MaximizationResult, validate_cardinality, validate_unit_interval},
    oracle::{ValueOracle, best_singleton},
    sets::ElementSet,
    trajectory::Trajectory,
};

/// Sieve-based low-adaptivity maximization.
///
/// `epsilon` is halved, then OPT is guessed as `Δ* (1 + ε)^j` for
/// `j = 0..=ceil(ln k / ln(1 + ε))`, where `Δ*` is the best singleton gain.
/// Each guess runs `rounds` sieve passes accumulating into one solution on a
/// fresh trajectory; the guess with the highest final value wins.
///
/// # Errors
/// `InvalidConfiguration` for an invalid `k` or `epsilon`, `rounds == 0`, or
/// `k / rounds == 0`.
pub fn blits<O, R>(
    oracle: &O,
    k: usize,
    rounds: usize,
    epsilon: f64,
    rng: &mut R,
) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    validate_cardinality(oracle.num_nodes(), k)?;
    validate_unit_interval("epsilon", epsilon)?;
    if rounds == 0 || k / rounds == 0 {
        return Err(MaximizationError::InvalidConfiguration(format!(
            "blits needs 0 < rounds <= k, got rounds = {rounds} and k = {k}"
        )));
    }
    let epsilon = epsilon * 0.5;

    let delta_star = best_singleton(oracle).map_or(0.0, |(_, gain)| gain);
    let num_guesses = ((k as f64).ln() / (1.0 + epsilon).ln()).ceil() as usize;
    debug!(delta_star, num_guesses, rounds, "blits grid");

    let mut best: Option<Trajectory> = None;
    for j in 0..=num_guesses {
        let opt_guess = delta_star * (1.0 + epsilon).powi(j as i32);
        let mut trajectory = Trajectory::new();
        let mut solution = ElementSet::default();
        let mut value = 0.0;
        for round in 1..=rounds {
            let pass = SievePass {
                k,
                round,
                rounds,
                epsilon,
                opt_guess,
            };
            let outcome = sieve(oracle, &solution, value, pass, &mut trajectory, rng);
            solution.extend(outcome.selected);
            value += outcome.gain;
        }
        debug!(
            guess = j,
            opt_guess,
            size = solution.len(),
            value = trajectory.final_value(),
            "blits guess"
        );

        trajectory.set_solution(&solution);
        if best
            .as_ref()
            .is_none_or(|b| trajectory.final_value() > b.final_value())
        {
            best = Some(trajectory);
        }
    }

    let best = best.unwrap_or_default();
    info!(
        value = best.final_value(),
        rounds = best.num_rounds(),
        queries = best.total_queries(),
        "blits done"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::{AdditiveOracle, CoverageOracle, CutOracle};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_rejects_too_many_rounds() {
        let oracle = AdditiveOracle::new(vec![1.0; 10]);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            blits(&oracle, 3, 4, 0.25, &mut rng),
            Err(MaximizationError::InvalidConfiguration(_))
        ));
        assert!(blits(&oracle, 3, 0, 0.25, &mut rng).is_err());
        assert!(blits(&oracle, 3, 1, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_solution_size_bounded_by_k() {
        let oracle = CoverageOracle::sliding(24, 3);
        let mut rng = StdRng::seed_from_u64(1);
        let trajectory = blits(&oracle, 6, 3, 0.25, &mut rng).unwrap();
        assert!(trajectory.solution().len() <= 6);
        assert!(trajectory.final_value() > 0.0);
        assert!(trajectory.num_rounds() >= 3);
    }

    #[test]
    fn test_trajectory_is_monotone_on_cut() {
        let oracle = CutOracle::complete(16);
        let mut rng = StdRng::seed_from_u64(2);
        let trajectory = blits(&oracle, 8, 2, 0.25, &mut rng).unwrap();
        for pair in trajectory.rounds().windows(2) {
            assert!(pair[1].cumulative_function_value >= pair[0].cumulative_function_value);
            assert!(pair[1].cumulative_query_count > pair[0].cumulative_query_count);
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let oracle = CoverageOracle::sliding(20, 3);
        let a = blits(&oracle, 4, 2, 0.25, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = blits(&oracle, 4, 2, 0.25, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }
}
