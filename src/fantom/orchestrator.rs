use rand::Rng;
use tracing::{debug, info};

use crate::{
    error::{MaximizationResult, validate_cardinality, validate_unit_interval},
    fantom::igdt,
    oracle::{ValueOracle, best_singleton},
    trajectory::Trajectory,
};

/// Density-threshold maximization.
///
/// Guesses the density `rho = γ (1 + ε)^i` for `i = 0..=ceil(ln n / ln(1 + ε))`
/// with `γ` a fifth of the best singleton gain, runs [`igdt`] per guess on a
/// fresh trajectory, and keeps the best.
pub fn fantom<O, R>(oracle: &O, k: usize, epsilon: f64, rng: &mut R) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let n = oracle.num_nodes();
    validate_cardinality(n, k)?;
    validate_unit_interval("epsilon", epsilon)?;

    let max_marginal = best_singleton(oracle).map_or(0.0, |(_, gain)| gain);
    let gamma = max_marginal / 5.0;
    let num_guesses = ((n as f64).ln() / (1.0 + epsilon).ln()).ceil() as usize;
    debug!(gamma, num_guesses, "fantom grid");

    let mut best: Option<Trajectory> = None;
    for i in 0..=num_guesses {
        let rho = gamma * (1.0 + epsilon).powi(i as i32);
        let mut trajectory = Trajectory::new();
        let solution = igdt(oracle, rho, k, &mut trajectory, rng)?;
        debug!(
            guess = i,
            rho,
            size = solution.len(),
            value = trajectory.final_value(),
            "fantom guess"
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
        "fantom done"
    );
    Ok(best)
}
