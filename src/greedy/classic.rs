use rand::Rng;
use tracing::{debug, trace};

use crate::{
    error::{MaximizationError, MaximizationResult, validate_cardinality},
    oracle::ValueOracle,
    sets::ElementSet,
    trajectory::Trajectory,
};

/// Classic sequential greedy.
///
/// Each round scans every element outside the solution and adds one of maximum
/// marginal gain, breaking ties uniformly at random among all maximizers. Runs
/// for exactly `k` rounds.
///
/// # Errors
/// `InvalidConfiguration` if `k` is not in `1..=n`, or if a round finds no
/// candidate at all while the solution is still short of `k` elements.
pub fn greedy<O, R>(oracle: &O, k: usize, rng: &mut R) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let n = oracle.num_nodes();
    validate_cardinality(n, k)?;

    let mut trajectory = Trajectory::new();
    let mut solution = ElementSet::default();
    let mut value = 0.0;
    let mut maximizers = Vec::new();

    while solution.len() < k {
        trajectory.advance_round();
        maximizers.clear();
        let mut max_gain = f64::NEG_INFINITY;
        let mut num_queries = 0;

        for u in (0..n).filter(|u| !solution.contains(u)) {
            num_queries += 1;
            let gain = oracle.marginal_value(u, &solution);
            if gain > max_gain {
                max_gain = gain;
                maximizers.clear();
            }
            if gain == max_gain {
                maximizers.push(u);
            }
        }
        trajectory.record_queries(num_queries);

        if maximizers.is_empty() {
            return Err(MaximizationError::InvalidConfiguration(format!(
                "greedy found no candidate with |S| = {} < k = {k}",
                solution.len()
            )));
        }
        let chosen = maximizers[rng.random_range(0..maximizers.len())];
        trace!(chosen, gain = max_gain, ties = maximizers.len(), "greedy pick");

        solution.insert(chosen);
        value += max_gain;
        trajectory.set_elements_added([chosen]);
        trajectory.add_marginal_gain(max_gain);
        trajectory.raise_value(value);
    }

    debug!(value, queries = trajectory.total_queries(), "greedy done");
    trajectory.set_solution(&solution);
    Ok(trajectory)
}
