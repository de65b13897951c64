use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::{
    error::{MaximizationError, MaximizationResult},
    oracle::ValueOracle,
    sets::ElementSet,
    trajectory::Trajectory,
};

const MAX_SUBSETS: usize = 100;

/// Number of random subsets tried: `min(100, ceil(-ln(delta) / ln(1 + 4 epsilon / 3)))`.
pub fn unconstrained_samples(epsilon: f64, delta: f64) -> usize {
    let t = (-delta.ln() / (1.0 + 4.0 * epsilon / 3.0).ln()).ceil();
    if t.is_nan() || t <= 0.0 {
        return 0;
    }
    (t as usize).min(MAX_SUBSETS)
}

/// Randomized search for the unconstrained problem restricted to `candidates`.
///
/// Draws subsets that include every candidate independently with probability ½
/// and keeps the one with the largest marginal value against `old_solution`.
/// One query per subset is charged to the current round.
pub fn unconstrained_maximization<O, R>(
    oracle: &O,
    old_solution: &ElementSet,
    candidates: &[usize],
    epsilon: f64,
    delta: f64,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> MaximizationResult<ElementSet>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let t = unconstrained_samples(epsilon, delta);
    if t == 0 {
        return Err(MaximizationError::EstimatorDegeneracy(format!(
            "unconstrained maximization draws no subsets for epsilon = {epsilon}, delta = {delta}"
        )));
    }
    let coin = Bernoulli::new(0.5)
        .map_err(|err| MaximizationError::EstimatorDegeneracy(err.to_string()))?;

    let mut best = ElementSet::default();
    let mut best_gain = f64::NEG_INFINITY;
    for _ in 0..t {
        let subset: ElementSet = candidates
            .iter()
            .copied()
            .filter(|_| coin.sample(rng))
            .collect();
        let gain = oracle.marginal_set_value(&subset, old_solution);
        if gain > best_gain {
            best_gain = gain;
            best = subset;
        }
    }
    trajectory.record_queries(t);
    Ok(best)
}
