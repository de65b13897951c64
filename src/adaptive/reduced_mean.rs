use rand::{Rng, seq::SliceRandom};

use crate::{
    error::{MaximizationError, MaximizationResult},
    oracle::ValueOracle,
    sets::ElementSet,
    trajectory::Trajectory,
};

/// Upper bound on the number of permutations drawn by [`reduced_mean`].
pub const REDUCED_MEAN_MAX_SAMPLES: usize = 100;

/// Sample count `min(100, 16 * ceil(ln(2 / delta) / epsilon^2))`.
pub fn reduced_mean_samples(epsilon: f64, delta: f64) -> usize {
    let m = 16.0 * ((2.0 / delta).ln() / epsilon.powi(2)).ceil();
    if m.is_nan() || m <= 0.0 {
        return 0;
    }
    (m as usize).min(REDUCED_MEAN_MAX_SAMPLES)
}

/// One-sided Monte-Carlo test on batch size `t`.
///
/// Each sample shuffles `candidates`, adds the first `t - 1` of them to a scratch
/// copy of `solution`, and checks whether the `t`-th still gains at least `tau`.
/// Returns `true` (reject `t`) when the observed fraction of such samples is at
/// most `1 - 1.5 * epsilon`. Charges one query per sample to the current round.
///
/// # Errors
/// `EstimatorDegeneracy` when the sample count is 0, `t == 0`, or
/// `t > candidates.len()`.
#[allow(clippy::too_many_arguments)]
pub fn reduced_mean<O, R>(
    oracle: &O,
    solution: &ElementSet,
    candidates: &[usize],
    tau: f64,
    t: usize,
    epsilon: f64,
    delta: f64,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> MaximizationResult<bool>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let m = reduced_mean_samples(epsilon, delta);
    if m == 0 {
        return Err(MaximizationError::EstimatorDegeneracy(format!(
            "reduced mean sample count is 0 for epsilon = {epsilon}, delta = {delta}"
        )));
    }
    if t == 0 || t > candidates.len() {
        return Err(MaximizationError::EstimatorDegeneracy(format!(
            "reduced mean batch size t = {t} outside 1..={}",
            candidates.len()
        )));
    }

    let mut order = candidates.to_vec();
    let mut scratch = solution.clone();
    let mut above = 0;
    for _ in 0..m {
        order.shuffle(rng);
        scratch.extend(order[..t - 1].iter().copied());
        if oracle.marginal_value(order[t - 1], &scratch) >= tau {
            above += 1;
        }
        for x in &order[..t - 1] {
            scratch.remove(x);
        }
    }
    trajectory.record_queries(m);

    let mu_hat = above as f64 / m as f64;
    Ok(mu_hat <= 1.0 - 1.5 * epsilon)
}
