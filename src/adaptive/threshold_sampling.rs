use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

use crate::{
    adaptive::reduced_mean,
    error::{MaximizationError, MaximizationResult},
    oracle::ValueOracle,
    sets::ElementSet,
    trajectory::Trajectory,
};

/// Result of [`threshold_sampling`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSamplingOutcome {
    /// Elements committed on top of the starting solution.
    pub solution: ElementSet,
    /// Candidates that survived the last filter and were not committed.
    pub remaining: ElementSet,
}

/// Round-limited threshold sampling on top of `old_solution`.
///
/// Every round opens a trajectory round, filters the live candidates down to
/// those gaining at least `tau`, then commits a uniformly random batch whose size
/// is the largest of `m + 1` geometrically spaced sizes that [`reduced_mean`]
/// does not reject, capped at the remaining budget. The loop stops at `|S| = k`,
/// after `r` rounds, or as soon as fewer than `c3 * k` candidates are live.
///
/// The committed gains are added to the trajectory's current value.
#[allow(clippy::too_many_arguments)]
pub fn threshold_sampling<O, R>(
    oracle: &O,
    old_solution: &ElementSet,
    k: usize,
    tau: f64,
    epsilon: f64,
    delta: f64,
    c3: f64,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> MaximizationResult<ThresholdSamplingOutcome>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let hat_epsilon = epsilon / 3.0;
    let n = oracle.num_nodes().saturating_sub(old_solution.len());
    let rounds = ((2.0 * n as f64 / delta).ln() / -(1.0 - hat_epsilon).ln()).ceil();
    let rounds = if rounds.is_finite() && rounds > 0.0 {
        rounds as usize
    } else {
        0
    };
    let num_sizes = ((k as f64).ln() * (1.0 / hat_epsilon + 0.5)).ceil().max(0.0) as usize;
    let hat_delta = delta / (2.0 * rounds as f64 * (num_sizes + 1) as f64);
    let min_live = c3 * k as f64;

    let mut live: Vec<usize> = (0..oracle.num_nodes())
        .filter(|u| !old_solution.contains(u))
        .collect();
    let mut solution = ElementSet::default();
    let mut for_queries = old_solution.clone();
    let mut value = trajectory.final_value();

    for round in 0..rounds {
        trajectory.advance_round();
        if (n as f64) < min_live {
            break;
        }

        trajectory.record_queries(live.len());
        live.retain(|&u| oracle.marginal_value(u, &for_queries) >= tau);
        trace!(round, candidates = live.len(), "threshold filter");
        if live.is_empty() || (live.len() as f64) < min_live {
            break;
        }

        let mut tested = Vec::with_capacity(num_sizes + 1);
        let mut t_star = None;
        for i in 0..=num_sizes {
            let t = ((1.0 + hat_epsilon).powi(i as i32).ceil() as usize).min(live.len());
            if tested.contains(&t) {
                continue;
            }
            tested.push(t);
            let rejected = reduced_mean(
                oracle,
                &for_queries,
                &live,
                tau,
                t,
                hat_epsilon,
                hat_delta,
                trajectory,
                rng,
            )?;
            if !rejected {
                t_star = Some(t);
            }
        }
        let Some(t_star) = t_star else {
            return Err(MaximizationError::EstimatorDegeneracy(format!(
                "no batch size accepted among {} candidates",
                live.len()
            )));
        };

        let batch_size = t_star.min(k - solution.len());
        live.shuffle(rng);
        let batch: ElementSet = live.drain(..batch_size).collect();
        live.sort_unstable();

        let gain = oracle.marginal_set_value(&batch, &for_queries);
        trajectory.record_queries(1);
        trajectory.set_elements_added(batch.iter().copied());
        trajectory.add_marginal_gain(gain);
        value += gain;
        trajectory.raise_value(value);
        trace!(round, batch_size, gain, "threshold batch committed");

        for_queries.extend(batch.iter().copied());
        solution.extend(batch);
        if solution.len() >= k {
            break;
        }
    }

    debug!(
        tau,
        size = solution.len(),
        remaining = live.len(),
        "threshold sampling done"
    );
    Ok(ThresholdSamplingOutcome {
        solution,
        remaining: live.into_iter().collect(),
    })
}
