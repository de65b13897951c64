use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    adaptive::{threshold_sampling, unconstrained_maximization},
    error::{MaximizationError, MaximizationResult, validate_cardinality, validate_unit_interval},
    oracle::{ValueOracle, best_singleton},
    sets::{ElementSet, sorted_elements},
    trajectory::Trajectory,
};

/// Tuning constants of [`adaptive_nonmonotone_maximization`].
///
/// `c1` scales the threshold grid, `c2` relaxes the cardinality handed to
/// threshold sampling, and `c3` sets how many live candidates are needed to keep
/// sampling (below `c3 * k` the leftovers go to the unconstrained cleanup).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveConstants {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl AdaptiveConstants {
    pub const fn nonmonotone() -> Self {
        AdaptiveConstants {
            c1: 1.0 / 7.0,
            c2: 1.0,
            c3: 3.0,
        }
    }

    /// With `c3 = 0` the cleanup only ever sees an empty pool.
    pub const fn monotone() -> Self {
        AdaptiveConstants {
            c1: 1.0,
            c2: 1.0,
            c3: 0.0,
        }
    }
}

impl Default for AdaptiveConstants {
    fn default() -> Self {
        AdaptiveConstants::nonmonotone()
    }
}

/// Low-adaptivity maximization for possibly non-monotone objectives.
///
/// For each threshold guess `tau_i = c1 (1 + ε/6)^i Δ* / k`, `i = 0..=r`, runs
/// [`threshold_sampling`] with budget `c2 k` on a fresh trajectory. When fewer
/// than `c3 k` candidates are left over, they are handed to
/// [`unconstrained_maximization`]; the best prefix of a random order of that
/// subset replaces the sampled solution if it scores higher. The guess with the
/// highest final value wins.
///
/// The singleton scan that yields `Δ*` is not charged to any trajectory.
pub fn adaptive_nonmonotone_maximization<O, R>(
    oracle: &O,
    k: usize,
    epsilon: f64,
    delta: f64,
    constants: AdaptiveConstants,
    rng: &mut R,
) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    validate_cardinality(oracle.num_nodes(), k)?;
    validate_unit_interval("epsilon", epsilon)?;
    validate_unit_interval("delta", delta)?;
    let AdaptiveConstants { c1, c2, c3 } = constants;
    let relaxed_k = (c2 * k as f64) as usize;
    if relaxed_k == 0 {
        return Err(MaximizationError::InvalidConfiguration(format!(
            "relaxed cardinality c2 * k = {c2} * {k} truncates to 0"
        )));
    }

    let hat_epsilon = epsilon / 6.0;
    let delta_star = best_singleton(oracle).map_or(0.0, |(_, gain)| gain);
    let num_guesses = ((k as f64).ln() * (1.0 / hat_epsilon + 0.5)).ceil() as usize;
    let hat_delta = delta / (2.0 * (num_guesses + 1) as f64);
    debug!(delta_star, hat_epsilon, num_guesses, hat_delta, "adaptive grid");

    let empty = ElementSet::default();
    let mut best: Option<Trajectory> = None;
    for i in 0..=num_guesses {
        let tau = c1 * (1.0 + hat_epsilon).powi(i as i32) * delta_star / k as f64;
        let mut trajectory = Trajectory::new();
        let outcome = threshold_sampling(
            oracle,
            &empty,
            relaxed_k,
            tau,
            hat_epsilon,
            hat_delta,
            c3,
            &mut trajectory,
            rng,
        )?;
        let mut solution = outcome.solution;

        if (outcome.remaining.len() as f64) < c3 * k as f64 {
            trajectory.advance_round();
            let leftovers = sorted_elements(&outcome.remaining);
            let unconstrained = unconstrained_maximization(
                oracle,
                &empty,
                &leftovers,
                hat_epsilon,
                hat_delta,
                &mut trajectory,
                rng,
            )?;

            let mut order = sorted_elements(&unconstrained);
            order.shuffle(rng);
            let mut prefix = ElementSet::default();
            let mut best_prefix = ElementSet::default();
            let mut prefix_value = 0.0;
            let mut best_prefix_value = 0.0;
            for &x in order.iter().take(k) {
                prefix_value += oracle.marginal_value(x, &prefix);
                prefix.insert(x);
                if prefix_value > best_prefix_value {
                    best_prefix_value = prefix_value;
                    best_prefix = prefix.clone();
                }
            }
            trajectory.record_queries(order.len().min(k));

            let sampled_value = oracle.value(&solution);
            let prefix_value = oracle.value(&best_prefix);
            trajectory.record_queries(2);
            if prefix_value > sampled_value {
                debug!(prefix_value, sampled_value, "cleanup prefix wins");
                trajectory.set_elements_added(best_prefix.iter().copied());
                trajectory.add_marginal_gain(prefix_value);
                trajectory.raise_value(prefix_value);
                solution = best_prefix;
            }
        }

        debug!(guess = i, tau, value = trajectory.final_value(), "adaptive guess");
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
        "adaptive maximization done"
    );
    Ok(best)
}
