use rand::Rng;
use tracing::{debug, trace};

use crate::{
    error::{MaximizationError, MaximizationResult, validate_cardinality, validate_unit_interval},
    oracle::ValueOracle,
    sets::{Candidate, CandidateSet, ElementSet},
    trajectory::Trajectory,
};

/// Refills `pool` up to `k` candidates.
///
/// All marginals against `solution` are computed once. The margin `w` then decays
/// geometrically from `max_gain` by a factor `1 - delta` per sweep, admitting
/// every element whose marginal exceeds `(1 - delta) * w`, until the pool is full
/// or `w` drops to `delta * max_gain / k`. Any shortfall is padded with unused
/// placeholders.
///
/// # Returns
/// The margin `w` reached, and the number of oracle queries spent.
fn fill_pool<O>(
    oracle: &O,
    chosen: &CandidateSet,
    solution: &ElementSet,
    pool: &mut CandidateSet,
    k: usize,
    delta: f64,
    max_gain: f64,
) -> (f64, usize)
where
    O: ValueOracle + ?Sized,
{
    let n = oracle.num_nodes();
    let mut num_queries = 0;
    let marginals: Vec<f64> = (0..n)
        .map(|u| {
            if chosen.contains(&Candidate::Real(u)) {
                0.0
            } else {
                num_queries += 1;
                oracle.marginal_value(u, solution)
            }
        })
        .collect();

    let floor = delta * max_gain / k as f64;
    let mut w = max_gain;
    while w > floor {
        for (u, &gain) in marginals.iter().enumerate() {
            if gain > w * (1.0 - delta) {
                pool.insert(Candidate::Real(u));
                if pool.len() >= k {
                    return (w, num_queries);
                }
            }
        }
        w *= 1.0 - delta;
    }

    for placeholder in (0..2 * k).map(Candidate::Placeholder) {
        if chosen.contains(&placeholder) {
            continue;
        }
        pool.insert(placeholder);
        if pool.len() >= k {
            break;
        }
    }
    (w, num_queries)
}

fn sorted_candidates<'a, I: IntoIterator<Item = &'a Candidate>>(candidates: I) -> Vec<Candidate> {
    let mut sorted: Vec<Candidate> = candidates.into_iter().copied().collect();
    sorted.sort_unstable();
    sorted
}

/// Random lazy greedy with a decaying margin ("lazier than lazy greedy").
///
/// Maintains a pool of exactly `k` candidates whose marginals were within a
/// `1 - delta` factor of the current margin `w` when they were admitted. Each of
/// the `k` rounds draws one pool member uniformly. If its marginal, re-evaluated
/// now, still exceeds `(1 - delta) * w` it is accepted without looking at the
/// rest of the pool. Otherwise every stale member is pruned, the pool is
/// refilled, and the pick is redrawn uniformly among the newly admitted members
/// only.
///
/// # Errors
/// `InvalidConfiguration` if `k` is not in `1..=n` or `delta` is outside `(0, 1)`.
pub fn random_lazy_greedy_improved<O, R>(
    oracle: &O,
    k: usize,
    delta: f64,
    rng: &mut R,
) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let n = oracle.num_nodes();
    validate_cardinality(n, k)?;
    validate_unit_interval("delta", delta)?;

    let mut trajectory = Trajectory::new();
    let mut chosen = CandidateSet::default();
    let mut solution = ElementSet::default();
    let mut pool = CandidateSet::default();
    let mut value = 0.0;

    let empty = ElementSet::default();
    let max_gain = (0..n)
        .map(|u| oracle.marginal_value(u, &empty))
        .fold(0.0, f64::max);
    let mut num_queries = n;

    let (mut w, fill_queries) =
        fill_pool(oracle, &chosen, &solution, &mut pool, k, delta, max_gain);
    num_queries += fill_queries;

    for _ in 0..k {
        trajectory.advance_round();
        let members = sorted_candidates(&pool);
        if members.len() < k {
            return Err(MaximizationError::InvalidConfiguration(format!(
                "lazy greedy pool holds {} candidates, fewer than k = {k}",
                members.len()
            )));
        }

        let sampled = members[rng.random_range(0..k)];
        let threshold = (1.0 - delta) * w;
        let accepted = match sampled {
            Candidate::Placeholder(_) => true,
            Candidate::Real(u) => {
                num_queries += 1;
                oracle.marginal_value(u, &solution) > threshold
            }
        };

        let pick = if accepted {
            sampled
        } else {
            pool.retain(|candidate| match *candidate {
                Candidate::Real(u) => {
                    num_queries += 1;
                    oracle.marginal_value(u, &solution) > threshold
                }
                Candidate::Placeholder(_) => true,
            });
            let kept = pool.clone();
            let (refilled_w, fill_queries) =
                fill_pool(oracle, &chosen, &solution, &mut pool, k, delta, max_gain);
            w = refilled_w;
            num_queries += fill_queries;

            let admitted = sorted_candidates(pool.iter().filter(|c| !kept.contains(*c)));
            trace!(
                pruned = k - kept.len(),
                admitted = admitted.len(),
                w,
                "lazy greedy pool rebuilt"
            );
            if admitted.is_empty() {
                return Err(MaximizationError::EstimatorDegeneracy(
                    "lazy greedy refill admitted no new candidate".into(),
                ));
            }
            admitted[rng.random_range(0..admitted.len())]
        };

        chosen.insert(pick);
        if let Candidate::Real(u) = pick {
            num_queries += 1;
            let gain = oracle.marginal_value(u, &solution);
            solution.insert(u);
            value += gain;
            trajectory.set_elements_added([u]);
            trajectory.add_marginal_gain(gain);
            trajectory.raise_value(value);
        }
        trajectory.record_queries(num_queries);
        num_queries = 0;
    }

    debug!(
        value,
        size = solution.len(),
        queries = trajectory.total_queries(),
        "random lazy greedy done"
    );
    trajectory.set_solution(&solution);
    Ok(trajectory)
}
