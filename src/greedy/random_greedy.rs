use rand::Rng;
use tracing::debug;

use crate::{
    error::{MaximizationError, MaximizationResult, validate_cardinality},
    oracle::ValueOracle,
    sets::{Candidate, CandidateSet, ElementSet, RankedCandidate},
    trajectory::Trajectory,
};

/// Random greedy for non-monotone objectives.
///
/// The ground set is padded with `2k` placeholders of gain 0. Each of the `k`
/// rounds ranks every remaining candidate by marginal gain and picks uniformly
/// among the top `k` of that ranking rather than the maximum. Placeholder picks
/// consume a round without changing the solution; only real elements are
/// recorded. On equal gains real elements rank above placeholders, so a
/// placeholder enters the top `k` only when fewer than `k` real candidates have
/// a non-negative gain.
pub fn random_greedy<O, R>(oracle: &O, k: usize, rng: &mut R) -> MaximizationResult<Trajectory>
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let n = oracle.num_nodes();
    validate_cardinality(n, k)?;

    let pool: Vec<Candidate> = (0..n)
        .map(Candidate::Real)
        .chain((0..2 * k).map(Candidate::Placeholder))
        .collect();

    let mut trajectory = Trajectory::new();
    let mut chosen = CandidateSet::default();
    let mut solution = ElementSet::default();
    let mut value = 0.0;
    let mut num_queries = 0;

    while chosen.len() < k {
        trajectory.advance_round();
        let mut ranking: Vec<RankedCandidate> = Vec::with_capacity(pool.len());
        for &candidate in pool.iter().filter(|c| !chosen.contains(*c)) {
            let gain = match candidate {
                Candidate::Real(u) => {
                    num_queries += 1;
                    oracle.marginal_value(u, &solution)
                }
                Candidate::Placeholder(_) => 0.0,
            };
            ranking.push(RankedCandidate {
                gain: gain.into(),
                candidate,
            });
        }
        trajectory.record_queries(num_queries);
        num_queries = 0;

        if ranking.len() < k {
            return Err(MaximizationError::InvalidConfiguration(format!(
                "random greedy ranked {} candidates, fewer than k = {k}",
                ranking.len()
            )));
        }
        ranking.sort_unstable_by(|a, b| b.cmp(a));
        let picked = ranking[rng.random_range(0..k)];
        chosen.insert(picked.candidate);

        if let Candidate::Real(u) = picked.candidate {
            solution.insert(u);
            value += picked.gain.0;
            trajectory.set_elements_added([u]);
            trajectory.add_marginal_gain(picked.gain.0);
            trajectory.raise_value(value);
        }
    }

    debug!(
        value,
        size = solution.len(),
        queries = trajectory.total_queries(),
        "random greedy done"
    );
    trajectory.set_solution(&solution);
    Ok(trajectory)
}
