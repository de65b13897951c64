use rand::{Rng, seq::index};
use tracing::{debug, trace};

use crate::{
    blits::{delta_estimate, function_estimate},
    oracle::ValueOracle,
    sets::{Candidate, ElementSet, real_elements},
    trajectory::Trajectory,
};

/// How a [`sieve`] pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SieveExit {
    /// The estimated batch gain cleared the threshold inside the loop.
    Committed,
    /// The pool shrank to at most `k` candidates.
    Exhausted,
    /// A filtering step left the pool unchanged. The pass falls back to the
    /// padded terminal selection instead of looping forever.
    NonProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SieveOutcome {
    /// Real elements selected by this pass, disjoint from the input solution.
    pub selected: ElementSet,
    /// Marginal value of `selected` against the input solution.
    pub gain: f64,
    pub exit: SieveExit,
}

/// Parameters of one sieve pass, fixed by the enclosing guess.
#[derive(Debug, Clone, Copy)]
pub struct SievePass {
    pub k: usize,
    /// 1-based index of this pass among `rounds`.
    pub round: usize,
    pub rounds: usize,
    pub epsilon: f64,
    pub opt_guess: f64,
}

impl SievePass {
    fn batch_size(&self) -> usize {
        self.k / self.rounds
    }

    /// Target gain of this pass given the value accumulated so far.
    pub fn threshold(&self, current_value: f64) -> f64 {
        let decay = (1.0 - 1.0 / self.rounds as f64).powi(self.round as i32 - 1);
        (1.0 - self.epsilon / 2.0) / 2.0
            * (decay * (1.0 - self.epsilon / 2.0) * self.opt_guess - current_value)
    }
}

/// Elements of `pool` whose estimated marginal is non-negative.
fn positive_part<O, R>(
    oracle: &O,
    solution: &ElementSet,
    pool: &[usize],
    batch_size: usize,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> ElementSet
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    pool.iter()
        .copied()
        .filter(|&a| delta_estimate(oracle, a, solution, pool, batch_size, trajectory, rng) >= 0.0)
        .collect()
}

/// Commits the selection to the trajectory's current round.
fn commit<O: ValueOracle + ?Sized>(
    oracle: &O,
    solution: &ElementSet,
    current_value: f64,
    selected: ElementSet,
    exit: SieveExit,
    trajectory: &mut Trajectory,
) -> SieveOutcome {
    let gain = oracle.marginal_set_value(&selected, solution);
    trajectory.record_queries(1);
    trajectory.set_elements_added(selected.iter().copied());
    trajectory.add_marginal_gain(gain);
    trajectory.raise_value(current_value + gain);
    trace!(size = selected.len(), gain, ?exit, "sieve commit");
    SieveOutcome {
        selected,
        gain,
        exit,
    }
}

/// One sieve pass on top of `solution`, whose value is `current_value`.
///
/// While more than `k` candidates remain, each iteration opens a round, splits
/// off the candidates with non-negative estimated marginal (`X⁺`), and commits a
/// random `k / r` batch of `X⁺` when its estimated gain reaches `t / r`.
/// Otherwise the pool keeps only the candidates whose estimated marginal reaches
/// `(1 + ε/4) t / k`. Once the pool is small, or a filter changes nothing, a
/// final round pads the pool to `k` with placeholders and commits the real
/// `X⁺` members of a random `k / r` draw.
pub fn sieve<O, R>(
    oracle: &O,
    solution: &ElementSet,
    current_value: f64,
    pass: SievePass,
    trajectory: &mut Trajectory,
    rng: &mut R,
) -> SieveOutcome
where
    O: ValueOracle + ?Sized,
    R: Rng + ?Sized,
{
    let k = pass.k;
    let batch_size = pass.batch_size();
    let t = pass.threshold(current_value);
    let mut pool: Vec<usize> = (0..oracle.num_nodes())
        .filter(|u| !solution.contains(u))
        .collect();

    let mut exit = SieveExit::Exhausted;
    while pool.len() > k {
        trajectory.advance_round();
        let positive = positive_part(oracle, solution, &pool, batch_size, trajectory, rng);
        let estimate = function_estimate(oracle, solution, &pool, &positive, batch_size, trajectory, rng);
        if estimate >= t / pass.rounds as f64 {
            let selected: ElementSet = index::sample(rng, pool.len(), batch_size)
                .iter()
                .map(|i| pool[i])
                .filter(|x| positive.contains(x) && !solution.contains(x))
                .collect();
            return commit(oracle, solution, current_value, selected, SieveExit::Committed, trajectory);
        }

        let cutoff = (1.0 + pass.epsilon / 4.0) * t / k as f64;
        let filtered: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&a| delta_estimate(oracle, a, solution, &pool, batch_size, trajectory, rng) >= cutoff)
            .collect();
        trace!(before = pool.len(), after = filtered.len(), cutoff, "sieve filter");
        if filtered == pool {
            debug!(size = pool.len(), round = pass.round, "sieve filter made no progress");
            exit = SieveExit::NonProgress;
            break;
        }
        pool = filtered;
    }

    trajectory.advance_round();
    let positive = positive_part(oracle, solution, &pool, batch_size, trajectory, rng);
    let padded: Vec<Candidate> = pool
        .iter()
        .copied()
        .map(Candidate::Real)
        .chain((0..k.saturating_sub(pool.len())).map(Candidate::Placeholder))
        .collect();
    let drawn: Vec<Candidate> = index::sample(rng, padded.len(), batch_size.min(padded.len()))
        .iter()
        .map(|i| padded[i])
        .collect();
    let selected: ElementSet = real_elements(&drawn)
        .into_iter()
        .filter(|x| positive.contains(x) && !solution.contains(x))
        .collect();
    commit(oracle, solution, current_value, selected, exit, trajectory)
}
