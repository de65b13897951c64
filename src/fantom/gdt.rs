use tracing::trace;

use crate::{oracle::ValueOracle, sets::ElementSet, trajectory::Trajectory};

/// Density greedy with threshold `rho` over the restricted ground set `omega`.
///
/// Greedily adds the best element of `omega` until `k` are chosen or the best
/// available gain falls below `rho`, one trajectory round per pick. Returns the
/// better of that greedy set and the best singleton of `omega`.
///
/// Queries not covered by a pick round (the singleton scan when nothing is
/// picked, and the final scan that hits the threshold) go to the current round,
/// or to a new probe round if this call has not opened one.
pub fn gdt<O>(
    oracle: &O,
    omega: &[usize],
    rho: f64,
    k: usize,
    trajectory: &mut Trajectory,
) -> ElementSet
where
    O: ValueOracle + ?Sized,
{
    let empty = ElementSet::default();
    let Some((best_element, best_single)) = omega
        .iter()
        .map(|&x| (x, oracle.marginal_value(x, &empty)))
        .fold(None, |best: Option<(usize, f64)>, (x, gain)| match best {
            Some((_, best_gain)) if best_gain >= gain => best,
            _ => Some((x, gain)),
        })
    else {
        return ElementSet::default();
    };
    let mut pending = omega.len();
    let mut opened_round = false;

    let mut solution = ElementSet::default();
    let mut value = 0.0;
    while solution.len() < k {
        let mut pick: Option<(usize, f64)> = None;
        for &x in omega.iter().filter(|x| !solution.contains(*x)) {
            pending += 1;
            let gain = oracle.marginal_value(x, &solution);
            if pick.is_none_or(|(_, best)| gain > best) {
                pick = Some((x, gain));
            }
        }
        let Some((x, gain)) = pick.filter(|&(_, gain)| gain >= rho) else {
            break;
        };

        solution.insert(x);
        value += gain;
        trajectory.advance_round();
        opened_round = true;
        trajectory.set_elements_added([x]);
        trajectory.add_marginal_gain(gain);
        trajectory.raise_value(value);
        trajectory.record_queries(pending);
        pending = 0;
    }

    if pending > 0 {
        if !opened_round {
            trajectory.advance_round();
        }
        trajectory.record_queries(pending);
    }
    trace!(rho, size = solution.len(), value, best_single, "gdt");

    if best_single < value {
        trajectory.raise_value(value);
        solution
    } else {
        trajectory.raise_value(best_single);
        [best_element].into_iter().collect()
    }
}
