use crate::sets::ElementSet;

/// Read-only access to a set function over the ground set `0..num_nodes()`.
///
/// Implementations must satisfy `value(∅) == 0`, and the two marginal queries
/// must agree with `value`:
///
/// - `marginal_value(x, S) == value(S ∪ {x}) - value(S)`, which is 0 for `x ∈ S`
/// - `marginal_set_value(T, S) == value(S ∪ T) - value(S)`
///
/// The default marginal implementations are exactly these differences; concrete
/// objectives override them with cheaper incremental formulas. Algorithms assume
/// submodularity for their guarantees but never rely on it for termination.
///
/// Queries never mutate the oracle, so one oracle can be shared by any number of
/// algorithm runs (and threads).
pub trait ValueOracle {
    /// Size of the ground set.
    fn num_nodes(&self) -> usize;

    fn value(&self, set: &ElementSet) -> f64;

    fn marginal_value(&self, element: usize, set: &ElementSet) -> f64 {
        if set.contains(&element) {
            return 0.0;
        }
        let mut extended = set.clone();
        extended.insert(element);
        self.value(&extended) - self.value(set)
    }

    fn marginal_set_value(&self, addition: &ElementSet, set: &ElementSet) -> f64 {
        let mut extended = set.clone();
        extended.extend(addition.iter().copied());
        self.value(&extended) - self.value(set)
    }
}

/// Index and marginal gain of the best singleton, scanning `0..n` against `∅`.
/// Ties keep the lowest index. Returns `None` for an empty ground set.
pub fn best_singleton<O: ValueOracle + ?Sized>(oracle: &O) -> Option<(usize, f64)> {
    let empty = ElementSet::default();
    (0..oracle.num_nodes())
        .map(|u| (u, oracle.marginal_value(u, &empty)))
        .fold(None, |best, (u, gain)| match best {
            Some((_, best_gain)) if best_gain >= gain => best,
            _ => Some((u, gain)),
        })
}
