use hashbrown::HashSet;

use crate::sets::{ElementBuildHasher, ElementSet, TotalF64};

/// An entry of a padded candidate pool.
///
/// Some algorithms pad their pool to a fixed size with dummy elements of zero
/// gain. Those are `Placeholder`s: they can be drawn like any other candidate,
/// but only `Real` elements are ever passed to the oracle or reported.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Debug)]
pub enum Candidate {
    Real(usize),
    Placeholder(usize),
}

impl Candidate {
    /// The ground-set element behind this candidate, if any.
    #[inline]
    pub fn real(self) -> Option<usize> {
        match self {
            Candidate::Real(element) => Some(element),
            Candidate::Placeholder(_) => None,
        }
    }
}

pub type CandidateSet = HashSet<Candidate, ElementBuildHasher>;

/// Drops the placeholders of a candidate collection, keeping the real elements.
pub fn real_elements<'a, I>(candidates: I) -> ElementSet
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates.into_iter().filter_map(|c| c.real()).collect()
}

/// A candidate together with its current marginal gain.
///
/// Ranked entries order by gain first. On equal gains a real element ranks above
/// a placeholder, and a lower index ranks above a higher one, so sorting in
/// descending order puts the most attractive candidates first.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct RankedCandidate {
    /// Marginal gain of `candidate` against the current solution.
    pub gain: TotalF64,

    pub candidate: Candidate,
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.gain
            .cmp(&other.gain)
            .then_with(|| other.candidate.cmp(&self.candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(gain: f64, candidate: Candidate) -> RankedCandidate {
        RankedCandidate {
            gain: gain.into(),
            candidate,
        }
    }

    #[test]
    fn real_unwraps_only_real_candidates() {
        assert_eq!(Candidate::Real(4).real(), Some(4));
        assert_eq!(Candidate::Placeholder(4).real(), None);
    }

    #[test]
    fn real_elements_filters_placeholders() {
        let pool = [
            Candidate::Real(3),
            Candidate::Placeholder(0),
            Candidate::Real(1),
            Candidate::Placeholder(1),
        ];
        let reals = real_elements(pool.iter());
        assert_eq!(reals.len(), 2);
        assert!(reals.contains(&1));
        assert!(reals.contains(&3));
    }

    #[test]
    fn descending_sort_puts_highest_gain_first() {
        let mut entries = vec![
            ranked(1.0, Candidate::Real(0)),
            ranked(5.0, Candidate::Real(1)),
            ranked(0.0, Candidate::Placeholder(0)),
            ranked(3.0, Candidate::Real(2)),
        ];
        entries.sort_by(|a, b| b.cmp(a));
        let order: Vec<_> = entries.iter().map(|e| e.candidate).collect();
        assert_eq!(
            order,
            vec![
                Candidate::Real(1),
                Candidate::Real(2),
                Candidate::Real(0),
                Candidate::Placeholder(0)
            ]
        );
    }

    #[test]
    fn ties_prefer_real_elements_then_lower_indices() {
        let mut entries = vec![
            ranked(0.0, Candidate::Placeholder(0)),
            ranked(0.0, Candidate::Real(7)),
            ranked(0.0, Candidate::Real(2)),
        ];
        entries.sort_by(|a, b| b.cmp(a));
        let order: Vec<_> = entries.iter().map(|e| e.candidate).collect();
        assert_eq!(
            order,
            vec![
                Candidate::Real(2),
                Candidate::Real(7),
                Candidate::Placeholder(0)
            ]
        );
    }
}
