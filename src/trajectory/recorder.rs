use serde::{Deserialize, Serialize};

use crate::sets::{ElementSet, sorted_elements};

/// One round of an algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Elements committed during this round, ascending. May be empty.
    pub elements_added: Vec<usize>,
    pub marginal_gain: f64,
    /// Best function value found up to and including this round.
    pub cumulative_function_value: f64,
    pub cumulative_query_count: usize,
}

impl Round {
    fn initial() -> Self {
        Round {
            elements_added: Vec::new(),
            marginal_gain: 0.0,
            cumulative_function_value: 0.0,
            cumulative_query_count: 0,
        }
    }
}

/// A single row of the tabular trajectory output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub round: usize,
    pub num_elements_added: usize,
    pub marginal_gain: f64,
    pub function_value: f64,
    pub num_queries: usize,
}

/// Append-only record of an algorithm's progress.
///
/// Round 0 is always `(∅, 0, 0, 0)`. [`Trajectory::advance_round`] opens a new
/// round carrying the cumulative value and query count forward; every other
/// mutator touches only the newest round, so earlier rounds are frozen as soon as
/// a later one exists.
///
/// # Invariants
/// - `cumulative_query_count` never decreases from one round to the next.
/// - `cumulative_function_value` never decreases: it only moves through
///   [`Trajectory::raise_value`], which keeps the best value seen so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    rounds: Vec<Round>,
    solution: Vec<usize>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory {
            rounds: vec![Round::initial()],
            solution: Vec::new(),
        }
    }

    /// Opens a new round that starts from the previous round's cumulative value
    /// and query count, with no elements and zero gain.
    pub fn advance_round(&mut self) {
        let previous = self.current();
        let next = Round {
            elements_added: Vec::new(),
            marginal_gain: 0.0,
            cumulative_function_value: previous.cumulative_function_value,
            cumulative_query_count: previous.cumulative_query_count,
        };
        self.rounds.push(next);
    }

    /// Charges `queries` oracle queries to the current round.
    ///
    /// # Panics
    /// Panics when called before the first [`Trajectory::advance_round`] with a
    /// non-zero count: round 0 never performs queries.
    pub fn record_queries(&mut self, queries: usize) {
        if queries == 0 {
            return;
        }
        assert!(self.num_rounds() > 0, "round 0 cannot record queries");
        self.current_mut().cumulative_query_count += queries;
    }

    pub fn set_elements_added<I: IntoIterator<Item = usize>>(&mut self, elements: I) {
        assert!(self.num_rounds() > 0, "round 0 cannot add elements");
        let mut elements: Vec<usize> = elements.into_iter().collect();
        elements.sort_unstable();
        self.current_mut().elements_added = elements;
    }

    pub fn add_marginal_gain(&mut self, gain: f64) {
        assert!(self.num_rounds() > 0, "round 0 cannot record gains");
        self.current_mut().marginal_gain += gain;
    }

    /// Raises the current round's value to `value` if that is an improvement.
    pub fn raise_value(&mut self, value: f64) {
        if value > self.current().cumulative_function_value {
            assert!(self.num_rounds() > 0, "round 0 has value 0");
            self.current_mut().cumulative_function_value = value;
        }
    }

    /// Records the final answer of the run.
    pub fn set_solution(&mut self, solution: &ElementSet) {
        self.solution = sorted_elements(solution);
    }

    /// The final answer, ascending. Empty until [`Trajectory::set_solution`].
    pub fn solution(&self) -> &[usize] {
        &self.solution
    }

    /// Number of rounds after round 0.
    pub fn num_rounds(&self) -> usize {
        self.rounds.len() - 1
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current(&self) -> &Round {
        &self.rounds[self.rounds.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Round {
        let last = self.rounds.len() - 1;
        &mut self.rounds[last]
    }

    pub fn final_value(&self) -> f64 {
        self.current().cumulative_function_value
    }

    pub fn total_queries(&self) -> usize {
        self.current().cumulative_query_count
    }

    /// Rows of the tabular output, round 0 included.
    pub fn rows(&self) -> impl Iterator<Item = TrajectoryRow> + '_ {
        self.rounds.iter().enumerate().map(|(index, round)| TrajectoryRow {
            round: index,
            num_elements_added: round.elements_added.len(),
            marginal_gain: round.marginal_gain,
            function_value: round.cumulative_function_value,
            num_queries: round.cumulative_query_count,
        })
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Trajectory::new()
    }
}
