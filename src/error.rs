//! Fatal error conditions of the maximization algorithms.
//!
//! Both variants are contract violations: the call is aborted immediately and the
//! caller decides whether to skip the trial or stop the whole run. A refinement
//! step that stops making progress is not an error; see
//! [`crate::blits::SieveExit::NonProgress`].

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum MaximizationError {
    /// Parameters make progress impossible (`k == 0`, `k > n`, `k / r == 0`, ...).
    InvalidConfiguration(String),
    /// A sample-complexity formula produced a degenerate sample or batch size.
    EstimatorDegeneracy(String),
}

impl Display for MaximizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(reason) => write!(f, "Invalid configuration: {reason}"),
            Self::EstimatorDegeneracy(reason) => write!(f, "Degenerate estimator: {reason}"),
        }
    }
}

impl std::error::Error for MaximizationError {}

pub type MaximizationResult<T> = Result<T, MaximizationError>;

/// Checks `0 < k <= n`.
pub fn validate_cardinality(num_nodes: usize, k: usize) -> MaximizationResult<()> {
    if k == 0 {
        return Err(MaximizationError::InvalidConfiguration(
            "cardinality constraint k must be positive".into(),
        ));
    }
    if k > num_nodes {
        return Err(MaximizationError::InvalidConfiguration(format!(
            "cardinality constraint k = {k} exceeds the ground set size n = {num_nodes}"
        )));
    }
    Ok(())
}

/// Checks that `value` lies in the open interval `(0, 1)`.
pub fn validate_unit_interval(name: &str, value: f64) -> MaximizationResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(MaximizationError::InvalidConfiguration(format!(
            "{name} must lie in (0, 1), got {value}"
        )))
    }
}
