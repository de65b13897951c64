//! Sieve family: guess the optimum, then narrow a candidate pool over a fixed
//! number of passes using Monte-Carlo estimates of marginal gains.

mod estimate;
mod orchestrator;
mod sieve;

pub use estimate::*;
pub use orchestrator::*;
pub use sieve::*;
