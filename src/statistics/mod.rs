//! Aggregates over repeated trials of one algorithm.
//!
//! Every trial contributes its final value, total query count, and round count.
//! The aggregates are what the experiment driver logs and serializes per run.

mod trial_stats;
pub use trial_stats::*;
