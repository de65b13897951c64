//! Experiment driver: parameters, algorithm dispatch and trial bookkeeping.

mod algorithm;
mod params;
mod runner;

pub use algorithm::*;
pub use params::*;
pub use runner::*;
