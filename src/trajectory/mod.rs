//! Uniform progress reporting for every algorithm.
//!
//! Each algorithm invocation creates one [`Trajectory`], appends a round per
//! adaptive step and hands it to the caller, who owns it from then on (for
//! persistence through [`crate::fs`] or aggregation through
//! [`crate::statistics`]).

mod recorder;

pub use recorder::*;
