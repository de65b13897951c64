//! Set and ranking types shared by every algorithm.
//!
//! # Submodules
//!
//! - [`element_set`]: reproducible hash sets of ground-set elements
//! - [`candidate`]: padded candidate pools with typed placeholders
//! - [`total_f64`]: totally ordered marginal gains

mod candidate;
mod element_set;
mod total_f64;

pub use candidate::*;
pub use element_set::*;
pub use total_f64::*;
