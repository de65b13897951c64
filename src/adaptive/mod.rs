//! Adaptive sampling: a low-adaptivity algorithm whose rounds each issue many
//! independent queries against a frozen solution.

mod nonmonotone;
mod reduced_mean;
mod threshold_sampling;
mod unconstrained;

pub use nonmonotone::*;
pub use reduced_mean::*;
pub use threshold_sampling::*;
pub use unconstrained::*;
