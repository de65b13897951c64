//! Sequential baselines: random sampling, classic greedy, random greedy, and
//! random lazy greedy.

mod classic;
mod lazy_greedy;
mod random;
mod random_greedy;

pub use classic::*;
pub use lazy_greedy::*;
pub use random::*;
pub use random_greedy::*;
