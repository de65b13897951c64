//! Reading problem instances and writing trajectories.

mod instance_load;
mod scanner;
mod trajectory_write;

pub use instance_load::*;
pub use scanner::*;
pub use trajectory_write::*;
