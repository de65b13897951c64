//! Concrete objectives over graphs and similarity matrices.

mod graph;
mod matrix;
mod objective;

pub use graph::*;
pub use matrix::*;
pub use objective::*;
