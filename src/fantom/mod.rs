//! Density-threshold family: greedy with a stopping density, iterated over a
//! shrinking ground set, across a grid of density guesses.

mod gdt;
mod igdt;
mod orchestrator;

pub use gdt::*;
pub use igdt::*;
pub use orchestrator::*;
