//! The oracle contract consumed by every algorithm.

mod value_oracle;

#[cfg(test)]
pub(crate) mod testing;

pub use value_oracle::*;
