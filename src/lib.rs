pub mod adaptive;
pub mod blits;
pub mod error;
pub mod experiment;
pub mod fantom;
pub mod fs;
pub mod greedy;
pub mod objectives;
pub mod oracle;
pub mod sets;
pub mod statistics;
pub mod trajectory;
