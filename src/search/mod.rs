mod best;
mod config;
mod evolve;
mod outcome;

pub use config::{SearchConfig, SearchError};
pub use evolve::{evolve, TREE_DEPTH};
pub use outcome::{SearchOutcome, Termination};
