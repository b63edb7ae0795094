//! AI systems

pub mod brain;

pub use brain::*;
