//! AI components

pub mod brain;
pub mod profile;

// Re-export all components
pub use brain::*;
pub use profile::*;
