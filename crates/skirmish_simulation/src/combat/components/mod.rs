//! Combat components

pub mod knockback;
pub mod volume;


// Re-export all components
pub use knockback::*;
pub use volume::*;
