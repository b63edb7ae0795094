//! Combat systems

pub mod damage;
pub mod hits;
pub mod knockback;


// Re-export all systems
pub use damage::*;
pub use hits::*;
pub use knockback::*;
