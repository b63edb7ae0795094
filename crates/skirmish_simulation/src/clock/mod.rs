//! Clock / scheduler
//!
//! One simulation timeline: `Clock` advances once per tick, callbacks are
//! owned by actors and fire in `fire_due_callbacks` before any brain runs.

pub mod scheduler;
pub mod systems;

#[cfg(test)]
mod scheduler_tests;

pub use scheduler::*;
pub use systems::*;
