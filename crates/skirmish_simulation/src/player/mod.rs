//! Player combat loop
//!
//! Control (move / face the stick direction) → Attack (auto-target the
//! nearest enemy) → back to Control. Hits put the player into hitstun;
//! a lethal hit starts the death sequence that ends the encounter.

pub mod components;
pub mod states;
pub mod systems;

#[cfg(test)]
mod states_tests;

pub use components::*;
pub use states::PlayerContext;
pub use systems::*;
