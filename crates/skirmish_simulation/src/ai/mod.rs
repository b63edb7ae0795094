//! Enemy AI: behavior graph on top of the generic state machine.
//!
//! Patrol → Pursue → Attack → Patrol, with Damage / Dead forced in by
//! combat resolution. States only see the world through [`BrainContext`].

pub mod components;
pub mod context;
pub mod states;
pub mod systems;

#[cfg(test)]
mod states_tests;

// Re-export основных типов
pub use components::{AttackPhase, DamageTaken, EnemyBrain, EnemyProfile, EnemyState};
pub use context::BrainContext;
pub use states::EnemyContext;
pub use systems::process_enemy_brains;
