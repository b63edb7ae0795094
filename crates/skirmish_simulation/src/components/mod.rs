//! ECS компоненты, общие для всех акторов
//!
//! - actor: Actor, Faction, Health, Enemy marker
//!
//! Доменные компоненты лежат рядом со своими системами
//! (`combat::components`, `ai::components`, `player::components`).

pub mod actor;

// Re-exports для удобного импорта
pub use actor::*;
