//! Combat module
//!
//! Простая melee-модель:
//! - Hit-volume атакующего активируется на короткое окно после impact
//! - Пересечение с hurt-volume противника → `AttackEvent`
//! - `resolve_damage`: cancel callbacks цели → health → presentation
//! - Brain цели принудительно уходит в Damage / Dead
//!
//! Порядок внутри тика: detect_hits → resolve_attack_events → (brains) →
//! advance_knockback. См. `EncounterPlugin`.

pub mod components;
pub mod events;
pub mod resolution;
pub mod systems;


// Re-export основных типов
pub use components::{HitRegion, HitVolume, HurtVolume, Knockback, KnockbackMotion};
pub use events::AttackEvent;
pub use resolution::{resolve_damage, Combatant, DamageOutcome};
pub use systems::{advance_knockback, detect_hits, resolve_attack_events};
