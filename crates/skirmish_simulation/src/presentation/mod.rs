//! Presentation notifications (fire-and-forget).
//!
//! Animation, VFX, damage numbers, HP gauge: all live outside the
//! simulation. The core only writes these events and never waits on, or
//! reads back from, whoever consumes them.

use bevy::prelude::*;

/// Animation triggers understood by the host animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimationTrigger {
    Attack,
    /// Cancel a queued attack trigger (attack interrupted by a hit)
    ResetAttack,
    Damage,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// Locomotion blend on/off
    MovingChanged { entity: Entity, moving: bool },

    AnimationTrigger {
        entity: Entity,
        trigger: AnimationTrigger,
    },

    /// Floating damage number at a world position
    DamageNumber { amount: u32, position: Vec3 },

    /// Hit particles; `lethal` selects the death variant
    HitEffect { position: Vec3, lethal: bool },

    /// Blink + body shake on the damaged actor
    DamageFlash { entity: Entity },

    /// Attack connected frame: hit-volume switched on
    AttackImpact { entity: Entity, power: u32 },

    DeathSequence { entity: Entity },

    /// HP gauge update
    HealthChanged {
        entity: Entity,
        current: u32,
        max: u32,
    },
}
