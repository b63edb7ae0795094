//! Damage resolution protocol.
//!
//! Order matters: pending callbacks of the target are canceled BEFORE health
//! changes, so an attack impact that is already due can never land after the
//! attacker itself was hit.

use bevy::prelude::*;

use crate::clock::{Clock, TimerInbox};
use crate::combat::{HitRegion, HitVolume, HurtVolume};
use crate::components::Health;
use crate::movement::look_at_flat;
use crate::presentation::{AnimationTrigger, PresentationEvent};

/// Mutable view of the actor being hit.
pub struct Combatant<'a> {
    pub entity: Entity,
    pub health: &'a mut Health,
    pub transform: &'a mut Transform,
    pub hurt: &'a HurtVolume,
    pub hit_volume: &'a mut HitVolume,
    pub inbox: &'a mut TimerInbox,
}

/// Result of [`resolve_damage`]. Caller decides the forced transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target already dead: nothing changed
    Ignored,
    Wounded { remaining: u32 },
    Killed,
}

impl DamageOutcome {
    pub fn is_lethal(self) -> bool {
        matches!(self, DamageOutcome::Killed)
    }
}

/// Apply `amount` damage coming from `source` to `target`.
///
/// 1. dead → `Ignored`
/// 2. cancel the target's callbacks, drop delivered signals, hit-volume off
/// 3. face the source
/// 4. subtract health (saturating)
/// 5. presentation: reset attack trigger, damage number + hit effect at the
///    hurt-surface point nearest to the source, flash, HP gauge
pub fn resolve_damage(
    target: Combatant<'_>,
    amount: u32,
    source: &HitRegion,
    clock: &mut Clock,
    presentation: &mut Vec<PresentationEvent>,
) -> DamageOutcome {
    let Combatant {
        entity,
        health,
        transform,
        hurt,
        hit_volume,
        inbox,
    } = target;

    if health.is_dead() {
        crate::log(&format!("Combat: {:?} already dead, hit ignored", entity));
        return DamageOutcome::Ignored;
    }

    let canceled = clock.cancel_owned(entity);
    inbox.clear();
    hit_volume.deactivate();

    look_at_flat(transform, source.center);

    health.take_damage(amount);
    let lethal = health.is_dead();

    let contact = hurt.closest_point(transform.translation, source.center);
    presentation.extend([
        PresentationEvent::AnimationTrigger {
            entity,
            trigger: AnimationTrigger::ResetAttack,
        },
        PresentationEvent::DamageNumber {
            amount,
            position: contact,
        },
        PresentationEvent::HitEffect {
            position: contact,
            lethal,
        },
        PresentationEvent::DamageFlash { entity },
        PresentationEvent::HealthChanged {
            entity,
            current: health.current,
            max: health.max,
        },
    ]);

    crate::log(&format!(
        "Combat: {:?} took {} damage → {}/{} ({} callbacks canceled)",
        entity, amount, health.current, health.max, canceled
    ));

    if lethal {
        DamageOutcome::Killed
    } else {
        DamageOutcome::Wounded {
            remaining: health.current,
        }
    }
}
