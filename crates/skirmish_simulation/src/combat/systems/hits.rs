//! Hit detection: active hit-volumes vs opposing hurt-volumes.

use bevy::prelude::*;

use crate::combat::{AttackEvent, HitVolume, HurtVolume};
use crate::components::{Actor, Health};
use crate::registry::ActorRegistry;

/// Система: emit one `AttackEvent` per (activation, target) overlap.
///
/// Attackers are visited player first, then enemies in spawn order; the
/// receivers of each attacker in registry order. Dead receivers and
/// same-faction actors are never hit.
pub fn detect_hits(
    mut attackers: Query<(&Actor, &Transform, &mut HitVolume)>,
    receivers: Query<(&Transform, &HurtVolume, &Health)>,
    registry: Res<ActorRegistry>,
    mut attacks: EventWriter<AttackEvent>,
) {
    let order: Vec<Entity> = registry
        .player()
        .into_iter()
        .chain(registry.enemies().iter().copied())
        .collect();

    for attacker in order {
        let Ok((actor, transform, mut hit_volume)) = attackers.get_mut(attacker) else {
            continue;
        };
        if !hit_volume.active {
            continue;
        }

        let region = hit_volume.region(transform);

        for &target in registry.live(actor.faction.opposing()) {
            if hit_volume.struck.contains(&target) {
                continue;
            }
            let Ok((target_transform, hurt, health)) = receivers.get(target) else {
                continue;
            };
            if health.is_dead() || !hurt.overlaps(target_transform.translation, &region) {
                continue;
            }

            hit_volume.struck.push(target);
            attacks.write(AttackEvent {
                attacker,
                power: hit_volume.power,
                source: region,
                target,
            });
            crate::log(&format!(
                "Combat: {:?} hits {:?} (power {})",
                attacker, target, hit_volume.power
            ));
        }
    }
}
