//! Attack event consumption → damage resolution → forced transitions.

use bevy::prelude::*;

use crate::ai::{DamageTaken, EnemyBrain, EnemyState};
use crate::clock::{Clock, TimerInbox};
use crate::combat::{resolve_damage, AttackEvent, Combatant, DamageOutcome, HitVolume, HurtVolume};
use crate::components::Health;
use crate::player::{PlayerBrain, PlayerState};
use crate::presentation::PresentationEvent;

/// Система: resolve every pending `AttackEvent` (each exactly once).
///
/// After health is applied the target's brain is forced out of whatever it
/// was doing: enemies into `Damage` (which itself goes on to `Dead` when
/// lethal), the player into `Damage` or `Dead`.
pub fn resolve_attack_events(
    mut attacks: EventReader<AttackEvent>,
    mut targets: Query<(
        &mut Health,
        &mut Transform,
        &HurtVolume,
        &mut HitVolume,
        &mut TimerInbox,
        Option<&mut EnemyBrain>,
        Option<&mut PlayerBrain>,
    )>,
    mut clock: ResMut<Clock>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let mut outbox = Vec::new();

    for attack in attacks.read() {
        let Ok((mut health, mut transform, hurt, mut hit_volume, mut inbox, enemy_brain, player_brain)) =
            targets.get_mut(attack.target)
        else {
            crate::log(&format!("Combat: attack on {:?} dropped (target unavailable)", attack.target));
            continue;
        };

        let outcome = resolve_damage(
            Combatant {
                entity: attack.target,
                health: &mut health,
                transform: &mut transform,
                hurt,
                hit_volume: &mut hit_volume,
                inbox: &mut inbox,
            },
            attack.power,
            &attack.source,
            &mut clock,
            &mut outbox,
        );

        if outcome == DamageOutcome::Ignored {
            continue;
        }
        let lethal = outcome.is_lethal();

        if let Some(mut brain) = enemy_brain {
            brain.transition(EnemyState::Damage(DamageTaken {
                amount: attack.power,
                source: attack.source.center,
                lethal,
            }));
        }
        if let Some(mut brain) = player_brain {
            brain.transition(if lethal { PlayerState::Dead } else { PlayerState::Damage });
        }
    }

    for event in outbox {
        presentation.write(event);
    }
}
