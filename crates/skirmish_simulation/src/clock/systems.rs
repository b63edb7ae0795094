//! Callback dispatch (first system of every tick).

use bevy::prelude::*;

use crate::clock::{Clock, TimerAction, TimerInbox};
use crate::combat::HitVolume;
use crate::encounter::{Encounter, EncounterEnded, EncounterOutcome};
use crate::registry::ActorRegistry;

/// Система: fire every callback due at the current clock time.
///
/// Signals go to the owner's inbox (consumed by its active state later this
/// tick); world-level actions run here. Once an owner is removed, the rest
/// of its callbacks in the same batch are dropped.
pub fn fire_due_callbacks(
    mut clock: ResMut<Clock>,
    mut registry: ResMut<ActorRegistry>,
    mut encounter: ResMut<Encounter>,
    mut actors: Query<(&mut TimerInbox, &mut HitVolume)>,
    mut ended: EventWriter<EncounterEnded>,
    mut commands: Commands,
) {
    let due = clock.drain_due();
    let mut removed: Vec<Entity> = Vec::new();

    for callback in due {
        let owner = callback.owner;
        if removed.contains(&owner) {
            continue;
        }

        match callback.action {
            TimerAction::Signal(signal) => {
                if let Ok((mut inbox, _)) = actors.get_mut(owner) {
                    inbox.push(signal);
                }
            }
            TimerAction::DisableHitVolume => {
                if let Ok((_, mut hit_volume)) = actors.get_mut(owner) {
                    hit_volume.deactivate();
                }
            }
            TimerAction::Despawn => {
                if registry.remove(owner, &mut clock, &mut commands) {
                    removed.push(owner);
                }
            }
            TimerAction::ConcludeDefeat => {
                if let Some(event) = encounter.conclude(EncounterOutcome::Defeated, clock.now()) {
                    ended.write(event);
                }
            }
        }
    }
}
