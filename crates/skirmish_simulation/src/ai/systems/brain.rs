//! Enemy brain system.

use bevy::prelude::*;

use crate::ai::components::{EnemyBrain, EnemyProfile};
use crate::ai::context::BrainContext;
use crate::clock::{Clock, TimerInbox};
use crate::combat::{HitVolume, Knockback};
use crate::components::{Enemy, Faction, Health};
use crate::player::Player;
use crate::presentation::PresentationEvent;
use crate::registry::ActorRegistry;
use crate::sensing::snapshot;

/// Система: process every enemy's state machine once, registry (spawn)
/// order.
///
/// Sensing works from a snapshot of the player taken before the loop.
pub fn process_enemy_brains(
    mut enemies: Query<
        (
            &mut EnemyBrain,
            &EnemyProfile,
            &mut Transform,
            &mut HitVolume,
            &mut Knockback,
            &mut TimerInbox,
        ),
        (With<Enemy>, Without<Player>),
    >,
    players: Query<(&Transform, &Health), (With<Player>, Without<Enemy>)>,
    registry: Res<ActorRegistry>,
    mut clock: ResMut<Clock>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let targets = snapshot(registry.live(Faction::Player), &players);
    let tick = clock.tick_count();
    let mut outbox = Vec::new();

    for &entity in registry.enemies() {
        let Ok((mut brain, profile, mut transform, mut hit_volume, mut knockback, mut inbox)) =
            enemies.get_mut(entity)
        else {
            continue;
        };

        let mut ctx = BrainContext {
            entity,
            transform: &mut transform,
            profile,
            hit_volume: &mut hit_volume,
            knockback: &mut knockback,
            inbox: &mut inbox,
            clock: &mut clock,
            targets: &targets,
            presentation: &mut outbox,
        };

        if let Some(change) = brain.process(&mut ctx) {
            crate::log(&format!(
                "AI: [tick {}] {:?} {} → {}",
                tick, entity, change.from, change.to
            ));
        }

        inbox.clear();
    }

    for event in outbox {
        presentation.write(event);
    }
}
