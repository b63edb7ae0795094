//! Player brain system.

use bevy::prelude::*;

use crate::ai::BrainContext;
use crate::clock::{Clock, TimerInbox};
use crate::combat::{HitVolume, Knockback};
use crate::components::{Enemy, Faction, Health};
use crate::player::components::{Player, PlayerBrain, PlayerInput, PlayerProfile};
use crate::player::states::PlayerContext;
use crate::presentation::PresentationEvent;
use crate::registry::ActorRegistry;
use crate::sensing::snapshot;

/// Система: process the player's state machine once.
///
/// Input missing (host never inserted it) → treated as neutral input.
pub fn process_player_brain(
    mut players: Query<
        (
            Entity,
            &mut PlayerBrain,
            &PlayerProfile,
            &mut Transform,
            &mut HitVolume,
            &mut Knockback,
            &mut TimerInbox,
        ),
        (With<Player>, Without<Enemy>),
    >,
    enemies: Query<(&Transform, &Health), (With<Enemy>, Without<Player>)>,
    registry: Res<ActorRegistry>,
    input: Option<Res<PlayerInput>>,
    mut clock: ResMut<Clock>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let Some(player) = registry.player() else {
        return;
    };
    let Ok((entity, mut brain, profile, mut transform, mut hit_volume, mut knockback, mut inbox)) =
        players.get_mut(player)
    else {
        return;
    };

    let targets = snapshot(registry.live(Faction::Enemy), &enemies);
    let mut outbox = Vec::new();
    let tick = clock.tick_count();

    let mut ctx = PlayerContext {
        actor: BrainContext {
            entity,
            transform: &mut transform,
            profile,
            hit_volume: &mut hit_volume,
            knockback: &mut knockback,
            inbox: &mut inbox,
            clock: &mut clock,
            targets: &targets,
            presentation: &mut outbox,
        },
        input: input.map(|input| *input).unwrap_or_default(),
    };

    if let Some(change) = brain.process(&mut ctx) {
        crate::log(&format!(
            "Player: [tick {}] {:?} {} → {}",
            tick, entity, change.from, change.to
        ));
    }

    // Signals not consumed this tick are stale
    inbox.clear();

    for event in outbox {
        presentation.write(event);
    }
}
