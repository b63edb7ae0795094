//! Encounter outcome: time limit, cleared, defeated.
//!
//! The outcome is decided once. Whoever decides it (the clock for a
//! defeat, `update_encounter` for the rest) writes the single
//! `EncounterEnded` event.

use bevy::prelude::*;

use crate::clock::Clock;
use crate::components::{Faction, Health};
use crate::registry::ActorRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EncounterOutcome {
    /// Every enemy removed while the player was alive
    Cleared,
    /// Player's death sequence finished
    Defeated,
    /// Time limit reached first
    TimedOut,
}

/// Event: encounter decided (written exactly once).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EncounterEnded {
    pub outcome: EncounterOutcome,
    /// Seconds since the encounter started
    pub elapsed: f64,
}

#[derive(Resource, Debug, Clone)]
pub struct Encounter {
    time_limit: f32,
    remaining: f32,
    outcome: Option<EncounterOutcome>,
}

impl Encounter {
    pub fn new(time_limit: f32) -> Self {
        Self {
            time_limit,
            remaining: time_limit,
            outcome: None,
        }
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    /// Seconds left on the round timer.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Decide the encounter. Returns the event to write, or `None` if it was
    /// already decided.
    pub fn conclude(&mut self, outcome: EncounterOutcome, now: f64) -> Option<EncounterEnded> {
        if self.outcome.is_some() {
            return None;
        }
        self.outcome = Some(outcome);
        crate::logger::log_info(&format!("Encounter: {:?} at {:.2}s", outcome, now));
        Some(EncounterEnded {
            outcome,
            elapsed: now,
        })
    }
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(60.0)
    }
}

/// Система: count the round timer down, detect cleared / timed out.
///
/// The timer only runs while enemies are live and the player is alive: it
/// waits for the first wave and freezes during the player's death delay, so
/// a pending defeat can't turn into a time out. Cleared needs at least one
/// enemy to have been spawned.
pub fn update_encounter(
    mut encounter: ResMut<Encounter>,
    registry: Res<ActorRegistry>,
    clock: Res<Clock>,
    players: Query<&Health>,
    mut spawned_enemies: Local<bool>,
    mut ended: EventWriter<EncounterEnded>,
) {
    if encounter.is_over() {
        return;
    }

    let enemies_left = !registry.live(Faction::Enemy).is_empty();
    *spawned_enemies |= enemies_left;

    let player_alive = registry
        .player()
        .and_then(|player| players.get(player).ok())
        .is_some_and(|health| health.is_alive());

    if enemies_left && player_alive {
        encounter.remaining = (encounter.remaining - clock.delta()).max(0.0);
    }

    let outcome = if *spawned_enemies && !enemies_left && player_alive {
        Some(EncounterOutcome::Cleared)
    } else if encounter.remaining <= 0.0 {
        Some(EncounterOutcome::TimedOut)
    } else {
        None
    };

    if let Some(event) = outcome.and_then(|outcome| encounter.conclude(outcome, clock.now())) {
        ended.write(event);
    }
}
