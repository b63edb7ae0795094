//! Per-tick context handed to brain states.
//!
//! Built by the brain systems from query items and resources; states only
//! touch the world through it.

use bevy::prelude::*;

use crate::clock::{Clock, TimerAction, TimerHandle, TimerInbox, TimerSignal};
use crate::combat::{HitVolume, Knockback};
use crate::presentation::PresentationEvent;
use crate::sensing::{live_candidate, nearest_target, Candidate};

/// Everything a state may read or mutate during `process()`.
///
/// `P` is the actor's tuning profile (`EnemyProfile` / `PlayerProfile`).
pub struct BrainContext<'a, P> {
    pub entity: Entity,
    pub transform: &'a mut Transform,
    pub profile: &'a P,
    pub hit_volume: &'a mut HitVolume,
    pub knockback: &'a mut Knockback,
    pub inbox: &'a mut TimerInbox,
    pub clock: &'a mut Clock,
    /// Opposing-faction snapshot, registry order
    pub targets: &'a [Candidate],
    /// Flushed into `EventWriter<PresentationEvent>` after the loop
    pub presentation: &'a mut Vec<PresentationEvent>,
}

impl<P> BrainContext<'_, P> {
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn delta(&self) -> f32 {
        self.clock.delta()
    }

    /// Consume a signal fired for this actor this tick.
    pub fn fired(&mut self, signal: TimerSignal) -> bool {
        self.inbox.take(signal)
    }

    /// Schedule a callback owned by this actor.
    pub fn schedule(&mut self, delay: f32, action: TimerAction) -> TimerHandle {
        self.clock.schedule(delay, self.entity, action)
    }

    pub fn cancel(&mut self, handle: TimerHandle) {
        self.clock.cancel(handle);
    }

    pub fn notify(&mut self, event: PresentationEvent) {
        self.presentation.push(event);
    }

    /// Target by entity; `None` when despawned or dead ("unavailable").
    pub fn live_target(&self, entity: Entity) -> Option<Candidate> {
        live_candidate(self.targets, entity)
    }

    /// Nearest live opposing actor within `radius` of this actor.
    pub fn nearest_target(&self, radius: f32) -> Option<Candidate> {
        nearest_target(self.position(), radius, self.targets.iter().copied())
    }
}
