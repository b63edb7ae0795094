//! Simulation clock + one-shot callback scheduler.
//!
//! Every callback is owned by an actor entity. Cancelling by owner is how
//! damage interrupts attack timers and how removal guarantees that nothing
//! fires for a despawned actor.

use bevy::prelude::*;

/// Opaque handle of a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TimerHandle(u64);

/// Signals delivered into the owner's [`TimerInbox`] for its active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TimerSignal {
    /// Attack windup finished → impact
    WindupElapsed,
    /// Post-impact recovery finished
    RecoveryElapsed,
    /// Knockback motion finished
    KnockbackComplete,
    /// Player hitstun finished
    HitstunElapsed,
}

/// What a callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TimerAction {
    /// Deliver to the owner's active state (via inbox).
    Signal(TimerSignal),
    /// Switch the owner's hit-volume off.
    DisableHitVolume,
    /// Terminal: remove the owner from the registry and despawn it.
    Despawn,
    /// Terminal: player death sequence finished → encounter lost.
    ConcludeDefeat,
}

/// A pending callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCallback {
    pub handle: TimerHandle,
    /// Absolute fire time (seconds since encounter start)
    pub fire_at: f64,
    pub owner: Entity,
    pub action: TimerAction,
}

/// Simulation time + pending callbacks.
///
/// Advanced exactly once per tick by [`crate::tick`]. Delays are measured
/// against `now`, so a callback scheduled during tick N with delay `d` fires
/// on the first tick whose `now >= now_N + d`.
#[derive(Resource, Debug, Default)]
pub struct Clock {
    now: f64,
    delta: f32,
    tick: u64,
    next_handle: u64,
    pending: Vec<ScheduledCallback>,
}

impl Clock {
    /// Seconds since the encounter started.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Duration of the current tick (seconds).
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Number of ticks advanced so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.now += f64::from(delta);
        self.tick += 1;
    }

    /// Schedule `action` for `owner` after `delay` seconds.
    pub fn schedule(&mut self, delay: f32, owner: Entity, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.pending.push(ScheduledCallback {
            handle,
            fire_at: self.now + f64::from(delay.max(0.0)),
            owner,
            action,
        });

        handle
    }

    /// Cancel one callback. `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|callback| callback.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every callback owned by `owner`; returns how many were dropped.
    pub fn cancel_owned(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|callback| callback.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|callback| callback.handle == handle)
    }

    pub fn pending_for(&self, owner: Entity) -> usize {
        self.pending.iter().filter(|callback| callback.owner == owner).count()
    }

    /// Remove and return every due callback, ordered by fire time then
    /// scheduling order.
    pub fn drain_due(&mut self) -> Vec<ScheduledCallback> {
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|callback| callback.fire_at <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.handle.cmp(&b.handle)));
        due
    }
}

// ============================================================================
// Timer Inbox Component
// ============================================================================

/// Signals fired for this actor during the current tick.
///
/// Filled by `fire_due_callbacks`, read by the active state, cleared after the
/// brain is processed. Combat resolution clears it too, which is what keeps an
/// already-due attack impact from landing after the actor was hit.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TimerInbox {
    fired: Vec<TimerSignal>,
}

impl TimerInbox {
    pub fn push(&mut self, signal: TimerSignal) {
        self.fired.push(signal);
    }

    /// Consume one occurrence of `signal`.
    pub fn take(&mut self, signal: TimerSignal) -> bool {
        match self.fired.iter().position(|fired| *fired == signal) {
            Some(index) => {
                self.fired.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.fired.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}
