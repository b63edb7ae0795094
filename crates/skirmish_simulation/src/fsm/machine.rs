//! Three-phase state machine runtime (Enter → Update → Exit).
//!
//! Transitions are deferred: a request switches the active state to the
//! `Exiting` phase, the next `process()` runs `exit()` and installs the
//! successor, and the successor's `enter()` runs on the `process()` after that.
//!
//! ```text
//! tick N    update()  → transition.to(Next)    phase: Running → Exiting
//! tick N+1  exit()    → active = Next          phase: Entering
//! tick N+2  Next::enter()                      phase: Running
//! ```

use std::fmt;

// ============================================================================
// State traits
// ============================================================================

/// Context-free description of a state (name, terminal flag).
///
/// Split out of [`State`] so the machine can query it without knowing the
/// context type.
pub trait StateLabel: Sized {
    /// State name for logging and assertions.
    fn name(&self) -> &'static str;

    /// Terminal states never leave: every transition request is ignored.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// A behavior state driven by [`StateMachine::process`].
///
/// `Ctx` is whatever the owning system hands in for this tick (actor
/// transform, clock, sensing snapshot, ...). States request a successor via
/// the [`Transition`] handle; they never swap themselves out directly.
pub trait State<Ctx>: StateLabel {
    /// First `process()` after activation.
    fn enter(&mut self, _ctx: &mut Ctx, _transition: &mut Transition<Self>) {}

    /// Every following `process()` while no transition is pending.
    fn update(&mut self, _ctx: &mut Ctx, _transition: &mut Transition<Self>) {}

    /// Runs once, on the `process()` after a transition was requested.
    fn exit(&mut self, _ctx: &mut Ctx) {}
}

// ============================================================================
// Transition handle
// ============================================================================

/// Successor request collected during `enter()` / `update()`.
///
/// Calling [`Transition::to`] twice keeps only the last successor.
pub struct Transition<S> {
    next: Option<S>,
}

impl<S> Transition<S> {
    fn new() -> Self {
        Self { next: None }
    }

    /// Request `state` as the successor.
    pub fn to(&mut self, state: S) {
        self.next = Some(state);
    }
}

// ============================================================================
// Machine
// ============================================================================

/// Lifecycle phase of the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Installed, `enter()` not run yet.
    Entering,
    /// `enter()` done, `update()` runs every tick.
    Running,
    /// Successor queued, `exit()` runs on the next tick.
    Exiting,
}

/// Reported by [`StateMachine::process`] when a successor gets installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: &'static str,
    pub to: &'static str,
}

/// Owns exactly one active state plus an optional queued successor.
pub struct StateMachine<S> {
    active: S,
    phase: Phase,
    pending: Option<S>,
}

impl<S: StateLabel> StateMachine<S> {
    /// Create a machine; `initial.enter()` runs on the first `process()`.
    pub fn new(initial: S) -> Self {
        Self {
            active: initial,
            phase: Phase::Entering,
            pending: None,
        }
    }

    /// Advance the active state by one tick.
    pub fn process<Ctx>(&mut self, ctx: &mut Ctx) -> Option<StateChange>
    where
        S: State<Ctx>,
    {
        match self.phase {
            Phase::Entering => {
                let mut transition = Transition::new();
                self.active.enter(ctx, &mut transition);
                self.phase = Phase::Running;
                self.queue(transition);
                None
            }
            Phase::Running => {
                let mut transition = Transition::new();
                self.active.update(ctx, &mut transition);
                self.queue(transition);
                None
            }
            Phase::Exiting => {
                self.active.exit(ctx);

                let Some(next) = self.pending.take() else {
                    // Exiting without a successor cannot be reached through
                    // the public API; recover by resuming the active state.
                    self.phase = Phase::Running;
                    return None;
                };

                let from = self.active.name();
                self.active = next;
                self.phase = Phase::Entering;

                Some(StateChange {
                    from,
                    to: self.active.name(),
                })
            }
        }
    }

    /// Request a transition from outside the active state (combat interrupts).
    ///
    /// Returns `false` when the request is ignored: the active state (or an
    /// already queued successor) is terminal.
    pub fn transition(&mut self, next: S) -> bool {
        if self.active.is_terminal() {
            return false;
        }

        match self.phase {
            Phase::Entering => {
                // Never entered → never exits; just replace it.
                self.active = next;
                true
            }
            Phase::Running | Phase::Exiting => {
                if self.pending.as_ref().is_some_and(|queued| queued.is_terminal()) {
                    return false;
                }
                self.pending = Some(next);
                self.phase = Phase::Exiting;
                true
            }
        }
    }

    fn queue(&mut self, transition: Transition<S>) {
        if let Some(next) = transition.next {
            self.transition(next);
        }
    }

    pub fn active(&self) -> &S {
        &self.active
    }

    pub fn pending(&self) -> Option<&S> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.active.name()
    }

    #[must_use]
    pub fn is_in_state(&self, name: &str) -> bool {
        self.active.name() == name
    }
}

impl<S: StateLabel> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("active", &self.active.name())
            .field("phase", &self.phase)
            .field("pending", &self.pending.as_ref().map(|s| s.name()))
            .finish()
    }
}
