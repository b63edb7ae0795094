//! Enemy brain: behavior state set + the component that runs it.

use bevy::prelude::*;

use crate::clock::TimerHandle;
use crate::fsm::{StateLabel, StateMachine};

/// Enemy behavior states.
///
/// ```text
/// Patrol ──target in search radius──▶ Pursue ──in range & facing──▶ Attack
///   ▲                                   │                             │
///   └────────── beyond cancel radius ───┘◀──────── recovery done ─────┘
///
/// any (alive) ──hit──▶ Damage ──knockback done──▶ Patrol
///                        └──── lethal ──▶ Dead (terminal, despawn after delay)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyState {
    Patrol,
    Pursue {
        target: Entity,
    },
    Attack {
        phase: AttackPhase,
        /// Pending windup / recovery callback
        timer: Option<TimerHandle>,
    },
    Damage(DamageTaken),
    Dead,
}

impl EnemyState {
    /// Fresh attack in the Ready sub-phase.
    pub fn attack() -> Self {
        Self::Attack {
            phase: AttackPhase::Ready,
            timer: None,
        }
    }
}

impl StateLabel for EnemyState {
    fn name(&self) -> &'static str {
        match self {
            EnemyState::Patrol => "Patrol",
            EnemyState::Pursue { .. } => "Pursue",
            EnemyState::Attack { .. } => "Attack",
            EnemyState::Damage(_) => "Damage",
            EnemyState::Dead => "Dead",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, EnemyState::Dead)
    }
}

/// Attack sub-phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackPhase {
    /// Windup running, impact not fired yet
    Ready,
    /// Post-impact recovery
    Rigid,
}

/// Payload of the Damage state (health is already applied by combat
/// resolution; this drives knockback and the successor choice).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DamageTaken {
    pub amount: u32,
    /// Center of the hit region that struck us
    pub source: Vec3,
    pub lethal: bool,
}

/// Component: state machine of one enemy (initial state Patrol).
#[derive(Component, Debug, Deref, DerefMut)]
pub struct EnemyBrain(pub StateMachine<EnemyState>);

impl Default for EnemyBrain {
    fn default() -> Self {
        Self(StateMachine::new(EnemyState::Patrol))
    }
}
