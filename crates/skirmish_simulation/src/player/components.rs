//! Player components: marker, profile, input, brain.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::AttackPhase;
use crate::clock::TimerHandle;
use crate::config::{non_negative, ConfigError};
use crate::fsm::{StateLabel, StateMachine};

/// Marker component для player-controlled entity
///
/// Enemy systems filter it out with `Without<Player>`, player systems select
/// it with `With<Player>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Параметры игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PlayerProfile {
    pub max_health: u32,
    /// Run speed at full stick deflection (m/s)
    pub max_speed: f32,
    pub attack_power: u32,
    /// Attack auto-targets the nearest enemy within this distance
    pub target_radius: f32,
    /// Rotation toward the attack target (rad/s)
    pub attack_turn_rate: f32,
    pub attack_windup: f32,
    pub hit_window: f32,
    /// Extra rigid time after the hit window before control returns
    pub attack_recovery: f32,
    pub hitstun: f32,
    /// Dead → encounter defeat (seconds)
    pub death_delay: f32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_speed: 5.0,
            attack_power: 10,
            target_radius: 4.0,
            attack_turn_rate: 4.0 * std::f32::consts::PI, // 720°/s
            attack_windup: 0.25,
            hit_window: 0.1,
            attack_recovery: 0.0,
            hitstun: 0.5,
            death_delay: 2.0,
        }
    }
}

impl PlayerProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealth { profile: "player" });
        }

        non_negative(
            "player",
            &[
                ("max_speed", self.max_speed),
                ("target_radius", self.target_radius),
                ("attack_turn_rate", self.attack_turn_rate),
                ("attack_windup", self.attack_windup),
                ("hit_window", self.hit_window),
                ("attack_recovery", self.attack_recovery),
                ("hitstun", self.hitstun),
                ("death_delay", self.death_delay),
            ],
        )
    }
}

/// Input sample for the current tick (written by the host, read-only here).
///
/// `movement` is a stick vector on the ground plane: `x` → world +X,
/// `y` → world +Z. Longer than 1 is clamped.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub movement: Vec2,
    /// Attack pressed this tick
    pub attack: bool,
}

/// Player behavior states.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    Control {
        moving: bool,
    },
    Attack {
        /// Nearest enemy at attack start (`None` → swing at the air)
        target: Option<Entity>,
        phase: AttackPhase,
        timer: Option<TimerHandle>,
    },
    Damage,
    Dead,
}

impl PlayerState {
    pub fn control() -> Self {
        Self::Control { moving: false }
    }

    pub fn attack() -> Self {
        Self::Attack {
            target: None,
            phase: AttackPhase::Ready,
            timer: None,
        }
    }
}

impl StateLabel for PlayerState {
    fn name(&self) -> &'static str {
        match self {
            PlayerState::Control { .. } => "Control",
            PlayerState::Attack { .. } => "Attack",
            PlayerState::Damage => "Damage",
            PlayerState::Dead => "Dead",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, PlayerState::Dead)
    }
}

/// Component: state machine of the player (initial state Control).
#[derive(Component, Debug, Deref, DerefMut)]
pub struct PlayerBrain(pub StateMachine<PlayerState>);

impl Default for PlayerBrain {
    fn default() -> Self {
        Self(StateMachine::new(PlayerState::control()))
    }
}
