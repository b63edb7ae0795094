//! Enemy tuning profile.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{non_negative, ConfigError};

/// Параметры врага (движение, дистанции, тайминги атаки)
///
/// Defaults follow the shipped enemy: 30 HP, 20 damage swing, gives up the
/// chase at the same distance it starts it.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyProfile {
    pub max_health: u32,
    /// Linear speed while pursuing (m/s)
    pub max_speed: f32,
    /// Angular speed while pursuing (rad/s)
    pub turn_rate: f32,
    /// Max facing error that still allows an attack (rad)
    pub facing_tolerance: f32,
    /// Patrol → Pursue distance
    pub search_radius: f32,
    /// Pursue → Patrol distance
    pub cancel_radius: f32,
    pub attack_range: f32,
    pub attack_power: u32,
    /// Attack start → impact (seconds)
    pub attack_windup: f32,
    /// Hit-volume active time after impact (seconds)
    pub hit_window: f32,
    /// Rigid time after the hit window closes (seconds)
    pub attack_recovery: f32,
    pub knockback_distance: f32,
    pub knockback_duration: f32,
    /// Dead → despawn (seconds)
    pub death_delay: f32,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            max_health: 30,
            max_speed: 2.0,
            turn_rate: 3.0 * std::f32::consts::PI, // 540°/s
            facing_tolerance: 15f32.to_radians(),
            search_radius: 5.0,
            cancel_radius: 5.0,
            attack_range: 1.5,
            attack_power: 20,
            attack_windup: 0.5,
            hit_window: 0.1,
            attack_recovery: 1.0,
            knockback_distance: 1.2,
            knockback_duration: 0.5,
            death_delay: 2.0,
        }
    }
}

impl EnemyProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealth { profile: "enemy" });
        }

        non_negative(
            "enemy",
            &[
                ("max_speed", self.max_speed),
                ("turn_rate", self.turn_rate),
                ("facing_tolerance", self.facing_tolerance),
                ("search_radius", self.search_radius),
                ("cancel_radius", self.cancel_radius),
                ("attack_range", self.attack_range),
                ("attack_windup", self.attack_windup),
                ("hit_window", self.hit_window),
                ("attack_recovery", self.attack_recovery),
                ("knockback_distance", self.knockback_distance),
                ("knockback_duration", self.knockback_duration),
                ("death_delay", self.death_delay),
            ],
        )?;

        if self.cancel_radius < self.attack_range {
            return Err(ConfigError::CancelInsideAttackRange {
                cancel: self.cancel_radius,
                attack: self.attack_range,
            });
        }

        Ok(())
    }
}
