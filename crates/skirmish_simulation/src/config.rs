//! Encounter configuration (tick rate, time limit, actor profiles).
//!
//! Host engine may deserialize this from its own data files; the simulation
//! only validates it once, at app creation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::EnemyProfile;
use crate::player::PlayerProfile;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(f64),

    #[error("time limit must be positive, got {0}")]
    InvalidTimeLimit(f32),

    #[error("{profile}.{field} must be non-negative, got {value}")]
    NegativeValue {
        profile: &'static str,
        field: &'static str,
        value: f32,
    },

    #[error("{profile}.max_health must be positive")]
    ZeroHealth { profile: &'static str },

    #[error("enemy cancel_radius ({cancel}) must not be smaller than attack_range ({attack})")]
    CancelInsideAttackRange { cancel: f32, attack: f32 },
}

/// Параметры encounter'а (глобальные + профили по умолчанию)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// FixedUpdate rate (ticks per second)
    pub tick_hz: f64,
    /// Round time limit (seconds)
    pub time_limit: f32,
    /// Seed of the `DeterministicRng` (spawn scatter)
    pub seed: u64,
    pub enemy: EnemyProfile,
    pub player: PlayerProfile,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            tick_hz: 64.0,
            time_limit: 60.0,
            seed: 42,
            enemy: EnemyProfile::default(),
            player: PlayerProfile::default(),
        }
    }
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_hz));
        }
        if !(self.time_limit > 0.0) {
            return Err(ConfigError::InvalidTimeLimit(self.time_limit));
        }
        self.enemy.validate()?;
        self.player.validate()?;
        Ok(())
    }
}

/// Shared check for profile fields that are distances or durations.
pub(crate) fn non_negative(
    profile: &'static str,
    fields: &[(&'static str, f32)],
) -> Result<(), ConfigError> {
    for &(field, value) in fields {
        if !(value >= 0.0) {
            return Err(ConfigError::NegativeValue {
                profile,
                field,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(EncounterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_tick_rate_and_time_limit() {
        let config = EncounterConfig {
            tick_hz: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickRate(0.0)));

        let config = EncounterConfig {
            time_limit: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeLimit(-1.0)));
    }

    #[test]
    fn test_rejects_negative_profile_fields() {
        let mut config = EncounterConfig::default();
        config.enemy.attack_windup = -0.5;

        let err = config.validate().expect_err("negative windup");
        assert!(matches!(
            err,
            ConfigError::NegativeValue {
                profile: "enemy",
                field: "attack_windup",
                ..
            }
        ));
        assert_eq!(err.to_string(), "enemy.attack_windup must be non-negative, got -0.5");
    }

    #[test]
    fn test_rejects_cancel_radius_inside_attack_range() {
        let mut config = EncounterConfig::default();
        config.enemy.cancel_radius = 1.0;
        config.enemy.attack_range = 1.5;

        assert_eq!(
            config.validate(),
            Err(ConfigError::CancelInsideAttackRange {
                cancel: 1.0,
                attack: 1.5
            })
        );
    }
}
