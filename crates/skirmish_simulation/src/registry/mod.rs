//! Actor registry + spawning.
//!
//! Registry keeps enemies in spawn order (that order is the sensing
//! tie-break) and at most one player. Removal goes only through
//! [`ActorRegistry::remove`]: containment check, cancel every owned
//! callback, deferred despawn.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{EnemyBrain, EnemyProfile};
use crate::clock::Clock;
use crate::components::{Actor, Enemy, Faction, Health};
use crate::config::EncounterConfig;
use crate::player::{Player, PlayerBrain, PlayerProfile};
use crate::DeterministicRng;

#[derive(Resource, Debug, Default)]
pub struct ActorRegistry {
    enemies: Vec<Entity>,
    player: Option<Entity>,
}

impl ActorRegistry {
    pub fn register(&mut self, entity: Entity, faction: Faction) {
        match faction {
            Faction::Enemy => {
                if !self.enemies.contains(&entity) {
                    self.enemies.push(entity);
                }
            }
            Faction::Player => {
                if let Some(previous) = self.player.replace(entity) {
                    if previous != entity {
                        crate::logger::log_warning(&format!(
                            "Registry: player {:?} replaced by {:?}",
                            previous, entity
                        ));
                    }
                }
            }
        }
    }

    /// Registered enemies, spawn order.
    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Registered actors of `faction` (registry order).
    pub fn live(&self, faction: Faction) -> &[Entity] {
        match faction {
            Faction::Enemy => &self.enemies,
            Faction::Player => self.player.as_slice(),
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.player == Some(entity) || self.enemies.contains(&entity)
    }

    /// Remove `entity`: drop it from the registry, cancel its pending
    /// callbacks, queue the despawn.
    ///
    /// Returns `false` (and does nothing) if it was not registered.
    pub fn remove(&mut self, entity: Entity, clock: &mut Clock, commands: &mut Commands) -> bool {
        if !self.contains(entity) {
            crate::log(&format!("Registry: remove {:?} ignored (not registered)", entity));
            return false;
        }

        self.enemies.retain(|&e| e != entity);
        if self.player == Some(entity) {
            self.player = None;
        }

        let canceled = clock.cancel_owned(entity);
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }

        crate::log(&format!(
            "Registry: {:?} removed ({} callbacks canceled, {} enemies left)",
            entity,
            canceled,
            self.enemies.len()
        ));
        true
    }
}

// ============================================================================
// Spawning
// ============================================================================

/// Spawn an enemy with the configured default profile.
pub fn spawn_enemy(world: &mut World, position: Vec3) -> Entity {
    let profile = world
        .get_resource::<EncounterConfig>()
        .map(|config| config.enemy.clone())
        .unwrap_or_default();
    spawn_enemy_with(world, position, profile)
}

pub fn spawn_enemy_with(world: &mut World, position: Vec3, profile: EnemyProfile) -> Entity {
    let entity = world
        .spawn((
            Actor {
                faction: Faction::Enemy,
            },
            Enemy,
            Health::new(profile.max_health),
            Transform::from_translation(position),
            EnemyBrain::default(),
            profile,
        ))
        .id();

    world
        .get_resource_or_insert_with(ActorRegistry::default)
        .register(entity, Faction::Enemy);

    crate::log(&format!("Spawn: enemy {:?} at {:?}", entity, position));
    entity
}

/// Spawn the player with the configured default profile.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    let profile = world
        .get_resource::<EncounterConfig>()
        .map(|config| config.player.clone())
        .unwrap_or_default();
    spawn_player_with(world, position, profile)
}

pub fn spawn_player_with(world: &mut World, position: Vec3, profile: PlayerProfile) -> Entity {
    let entity = world
        .spawn((
            Actor {
                faction: Faction::Player,
            },
            Player,
            Health::new(profile.max_health),
            Transform::from_translation(position),
            PlayerBrain::default(),
            profile,
        ))
        .id();

    world
        .get_resource_or_insert_with(ActorRegistry::default)
        .register(entity, Faction::Player);

    crate::log(&format!("Spawn: player {:?} at {:?}", entity, position));
    entity
}

/// Wave ring used by the demo: inside the default enemy search radius (5 m),
/// so a stationary player gets engaged.
pub const WAVE_MIN_RADIUS: f32 = 2.0;
pub const WAVE_MAX_RADIUS: f32 = 4.0;

/// `count` points on the XZ plane, `min_radius..max_radius` away from
/// `center`. Same seed → same points.
pub fn scatter_spawn_points(
    rng: &mut DeterministicRng,
    center: Vec3,
    count: usize,
    min_radius: f32,
    max_radius: f32,
) -> Vec<Vec3> {
    let max_radius = max_radius.max(min_radius);

    (0..count)
        .map(|_| {
            let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = if max_radius > min_radius {
                rng.rng.gen_range(min_radius..max_radius)
            } else {
                min_radius
            };
            center + Vec3::new(angle.sin(), 0.0, angle.cos()) * distance
        })
        .collect()
}
