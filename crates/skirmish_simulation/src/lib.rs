//! Skirmish Simulation Core
//!
//! Actor behavior engine для real-time melee encounter'а на Bevy 0.16.
//!
//! - `fsm`: generic Enter/Update/Exit state machine с deferred transitions
//! - `ai` / `player`: behavior graphs врагов и игрока
//! - `combat`: hit detection, damage resolution (interrupt + exactly-once death)
//! - `clock`: simulation time + per-actor cancelable callbacks
//! - `sensing`: nearest live target противоположной фракции
//!
//! Rendering, input devices, UI, audio: снаружи. Хост пишет `PlayerInput`
//! и читает `PresentationEvent` / `EncounterEnded`.

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod encounter;
pub mod fsm;
pub mod logger;
pub mod movement;
pub mod player;
pub mod presentation;
pub mod registry;
pub mod sensing;

// Re-export базовых типов для удобства
pub use ai::{EnemyBrain, EnemyProfile, EnemyState};
pub use clock::{Clock, TimerAction, TimerHandle, TimerSignal};
pub use combat::{resolve_damage, AttackEvent, DamageOutcome, HitRegion};
pub use components::*;
pub use config::{ConfigError, EncounterConfig};
pub use encounter::{Encounter, EncounterEnded, EncounterOutcome};
pub use logger::{init_logger, log};
pub use player::{Player, PlayerBrain, PlayerInput, PlayerProfile, PlayerState};
pub use presentation::{AnimationTrigger, PresentationEvent};
pub use registry::{
    scatter_spawn_points, spawn_enemy, spawn_enemy_with, spawn_player, spawn_player_with, ActorRegistry,
    WAVE_MAX_RADIUS, WAVE_MIN_RADIUS,
};

/// Schedule одного simulation tick'а (single-threaded, строгий порядок).
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncounterTick;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Порядок выполнения внутри `EncounterTick`:
/// 1. fire_due_callbacks: callbacks срабатывают ДО любых state updates
/// 2. detect_hits: hit-volume ∩ hurt-volume → AttackEvent
/// 3. resolve_attack_events: damage, cancel callbacks цели, forced transition
/// 4. process_player_brain
/// 5. process_enemy_brains: spawn order
/// 6. advance_knockback
/// 7. update_encounter: time limit / cleared
pub struct EncounterPlugin {
    pub config: EncounterConfig,
}

impl EncounterPlugin {
    pub fn new(config: EncounterConfig) -> Self {
        Self { config }
    }
}

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(Encounter::new(self.config.time_limit))
            .insert_resource(self.config.clone())
            .init_resource::<Clock>()
            .init_resource::<ActorRegistry>()
            .init_resource::<PlayerInput>()
            // Регистрация событий
            .add_event::<AttackEvent>()
            .add_event::<PresentationEvent>()
            .add_event::<EncounterEnded>()
            .init_schedule(EncounterTick)
            .edit_schedule(EncounterTick, |schedule| {
                schedule.set_executor_kind(ExecutorKind::SingleThreaded);
            })
            .add_systems(
                EncounterTick,
                (
                    clock::fire_due_callbacks,
                    combat::detect_hits,
                    combat::resolve_attack_events,
                    player::process_player_brain,
                    ai::process_enemy_brains,
                    combat::advance_knockback,
                    encounter::update_encounter,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            )
            .add_systems(FixedUpdate, run_encounter_tick);
    }
}

/// Advance the simulation by one tick of `delta` seconds.
///
/// For hosts that own their loop (and tests). Outside of `App::update`
/// nobody else swaps the event buffers, so this does it after the tick:
/// events written during tick N stay readable until the end of tick N+1.
pub fn tick(world: &mut World, delta: f32) {
    run_tick(world, delta);

    update_events::<AttackEvent>(world);
    update_events::<PresentationEvent>(world);
    update_events::<EncounterEnded>(world);
}

fn run_tick(world: &mut World, delta: f32) {
    let Some(mut clock) = world.get_resource_mut::<Clock>() else {
        logger::log_error("tick: Clock resource missing (EncounterPlugin not added?)");
        return;
    };
    clock.advance(delta);

    if let Err(error) = world.try_run_schedule(EncounterTick) {
        logger::log_error(&format!("tick: {}", error));
    }
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Система (FixedUpdate): one `EncounterTick` per fixed step.
///
/// Event buffers are left to the App's own `First`-stage update here.
fn run_encounter_tick(world: &mut World) {
    let delta = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.delta_secs())
        .unwrap_or_default();
    run_tick(world, delta);
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Config is validated first; nothing is built for an invalid one.
pub fn create_headless_app(config: EncounterConfig) -> Result<App, ConfigError> {
    config.validate()?;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EncounterPlugin::new(config));

    Ok(app)
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
