//! Headless skirmish demo
//!
//! Спавнит игрока и волну врагов, прогоняет encounter фиксированными тиками
//! со скриптованным input'ом и печатает исход.

use bevy::prelude::*;
use skirmish_simulation::{
    create_headless_app, scatter_spawn_points, spawn_enemy, spawn_player, tick, DeterministicRng,
    Encounter, EncounterConfig, EncounterEnded, Health, PlayerInput, WAVE_MAX_RADIUS,
    WAVE_MIN_RADIUS,
};

const WAVE_SIZE: usize = 3;

fn main() {
    let config = EncounterConfig::default();
    let dt = (1.0 / config.tick_hz) as f32;
    let max_ticks = (config.time_limit / dt).ceil() as usize + 1;
    println!("Starting skirmish headless simulation (seed: {})", config.seed);

    let mut app = match create_headless_app(config) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("Invalid encounter config: {}", error);
            std::process::exit(1);
        }
    };

    let world = app.world_mut();
    let player = spawn_player(world, Vec3::ZERO);
    let points = world.resource_scope(|_, mut rng: Mut<DeterministicRng>| {
        scatter_spawn_points(&mut rng, Vec3::ZERO, WAVE_SIZE, WAVE_MIN_RADIUS, WAVE_MAX_RADIUS)
    });
    for point in points {
        spawn_enemy(world, point);
    }

    for tick_index in 0..max_ticks {
        // Script: stand still, swing twice per second
        world.insert_resource(PlayerInput {
            movement: Vec2::ZERO,
            attack: tick_index % 32 == 0,
        });
        tick(world, dt);

        let ended: Vec<EncounterEnded> = world
            .resource_mut::<Events<EncounterEnded>>()
            .drain()
            .collect();
        if let Some(ended) = ended.first() {
            println!("Encounter ended: {:?} after {:.2}s", ended.outcome, ended.elapsed);
            break;
        }

        if tick_index % 320 == 0 {
            let health = world
                .get::<Health>(player)
                .map(|h| format!("{}/{} ({:.0}%)", h.current, h.max, h.fraction() * 100.0))
                .unwrap_or_default();
            println!(
                "Tick {}: player hp {}, {:.1}s left",
                tick_index,
                health,
                world.resource::<Encounter>().remaining()
            );
        }
    }

    println!("Simulation complete!");
}
