//! Sensing: nearest live target of the opposing faction.
//!
//! Brains work from a per-tick snapshot (`Vec<Candidate>`) built in registry
//! order, so despawns queued during the tick can't disturb a scan and the
//! tie-break stays deterministic.
//!
//! Linear scan, O(N) per query: fine for encounter-sized actor counts.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

use crate::components::Health;

/// Snapshot of one potential target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
    pub alive: bool,
}

/// Live candidate closest to `center` with `distance ≤ radius`.
///
/// Ties keep the first candidate in iteration order.
pub fn nearest_target<I>(center: Vec3, radius: f32, candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut nearest: Option<(f32, Candidate)> = None;

    for candidate in candidates {
        if !candidate.alive {
            continue;
        }

        let distance = candidate.position.distance(center);
        if distance > radius {
            continue;
        }

        // Strict `<` → first encountered wins on ties
        let closer = match nearest {
            Some((best, _)) => distance < best,
            None => true,
        };
        if closer {
            nearest = Some((distance, candidate));
        }
    }

    nearest.map(|(_, candidate)| candidate)
}

/// Look up a live candidate by entity ("target unavailable" → `None`).
pub fn live_candidate(candidates: &[Candidate], entity: Entity) -> Option<Candidate> {
    candidates
        .iter()
        .find(|candidate| candidate.entity == entity && candidate.alive)
        .copied()
}

/// Per-tick snapshot of `entities` (registry order). Entities already
/// despawned are left out.
pub fn snapshot<F: QueryFilter>(
    entities: &[Entity],
    actors: &Query<(&Transform, &Health), F>,
) -> Vec<Candidate> {
    entities
        .iter()
        .filter_map(|&entity| {
            let (transform, health) = actors.get(entity).ok()?;
            Some(Candidate {
                entity,
                position: transform.translation,
                alive: health.is_alive(),
            })
        })
        .collect()
}
