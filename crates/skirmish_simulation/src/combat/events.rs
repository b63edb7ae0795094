//! Combat events.

use bevy::prelude::*;

use crate::combat::HitRegion;

/// Event: hit-volume of `attacker` touched the hurt-volume of `target`.
///
/// Written by `detect_hits` (or injected by the host), consumed exactly once
/// by `resolve_attack_events`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackEvent {
    pub attacker: Entity,
    pub power: u32,
    /// Where the hit came from
    pub source: HitRegion,
    pub target: Entity,
}
