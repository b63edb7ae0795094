//! Knockback tween system.

use bevy::prelude::*;

use crate::clock::Clock;
use crate::combat::Knockback;

/// Система: advance active knockback tweens by the tick delta.
pub fn advance_knockback(mut actors: Query<(&mut Knockback, &mut Transform)>, clock: Res<Clock>) {
    for (mut knockback, mut transform) in actors.iter_mut() {
        if !knockback.is_active() {
            continue;
        }
        if let Some(position) = knockback.advance(clock.delta()) {
            transform.translation = position;
        }
    }
}
