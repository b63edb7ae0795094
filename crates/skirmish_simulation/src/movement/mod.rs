//! Heading and planar motion helpers.
//!
//! Convention: heading is a yaw angle about +Y, yaw 0 faces +Z, so
//! `facing = rotation * Vec3::Z = (sin yaw, 0, cos yaw)`.

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Planar (XZ) forward vector of `transform`.
pub fn facing(transform: &Transform) -> Vec3 {
    let forward = transform.rotation * Vec3::Z;
    Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::Z)
}

/// Current yaw of `transform` (radians).
pub fn yaw(transform: &Transform) -> f32 {
    let forward = facing(transform);
    forward.x.atan2(forward.z)
}

pub fn set_yaw(transform: &mut Transform, yaw: f32) {
    transform.rotation = Quat::from_rotation_y(yaw);
}

/// Yaw that faces from `from` towards `to`; `None` when they coincide on XZ.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let direction = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if direction.length_squared() < 1e-8 {
        return None;
    }
    Some(direction.x.atan2(direction.z))
}

/// Signed shortest difference `to - from`, wrapped into [-PI, PI).
pub fn delta_angle(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Rotate `current` towards `target` by at most `max_delta` radians.
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta * delta.signum()
    }
}

/// Snap the heading of `transform` toward `point` (no-op if degenerate).
pub fn look_at_flat(transform: &mut Transform, point: Vec3) {
    if let Some(target) = yaw_towards(transform.translation, point) {
        set_yaw(transform, target);
    }
}
