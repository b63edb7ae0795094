//! Hit-volume (attacker side) and hurt-volume (receiver side).
//!
//! Hit-volume: sphere in front of the attacker, active only for the short
//! window after an impact. Hurt-volume: vertical capsule around the actor.

use bevy::prelude::*;

use crate::movement::facing;

/// Spatial region of an attack (where the hit came from).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HitRegion {
    pub center: Vec3,
    pub radius: f32,
}

/// Attack contact volume.
///
/// `struck` tracks receivers already hit by the current activation, so one
/// swing produces at most one `AttackEvent` per target.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitVolume {
    pub active: bool,
    /// Damage carried by the current activation
    pub power: u32,
    /// Distance in front of the actor (meters)
    pub reach: f32,
    pub radius: f32,
    /// Height of the sphere center above the actor origin
    pub lift: f32,
    pub struck: Vec<Entity>,
}

impl Default for HitVolume {
    fn default() -> Self {
        Self {
            active: false,
            power: 0,
            reach: 1.0,
            radius: 0.6,
            lift: 0.9,
            struck: Vec::new(),
        }
    }
}

impl HitVolume {
    /// Open a new activation with `power`.
    pub fn activate(&mut self, power: u32) {
        self.active = true;
        self.power = power;
        self.struck.clear();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// World-space region for an attacker at `transform`.
    pub fn region(&self, transform: &Transform) -> HitRegion {
        HitRegion {
            center: transform.translation + facing(transform) * self.reach + Vec3::Y * self.lift,
            radius: self.radius,
        }
    }
}

/// Receiver volume: vertical capsule from the origin up to `height`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HurtVolume {
    pub radius: f32,
    pub height: f32,
}

impl Default for HurtVolume {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.8,
        }
    }
}

impl HurtVolume {
    /// Closest point of the capsule surface to `point` (the point itself if
    /// it is inside).
    pub fn closest_point(&self, origin: Vec3, point: Vec3) -> Vec3 {
        let axis_y = point.y.clamp(origin.y, origin.y + self.height);
        let on_axis = Vec3::new(origin.x, axis_y, origin.z);

        let offset = point - on_axis;
        let distance = offset.length();
        if distance <= self.radius {
            return point;
        }

        on_axis + offset / distance * self.radius
    }

    /// Does `region` touch this capsule?
    pub fn overlaps(&self, origin: Vec3, region: &HitRegion) -> bool {
        self.closest_point(origin, region.center).distance(region.center) <= region.radius
    }
}
