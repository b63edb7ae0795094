//! Knockback motion (ease-out cubic slide away from the hit source).

use bevy::prelude::*;

/// Active knockback tween. `motion == None` → actor is not being pushed.
///
/// Completion is NOT signalled from here: the Damage state schedules its own
/// `KnockbackComplete` callback with the same duration.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Knockback {
    pub motion: Option<KnockbackMotion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct KnockbackMotion {
    pub from: Vec3,
    pub to: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl Knockback {
    /// Start (or restart) a slide from `from` to `to` over `duration` seconds.
    pub fn start(&mut self, from: Vec3, to: Vec3, duration: f32) {
        self.motion = Some(KnockbackMotion {
            from,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    pub fn is_active(&self) -> bool {
        self.motion.is_some()
    }

    /// Advance by `delta`; returns the new position while the tween runs.
    pub fn advance(&mut self, delta: f32) -> Option<Vec3> {
        let motion = self.motion.as_mut()?;
        motion.elapsed += delta;

        let t = if motion.duration <= 0.0 {
            1.0
        } else {
            (motion.elapsed / motion.duration).clamp(0.0, 1.0)
        };
        let position = motion.from.lerp(motion.to, ease_out_cubic(t));

        if t >= 1.0 {
            self.motion = None;
        }
        Some(position)
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
