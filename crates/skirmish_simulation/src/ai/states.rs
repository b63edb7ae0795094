//! Enemy state behaviors (Enter / Update / Exit per `EnemyState` variant).

use bevy::prelude::*;

use crate::ai::components::{AttackPhase, DamageTaken, EnemyProfile, EnemyState};
use crate::ai::context::BrainContext;
use crate::clock::{TimerAction, TimerHandle, TimerSignal};
use crate::fsm::{State, Transition};
use crate::movement::{delta_angle, facing, move_towards_angle, set_yaw, yaw, yaw_towards};
use crate::presentation::{AnimationTrigger, PresentationEvent};

pub type EnemyContext<'a> = BrainContext<'a, EnemyProfile>;

impl<'a> State<EnemyContext<'a>> for EnemyState {
    fn enter(&mut self, ctx: &mut EnemyContext<'a>, transition: &mut Transition<Self>) {
        match self {
            EnemyState::Patrol => {}
            EnemyState::Pursue { .. } => {
                ctx.notify(PresentationEvent::MovingChanged {
                    entity: ctx.entity,
                    moving: true,
                });
            }
            EnemyState::Attack { timer, .. } => {
                ctx.notify(PresentationEvent::AnimationTrigger {
                    entity: ctx.entity,
                    trigger: AnimationTrigger::Attack,
                });
                let windup = ctx.profile.attack_windup;
                *timer = Some(ctx.schedule(windup, TimerAction::Signal(TimerSignal::WindupElapsed)));
            }
            EnemyState::Damage(taken) => enter_damage(*taken, ctx, transition),
            EnemyState::Dead => {
                ctx.notify(PresentationEvent::DeathSequence { entity: ctx.entity });
                let delay = ctx.profile.death_delay;
                ctx.schedule(delay, TimerAction::Despawn);
            }
        }
    }

    fn update(&mut self, ctx: &mut EnemyContext<'a>, transition: &mut Transition<Self>) {
        match self {
            EnemyState::Patrol => update_patrol(ctx, transition),
            EnemyState::Pursue { target } => update_pursue(*target, ctx, transition),
            EnemyState::Attack { phase, timer } => update_attack(phase, timer, ctx, transition),
            EnemyState::Damage(_) => {
                if ctx.fired(TimerSignal::KnockbackComplete) {
                    transition.to(EnemyState::Patrol);
                }
            }
            EnemyState::Dead => {}
        }
    }

    fn exit(&mut self, ctx: &mut EnemyContext<'a>) {
        match self {
            EnemyState::Pursue { .. } => {
                ctx.notify(PresentationEvent::MovingChanged {
                    entity: ctx.entity,
                    moving: false,
                });
            }
            EnemyState::Attack { timer, .. } => {
                if let Some(handle) = timer.take() {
                    ctx.cancel(handle);
                }
                ctx.hit_volume.deactivate();
            }
            _ => {}
        }
    }
}

// ============================================================================
// Patrol
// ============================================================================

fn update_patrol(ctx: &mut EnemyContext<'_>, transition: &mut Transition<EnemyState>) {
    if let Some(target) = ctx.nearest_target(ctx.profile.search_radius) {
        transition.to(EnemyState::Pursue {
            target: target.entity,
        });
    }
}

// ============================================================================
// Pursue
// ============================================================================

/// Turn toward the target, close in, attack once in range and facing it.
///
/// Target unavailable (despawned or dead) → nothing happens this tick.
fn update_pursue(
    target: Entity,
    ctx: &mut EnemyContext<'_>,
    transition: &mut Transition<EnemyState>,
) {
    let Some(target) = ctx.live_target(target) else {
        return;
    };

    let profile = ctx.profile;
    let delta = ctx.delta();
    let position = ctx.position();
    let distance = position.distance(target.position);

    let facing_target = match yaw_towards(position, target.position) {
        Some(desired) => {
            let turned = move_towards_angle(yaw(ctx.transform), desired, profile.turn_rate * delta);
            set_yaw(ctx.transform, turned);
            delta_angle(turned, desired).abs() <= profile.facing_tolerance
        }
        // Standing on the target: any heading counts
        None => true,
    };

    if distance <= profile.attack_range && facing_target {
        transition.to(EnemyState::attack());
        return;
    }

    if distance > profile.cancel_radius {
        transition.to(EnemyState::Patrol);
        return;
    }

    // Inside attack range but misaligned → turn in place
    if distance > profile.attack_range {
        let step = (profile.max_speed * delta).min(distance);
        let forward = facing(ctx.transform);
        ctx.transform.translation += forward * step;
    }
}

// ============================================================================
// Attack
// ============================================================================

fn update_attack(
    phase: &mut AttackPhase,
    timer: &mut Option<TimerHandle>,
    ctx: &mut EnemyContext<'_>,
    transition: &mut Transition<EnemyState>,
) {
    match phase {
        AttackPhase::Ready => {
            if !ctx.fired(TimerSignal::WindupElapsed) {
                return;
            }

            let profile = ctx.profile;
            ctx.hit_volume.activate(profile.attack_power);
            ctx.notify(PresentationEvent::AttackImpact {
                entity: ctx.entity,
                power: profile.attack_power,
            });

            ctx.schedule(profile.hit_window, TimerAction::DisableHitVolume);
            *timer = Some(ctx.schedule(
                profile.hit_window + profile.attack_recovery,
                TimerAction::Signal(TimerSignal::RecoveryElapsed),
            ));
            *phase = AttackPhase::Rigid;
        }
        AttackPhase::Rigid => {
            if ctx.fired(TimerSignal::RecoveryElapsed) {
                *timer = None;
                transition.to(EnemyState::Patrol);
            }
        }
    }
}

// ============================================================================
// Damage
// ============================================================================

/// Knockback away from the hit source; lethal hits go straight to Dead.
fn enter_damage(
    taken: DamageTaken,
    ctx: &mut EnemyContext<'_>,
    transition: &mut Transition<EnemyState>,
) {
    let profile = ctx.profile;
    let origin = ctx.position();
    let away = Vec3::new(origin.x - taken.source.x, 0.0, origin.z - taken.source.z)
        .normalize_or(-facing(ctx.transform));
    ctx.knockback.start(
        origin,
        origin + away * profile.knockback_distance,
        profile.knockback_duration,
    );

    crate::log(&format!(
        "AI: {:?} knocked back by {} damage{}",
        ctx.entity,
        taken.amount,
        if taken.lethal { " (lethal)" } else { "" }
    ));

    if taken.lethal {
        transition.to(EnemyState::Dead);
        return;
    }

    ctx.notify(PresentationEvent::AnimationTrigger {
        entity: ctx.entity,
        trigger: AnimationTrigger::Damage,
    });
    ctx.schedule(
        profile.knockback_duration,
        TimerAction::Signal(TimerSignal::KnockbackComplete),
    );
}
