//! Player state behaviors.

use bevy::prelude::*;

use crate::ai::{AttackPhase, BrainContext};
use crate::clock::{TimerAction, TimerHandle, TimerSignal};
use crate::fsm::{State, Transition};
use crate::movement::{look_at_flat, move_towards_angle, set_yaw, yaw, yaw_towards};
use crate::player::components::{PlayerInput, PlayerProfile, PlayerState};
use crate::presentation::{AnimationTrigger, PresentationEvent};

/// Player brain context: the shared actor context plus this tick's input.
pub struct PlayerContext<'a> {
    pub actor: BrainContext<'a, PlayerProfile>,
    pub input: PlayerInput,
}

impl<'a> State<PlayerContext<'a>> for PlayerState {
    fn enter(&mut self, ctx: &mut PlayerContext<'a>, _transition: &mut Transition<Self>) {
        let actor = &mut ctx.actor;
        let entity = actor.entity;

        match self {
            PlayerState::Control { .. } => {}
            PlayerState::Attack { target, timer, .. } => {
                *target = actor
                    .nearest_target(actor.profile.target_radius)
                    .map(|candidate| candidate.entity);
                actor.notify(PresentationEvent::AnimationTrigger {
                    entity,
                    trigger: AnimationTrigger::Attack,
                });
                let windup = actor.profile.attack_windup;
                *timer = Some(actor.schedule(windup, TimerAction::Signal(TimerSignal::WindupElapsed)));
            }
            PlayerState::Damage => {
                actor.notify(PresentationEvent::AnimationTrigger {
                    entity,
                    trigger: AnimationTrigger::Damage,
                });
                let hitstun = actor.profile.hitstun;
                actor.schedule(hitstun, TimerAction::Signal(TimerSignal::HitstunElapsed));
            }
            PlayerState::Dead => {
                actor.notify(PresentationEvent::DeathSequence { entity });
                let delay = actor.profile.death_delay;
                actor.schedule(delay, TimerAction::ConcludeDefeat);
            }
        }
    }

    fn update(&mut self, ctx: &mut PlayerContext<'a>, transition: &mut Transition<Self>) {
        match self {
            PlayerState::Control { moving } => update_control(moving, ctx, transition),
            PlayerState::Attack {
                target,
                phase,
                timer,
            } => update_attack(*target, phase, timer, &mut ctx.actor, transition),
            PlayerState::Damage => {
                if ctx.actor.fired(TimerSignal::HitstunElapsed) {
                    transition.to(PlayerState::control());
                }
            }
            PlayerState::Dead => {}
        }
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'a>) {
        let actor = &mut ctx.actor;
        match self {
            PlayerState::Control { moving: true } => {
                let entity = actor.entity;
                actor.notify(PresentationEvent::MovingChanged {
                    entity,
                    moving: false,
                });
            }
            PlayerState::Attack { timer, .. } => {
                if let Some(handle) = timer.take() {
                    actor.cancel(handle);
                }
                actor.hit_volume.deactivate();
            }
            _ => {}
        }
    }
}

fn update_control(
    moving: &mut bool,
    ctx: &mut PlayerContext<'_>,
    transition: &mut Transition<PlayerState>,
) {
    if ctx.input.attack {
        transition.to(PlayerState::attack());
        return;
    }

    let actor = &mut ctx.actor;
    let movement = ctx.input.movement.clamp_length_max(1.0);
    let now_moving = movement.length_squared() > 1e-6;

    if now_moving {
        let direction = Vec3::new(movement.x, 0.0, movement.y);
        let step = direction * actor.profile.max_speed * actor.delta();
        actor.transform.translation += step;
        let ahead = actor.transform.translation + direction;
        look_at_flat(actor.transform, ahead);
    }

    if now_moving != *moving {
        *moving = now_moving;
        let entity = actor.entity;
        actor.notify(PresentationEvent::MovingChanged {
            entity,
            moving: now_moving,
        });
    }
}

fn update_attack(
    target: Option<Entity>,
    phase: &mut AttackPhase,
    timer: &mut Option<TimerHandle>,
    actor: &mut BrainContext<'_, PlayerProfile>,
    transition: &mut Transition<PlayerState>,
) {
    let profile = actor.profile;

    // Track the target while it stays available
    if let Some(target) = target.and_then(|entity| actor.live_target(entity)) {
        if let Some(desired) = yaw_towards(actor.position(), target.position) {
            let turned = move_towards_angle(
                yaw(actor.transform),
                desired,
                profile.attack_turn_rate * actor.delta(),
            );
            set_yaw(actor.transform, turned);
        }
    }

    match phase {
        AttackPhase::Ready => {
            if !actor.fired(TimerSignal::WindupElapsed) {
                return;
            }

            let entity = actor.entity;
            actor.hit_volume.activate(profile.attack_power);
            actor.notify(PresentationEvent::AttackImpact {
                entity,
                power: profile.attack_power,
            });

            actor.schedule(profile.hit_window, TimerAction::DisableHitVolume);
            *timer = Some(actor.schedule(
                profile.hit_window + profile.attack_recovery,
                TimerAction::Signal(TimerSignal::RecoveryElapsed),
            ));
            *phase = AttackPhase::Rigid;
        }
        AttackPhase::Rigid => {
            if actor.fired(TimerSignal::RecoveryElapsed) {
                *timer = None;
                transition.to(PlayerState::control());
            }
        }
    }
}
