//! Player combat loop tests.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::BrainContext;
    use crate::clock::{Clock, TimerAction, TimerInbox};
    use crate::combat::{HitVolume, Knockback};
    use crate::fsm::StateMachine;
    use crate::movement::{facing, yaw, yaw_towards};
    use crate::player::{PlayerBrain, PlayerContext, PlayerInput, PlayerProfile, PlayerState};
    use crate::presentation::PresentationEvent;
    use crate::sensing::Candidate;

    const DT: f32 = 1.0 / 64.0;

    struct Rig {
        entity: Entity,
        transform: Transform,
        profile: PlayerProfile,
        hit_volume: HitVolume,
        knockback: Knockback,
        inbox: TimerInbox,
        clock: Clock,
        targets: Vec<Candidate>,
        presentation: Vec<PresentationEvent>,
        input: PlayerInput,
        defeated: bool,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                entity: Entity::from_raw(1),
                transform: Transform::default(),
                profile: PlayerProfile::default(),
                hit_volume: HitVolume::default(),
                knockback: Knockback::default(),
                inbox: TimerInbox::default(),
                clock: Clock::default(),
                targets: Vec::new(),
                presentation: Vec::new(),
                input: PlayerInput::default(),
                defeated: false,
            }
        }

        fn tick(&mut self, brain: &mut PlayerBrain) {
            self.clock.advance(DT);
            for callback in self.clock.drain_due() {
                match callback.action {
                    TimerAction::Signal(signal) => self.inbox.push(signal),
                    TimerAction::DisableHitVolume => self.hit_volume.deactivate(),
                    TimerAction::ConcludeDefeat => self.defeated = true,
                    TimerAction::Despawn => {}
                }
            }

            let mut ctx = PlayerContext {
                actor: BrainContext {
                    entity: self.entity,
                    transform: &mut self.transform,
                    profile: &self.profile,
                    hit_volume: &mut self.hit_volume,
                    knockback: &mut self.knockback,
                    inbox: &mut self.inbox,
                    clock: &mut self.clock,
                    targets: &self.targets,
                    presentation: &mut self.presentation,
                },
                input: self.input,
            };
            brain.process(&mut ctx);
            self.inbox.clear();
        }

        fn run(&mut self, brain: &mut PlayerBrain, ticks: usize) {
            for _ in 0..ticks {
                self.tick(brain);
            }
        }

        fn moving_flags(&self) -> Vec<bool> {
            self.presentation
                .iter()
                .filter_map(|event| match event {
                    PresentationEvent::MovingChanged { moving, .. } => Some(*moving),
                    _ => None,
                })
                .collect()
        }
    }

    fn enemy(index: u32, position: Vec3) -> Candidate {
        Candidate {
            entity: Entity::from_raw(index),
            position,
            alive: true,
        }
    }

    #[test]
    fn test_control_moves_and_faces_stick_direction() {
        let mut rig = Rig::new();
        let mut brain = PlayerBrain::default();
        rig.tick(&mut brain); // enter Control

        rig.input.movement = Vec2::new(1.0, 0.0);
        rig.run(&mut brain, 64);

        // 5 m/s for one second along +X
        assert!((rig.transform.translation - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-3);
        assert!((facing(&rig.transform) - Vec3::X).length() < 1e-4);

        rig.input.movement = Vec2::ZERO;
        rig.run(&mut brain, 3);
        assert_eq!(rig.moving_flags(), vec![true, false]);
    }

    #[test]
    fn test_control_clamps_stick_length() {
        let mut rig = Rig::new();
        let mut brain = PlayerBrain::default();
        rig.tick(&mut brain);

        rig.input.movement = Vec2::new(0.0, 3.0);
        rig.run(&mut brain, 64);
        assert!((rig.transform.translation.z - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_attack_tracks_nearest_enemy_and_returns_to_control() {
        let mut rig = Rig::new();
        let near = Vec3::new(3.0, 0.0, 0.0);
        rig.targets = vec![enemy(5, Vec3::new(0.0, 0.0, -3.9)), enemy(4, near)];
        let mut brain = PlayerBrain::default();
        rig.tick(&mut brain);

        rig.input.attack = true;
        rig.tick(&mut brain); // request
        rig.input.attack = false;
        rig.tick(&mut brain); // install
        rig.tick(&mut brain); // enter: picks target

        match brain.active() {
            PlayerState::Attack { target, .. } => assert_eq!(*target, Some(Entity::from_raw(4))),
            other => panic!("expected Attack, got {:?}", other),
        }

        // Windup 0.25 s = 16 ticks after enter; turning is done well before
        rig.run(&mut brain, 16);
        assert!(rig.hit_volume.active);
        assert_eq!(rig.hit_volume.power, 10);
        let desired = yaw_towards(Vec3::ZERO, near).unwrap();
        assert!((yaw(&rig.transform) - desired).abs() < 1e-4);

        // Hit window 0.1 s then back to Control
        rig.run(&mut brain, 10);
        assert!(brain.is_in_state("Control"));
        assert!(!rig.hit_volume.active);
    }

    #[test]
    fn test_attack_without_target_still_swings() {
        let mut rig = Rig::new();
        rig.targets = vec![enemy(4, Vec3::new(0.0, 0.0, 4.5))];
        let mut brain = PlayerBrain(StateMachine::new(PlayerState::attack()));

        rig.tick(&mut brain);
        match brain.active() {
            PlayerState::Attack { target, .. } => assert_eq!(*target, None),
            other => panic!("expected Attack, got {:?}", other),
        }

        rig.run(&mut brain, 16);
        assert!(rig
            .presentation
            .contains(&PresentationEvent::AttackImpact {
                entity: rig.entity,
                power: 10
            }));
    }

    #[test]
    fn test_hitstun_returns_to_control() {
        let mut rig = Rig::new();
        let mut brain = PlayerBrain(StateMachine::new(PlayerState::Damage));

        // Enter at tick 1, hitstun 0.5 s
        rig.run(&mut brain, 32);
        assert!(brain.is_in_state("Damage"));
        rig.run(&mut brain, 2);
        assert!(brain.is_in_state("Control"));
    }

    #[test]
    fn test_dead_concludes_defeat_after_delay() {
        let mut rig = Rig::new();
        let mut brain = PlayerBrain(StateMachine::new(PlayerState::Dead));

        rig.tick(&mut brain);
        assert!(rig
            .presentation
            .contains(&PresentationEvent::DeathSequence { entity: rig.entity }));
        assert!(!brain.transition(PlayerState::control()));

        rig.run(&mut brain, 127);
        assert!(!rig.defeated);
        rig.tick(&mut brain);
        assert!(rig.defeated);
    }
}
