//! Enemy behavior graph tests (brain driven without an App).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::{BrainContext, DamageTaken, EnemyBrain, EnemyProfile, EnemyState};
    use crate::clock::{Clock, TimerAction, TimerInbox};
    use crate::combat::{HitVolume, Knockback};
    use crate::fsm::{StateLabel, StateMachine};
    use crate::movement::{delta_angle, yaw, yaw_towards};
    use crate::presentation::PresentationEvent;
    use crate::sensing::Candidate;

    const DT: f32 = 1.0 / 64.0;

    /// One enemy plus the pieces of world it touches.
    struct Rig {
        entity: Entity,
        transform: Transform,
        profile: EnemyProfile,
        hit_volume: HitVolume,
        knockback: Knockback,
        inbox: TimerInbox,
        clock: Clock,
        targets: Vec<Candidate>,
        presentation: Vec<PresentationEvent>,
        despawned: bool,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                entity: Entity::from_raw(1),
                transform: Transform::default(),
                profile: EnemyProfile::default(),
                hit_volume: HitVolume::default(),
                knockback: Knockback::default(),
                inbox: TimerInbox::default(),
                clock: Clock::default(),
                targets: Vec::new(),
                presentation: Vec::new(),
                despawned: false,
            }
        }

        /// Same order as a real tick: clock, due callbacks, brain.
        fn tick(&mut self, brain: &mut EnemyBrain) {
            self.clock.advance(DT);
            for callback in self.clock.drain_due() {
                match callback.action {
                    TimerAction::Signal(signal) => self.inbox.push(signal),
                    TimerAction::DisableHitVolume => self.hit_volume.deactivate(),
                    TimerAction::Despawn => self.despawned = true,
                    TimerAction::ConcludeDefeat => {}
                }
            }

            let mut ctx = BrainContext {
                entity: self.entity,
                transform: &mut self.transform,
                profile: &self.profile,
                hit_volume: &mut self.hit_volume,
                knockback: &mut self.knockback,
                inbox: &mut self.inbox,
                clock: &mut self.clock,
                targets: &self.targets,
                presentation: &mut self.presentation,
            };
            brain.process(&mut ctx);
            self.inbox.clear();
        }

        fn run(&mut self, brain: &mut EnemyBrain, ticks: usize) {
            for _ in 0..ticks {
                self.tick(brain);
            }
        }

        /// Ticks until `name` becomes active (None if it never does).
        fn run_until(&mut self, brain: &mut EnemyBrain, name: &str, max_ticks: usize) -> Option<usize> {
            (1..=max_ticks).find(|_| {
                self.tick(brain);
                brain.is_in_state(name)
            })
        }
    }

    fn player_at(position: Vec3) -> Candidate {
        Candidate {
            entity: Entity::from_raw(2),
            position,
            alive: true,
        }
    }

    fn brain_in(state: EnemyState) -> EnemyBrain {
        EnemyBrain(StateMachine::new(state))
    }

    #[test]
    fn test_patrol_spots_target_inside_search_radius() {
        let mut rig = Rig::new();
        rig.targets = vec![player_at(Vec3::new(0.0, 0.0, 5.01))];
        let mut brain = EnemyBrain::default();

        rig.run(&mut brain, 10);
        assert!(brain.is_in_state("Patrol"));

        rig.targets[0].position = Vec3::new(0.0, 0.0, 4.0);
        rig.tick(&mut brain);
        // Request is deferred by one tick
        assert!(brain.is_in_state("Patrol"));
        assert_eq!(brain.pending().map(|s| s.name()), Some("Pursue"));

        rig.tick(&mut brain);
        assert_eq!(
            brain.active(),
            &EnemyState::Pursue {
                target: Entity::from_raw(2)
            }
        );
    }

    #[test]
    fn test_patrol_ignores_dead_targets() {
        let mut rig = Rig::new();
        rig.targets = vec![Candidate {
            alive: false,
            ..player_at(Vec3::new(0.0, 0.0, 1.0))
        }];
        let mut brain = EnemyBrain::default();

        rig.run(&mut brain, 10);
        assert!(brain.is_in_state("Patrol"));
    }

    #[test]
    fn test_pursue_in_range_but_facing_away_turns_in_place() {
        let mut rig = Rig::new();
        // Enemy faces +Z, target 1 m behind it
        let target = Vec3::new(0.0, 0.0, -1.0);
        rig.targets = vec![player_at(target)];
        let mut brain = brain_in(EnemyState::Pursue {
            target: Entity::from_raw(2),
        });

        rig.run(&mut brain, 10);
        assert!(brain.is_in_state("Pursue"));
        assert_eq!(rig.transform.translation, Vec3::ZERO);

        let ticks = rig.run_until(&mut brain, "Attack", 40);
        assert!(ticks.is_some(), "never aligned enough to attack");

        let desired = yaw_towards(Vec3::ZERO, target).unwrap();
        let error = delta_angle(yaw(&rig.transform), desired).abs();
        assert!(error <= rig.profile.facing_tolerance + 1e-4, "facing error {}", error);
        assert_eq!(rig.transform.translation, Vec3::ZERO);
    }

    #[test]
    fn test_pursue_closes_distance_then_attacks() {
        let mut rig = Rig::new();
        let target = Vec3::new(0.0, 0.0, 3.0);
        rig.targets = vec![player_at(target)];
        let mut brain = brain_in(EnemyState::Pursue {
            target: Entity::from_raw(2),
        });

        assert!(rig.run_until(&mut brain, "Attack", 80).is_some());

        let distance = rig.transform.translation.distance(target);
        assert!(distance <= rig.profile.attack_range);
        assert!(distance > rig.profile.attack_range - 0.1, "overshot: {}", distance);

        let moving: Vec<bool> = rig
            .presentation
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::MovingChanged { moving, .. } => Some(*moving),
                _ => None,
            })
            .collect();
        assert_eq!(moving, vec![true, false]);
    }

    #[test]
    fn test_pursue_gives_up_beyond_cancel_radius() {
        let mut rig = Rig::new();
        rig.targets = vec![player_at(Vec3::new(0.0, 0.0, 5.5))];
        let mut brain = brain_in(EnemyState::Pursue {
            target: Entity::from_raw(2),
        });

        // enter, update (request), exit + install
        rig.run(&mut brain, 3);
        assert!(brain.is_in_state("Patrol"));
    }

    #[test]
    fn test_pursue_unavailable_target_skips_tick() {
        let mut rig = Rig::new();
        let mut brain = brain_in(EnemyState::Pursue {
            target: Entity::from_raw(9),
        });

        rig.run(&mut brain, 20);
        assert!(brain.is_in_state("Pursue"));
        assert_eq!(rig.transform.translation, Vec3::ZERO);
    }

    #[test]
    fn test_attack_timeline() {
        let mut rig = Rig::new();
        let mut brain = brain_in(EnemyState::attack());

        // Tick 1 enters; windup of 0.5 s = 32 ticks
        rig.run(&mut brain, 32);
        assert!(!rig.hit_volume.active);

        rig.tick(&mut brain);
        assert!(rig.hit_volume.active);
        assert_eq!(rig.hit_volume.power, 20);
        assert!(rig
            .presentation
            .contains(&PresentationEvent::AttackImpact {
                entity: rig.entity,
                power: 20
            }));

        // Hit window (0.1 s) closes well before recovery ends
        rig.run(&mut brain, 8);
        assert!(!rig.hit_volume.active);
        assert!(brain.is_in_state("Attack"));

        assert!(rig.run_until(&mut brain, "Patrol", 80).is_some());
        assert_eq!(rig.clock.pending_for(rig.entity), 0);
    }

    #[test]
    fn test_attack_exit_cancels_pending_windup() {
        let mut rig = Rig::new();
        let mut brain = brain_in(EnemyState::attack());
        rig.run(&mut brain, 5);
        assert_eq!(rig.clock.pending_for(rig.entity), 1);

        assert!(brain.transition(EnemyState::Patrol));
        rig.tick(&mut brain);

        assert!(brain.is_in_state("Patrol"));
        assert_eq!(rig.clock.pending_for(rig.entity), 0);

        rig.run(&mut brain, 60);
        assert!(!rig
            .presentation
            .iter()
            .any(|event| matches!(event, PresentationEvent::AttackImpact { .. })));
    }

    #[test]
    fn test_damage_knocks_back_then_patrols() {
        let mut rig = Rig::new();
        let mut brain = brain_in(EnemyState::Damage(DamageTaken {
            amount: 15,
            source: Vec3::new(0.0, 0.9, 1.0),
            lethal: false,
        }));

        rig.tick(&mut brain);
        let motion = rig.knockback.motion.expect("knockback started");
        assert!((motion.to - Vec3::new(0.0, 0.0, -1.2)).length() < 1e-5);
        assert_eq!(motion.duration, 0.5);

        // Knockback completes after 0.5 s (32 ticks), Patrol one tick later
        let ticks = rig.run_until(&mut brain, "Patrol", 40).expect("back to patrol");
        assert!((32..=34).contains(&ticks), "took {} ticks", ticks);
    }

    #[test]
    fn test_lethal_damage_dies_and_despawns_after_delay() {
        let mut rig = Rig::new();
        let mut brain = brain_in(EnemyState::Damage(DamageTaken {
            amount: 30,
            source: Vec3::new(1.0, 0.9, 0.0),
            lethal: true,
        }));

        rig.run(&mut brain, 3);
        assert!(brain.is_in_state("Dead"));
        assert!(rig
            .presentation
            .contains(&PresentationEvent::DeathSequence { entity: rig.entity }));
        assert!(!brain.transition(EnemyState::Patrol));

        // Dead entered at tick 3 → despawn at 3/64 + 2 s
        rig.run(&mut brain, 127);
        assert!(!rig.despawned);
        rig.tick(&mut brain);
        assert!(rig.despawned);
    }
}
