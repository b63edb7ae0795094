//! Tests for the clock / scheduler.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::clock::{Clock, TimerAction, TimerInbox, TimerSignal};

    const DT: f32 = 1.0 / 64.0;

    fn owner(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_callback_fires_on_first_tick_at_or_after_delay() {
        let mut clock = Clock::default();
        clock.schedule(0.25, owner(1), TimerAction::Despawn);

        for _ in 0..15 {
            clock.advance(DT);
            assert!(clock.drain_due().is_empty());
        }

        clock.advance(DT);
        let due = clock.drain_due();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, TimerAction::Despawn);
        assert_eq!(clock.tick_count(), 16);
    }

    #[test]
    fn test_due_batch_ordered_by_time_then_schedule_order() {
        let mut clock = Clock::default();
        let late = clock.schedule(0.1, owner(1), TimerAction::DisableHitVolume);
        let early = clock.schedule(0.05, owner(2), TimerAction::Despawn);
        let tie = clock.schedule(0.1, owner(3), TimerAction::DisableHitVolume);

        clock.advance(0.5);
        let handles: Vec<_> = clock.drain_due().iter().map(|callback| callback.handle).collect();
        assert_eq!(handles, vec![early, late, tie]);
    }

    #[test]
    fn test_cancel_and_cancel_owned() {
        let mut clock = Clock::default();
        let a = clock.schedule(1.0, owner(1), TimerAction::Signal(TimerSignal::WindupElapsed));
        clock.schedule(1.0, owner(1), TimerAction::DisableHitVolume);
        let b = clock.schedule(1.0, owner(2), TimerAction::Despawn);

        assert!(clock.cancel(a));
        assert!(!clock.cancel(a), "second cancel is a no-op");
        assert_eq!(clock.cancel_owned(owner(1)), 1);
        assert_eq!(clock.cancel_owned(owner(1)), 0);

        clock.advance(2.0);
        let due = clock.drain_due();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].handle, b);
        assert!(!clock.is_pending(b));
    }

    #[test]
    fn test_negative_delay_fires_next_drain() {
        let mut clock = Clock::default();
        clock.advance(DT);
        clock.schedule(-3.0, owner(1), TimerAction::Despawn);
        assert_eq!(clock.drain_due().len(), 1);
    }

    #[test]
    fn test_inbox_take_consumes_one_occurrence() {
        let mut inbox = TimerInbox::default();
        inbox.push(TimerSignal::RecoveryElapsed);
        inbox.push(TimerSignal::RecoveryElapsed);

        assert!(!inbox.take(TimerSignal::WindupElapsed));
        assert!(inbox.take(TimerSignal::RecoveryElapsed));
        assert!(inbox.take(TimerSignal::RecoveryElapsed));
        assert!(inbox.is_empty());
    }
}
