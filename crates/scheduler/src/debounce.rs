//! Cancel-and-reschedule debouncing.

use crate::timers::{TimerId, TimerQueue};
use std::time::Duration;

/// Keeps at most one pending timer: every signal replaces the previous one.
#[derive(Clone, Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Cancel any pending timer and schedule `payload` after the quiet period.
    pub fn signal<T>(&mut self, queue: &mut TimerQueue<T>, payload: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            queue.cancel(previous);
        }
        let id = queue.schedule(self.quiet_period, payload);
        self.pending = Some(id);
        id
    }

    /// Whether `id` is the debounced timer. Call when a timer fires; clears
    /// the pending slot on a match.
    pub fn settle(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) {
        if let Some(previous) = self.pending.take() {
            queue.cancel(previous);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_burst_collapses_to_one() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(ms(250));

        for _ in 0..10 {
            debouncer.signal(&mut queue, "relayout");
            queue.advance(ms(100));
        }
        assert_eq!(queue.pending(), 1);

        let fired = queue.advance(ms(250));
        assert_eq!(fired.len(), 1);
        assert!(debouncer.settle(fired[0].id));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_fires_after_quiet_period_from_last_signal() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(ms(250));

        debouncer.signal(&mut queue, ());
        queue.advance(ms(200));
        debouncer.signal(&mut queue, ());
        assert!(queue.advance(ms(249)).is_empty());
        assert_eq!(queue.advance(ms(1)).len(), 1);
    }

    #[test]
    fn test_settle_ignores_other_timers() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(ms(250));
        let other = queue.schedule(ms(10), 0);
        debouncer.signal(&mut queue, 1);
        assert!(!debouncer.settle(other));
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(ms(250));
        debouncer.signal(&mut queue, ());
        debouncer.cancel(&mut queue);
        assert!(queue.is_empty());
        assert!(!debouncer.is_pending());
    }
}
