//! Virtual-clock timer queue (setTimeout / clearTimeout).

use std::time::Duration;
use tracing::trace;

/// Opaque identifier for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A pending timer.
#[derive(Clone, Debug)]
struct Timer<T> {
    id: TimerId,
    payload: T,
    /// Virtual time at which the timer fires.
    deadline: Duration,
    cancelled: bool,
}

/// A timer that has come due.
#[derive(Clone, Debug, PartialEq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub deadline: Duration,
    pub payload: T,
}

/// One-shot timers ordered by deadline, ties broken by scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    /// Timer ID counter.
    timer_counter: u64,
    /// Current virtual time.
    now: Duration,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            timer_counter: 0,
            now: Duration::ZERO,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        self.timer_counter += 1;
        let id = TimerId(self.timer_counter);
        let deadline = self.now.saturating_add(delay);

        trace!(id = id.0, deadline_ms = deadline.as_millis() as u64, "timer scheduled");
        self.timers.push(Timer {
            id,
            payload,
            deadline,
            cancelled: false,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id && !t.cancelled) {
            Some(timer) => {
                timer.cancelled = true;
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending();
        self.timers.clear();
        count
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id && !t.cancelled)
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.cancelled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Get the next timer deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .iter()
            .filter(|t| !t.cancelled)
            .map(|t| t.deadline)
            .min()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTimer<T>> {
        self.timers.retain(|t| !t.cancelled);

        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        let timer = self.timers.remove(position);
        self.now = self.now.max(timer.deadline);
        Some(FiredTimer {
            id: timer.id,
            deadline: timer.deadline,
            payload: timer.payload,
        })
    }

    /// Move the clock forward without firing anything.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Fire everything due within `by`, returning the payloads in order.
    /// Use [`pop_due`](Self::pop_due) when dispatch may schedule new timers.
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTimer<T>> {
        let until = self.now.saturating_add(by);
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(until) {
            fired.push(timer);
        }
        self.advance_clock(until);
        fired
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_timer_scheduling() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(ms(100), "a");
        assert_eq!(id, TimerId(1));
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(300), "late");
        queue.schedule(ms(100), "early");
        queue.schedule(ms(100), "early-second");

        let fired: Vec<_> = queue.advance(ms(250)).into_iter().map(|t| t.payload).collect();
        assert_eq!(fired, vec!["early", "early-second"]);
        assert_eq!(queue.now(), ms(250));

        let fired: Vec<_> = queue.advance(ms(50)).into_iter().map(|t| t.payload).collect();
        assert_eq!(fired, vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_timer_cancellation() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(ms(10), 1);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(!queue.is_pending(id));
        assert!(queue.advance(ms(100)).is_empty());
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut queue = TimerQueue::new();
        queue.advance(ms(500));
        queue.schedule(ms(100), ());
        assert_eq!(queue.next_deadline(), Some(ms(600)));
    }

    #[test]
    fn test_pop_due_moves_clock_to_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(40), "first");
        let fired = queue.pop_due(ms(1000)).unwrap();
        assert_eq!(fired.deadline, ms(40));
        assert_eq!(queue.now(), ms(40));

        // Scheduled from inside a dispatch: relative to the firing time.
        queue.schedule(ms(10), "chained");
        let chained = queue.pop_due(ms(1000)).unwrap();
        assert_eq!(chained.deadline, ms(50));
        assert_eq!(chained.payload, "chained");
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1), 'a');
        queue.schedule(ms(2), 'b');
        let cancelled = queue.schedule(ms(3), 'c');
        queue.cancel(cancelled);
        assert_eq!(queue.cancel_all(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_far_deadlines_saturate() {
        let mut queue = TimerQueue::new();
        queue.advance(ms(10));
        queue.schedule(Duration::MAX, "never");
        assert_eq!(queue.next_deadline(), Some(Duration::MAX));
        assert_eq!(queue.advance(Duration::MAX).len(), 1);
        assert_eq!(queue.now(), Duration::MAX);
    }
}
