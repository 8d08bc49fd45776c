//! Deadline queue for the picker's delayed previews.
//!
//! The TUI loop is single threaded: it asks the queue how long it may block
//! waiting for a key, then runs whatever became due.

use crate::picker::Scheduler;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(Instant, usize)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    pub fn schedule_at(&mut self, due: Instant, index: usize) {
        self.pending.push((due, index));
    }

    /// Remove and return every entry due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<usize> {
        let mut due: Vec<(Instant, usize)> = Vec::new();
        self.pending.retain(|&(at, index)| {
            if at <= now {
                due.push((at, index));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, index)| index).collect()
    }

    /// Time left until the next entry is due; `None` when nothing is pending.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|&(at, _)| at.saturating_duration_since(now))
            .min()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, index: usize) {
        self.schedule_at(Instant::now() + delay, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending() {
        let mut timers = TimerQueue::new();
        let now = Instant::now();
        assert_eq!(timers.until_next(now), None);
        assert!(timers.take_due(now).is_empty());
    }

    #[test]
    fn only_due_entries_are_taken_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let start = Instant::now();
        timers.schedule_at(start + Duration::from_millis(300), 2);
        timers.schedule_at(start + Duration::from_millis(100), 0);
        timers.schedule_at(start + Duration::from_millis(200), 1);

        assert_eq!(
            timers.until_next(start),
            Some(Duration::from_millis(100))
        );
        assert_eq!(timers.take_due(start + Duration::from_millis(250)), [0, 1]);
        assert_eq!(
            timers.until_next(start + Duration::from_millis(250)),
            Some(Duration::from_millis(50))
        );
        assert_eq!(timers.take_due(start + Duration::from_secs(1)), [2]);
        assert_eq!(timers.until_next(start), None);
    }

    #[test]
    fn overdue_entries_wait_zero() {
        let mut timers = TimerQueue::new();
        let start = Instant::now();
        timers.schedule_at(start, 4);
        assert_eq!(
            timers.until_next(start + Duration::from_millis(5)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn scheduler_impl_delays_from_now() {
        let mut timers = TimerQueue::new();
        Scheduler::schedule(&mut timers, Duration::from_secs(60), 3);
        assert!(timers.take_due(Instant::now()).is_empty());
        assert!(timers.until_next(Instant::now()).unwrap() > Duration::from_secs(50));
    }
}
