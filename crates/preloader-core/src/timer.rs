//! Deadline-ordered timer queue.
//!
//! The single scheduling primitive of the preloader. Hosts own the clock
//! and repeatedly pop due events; every event is one state transition.

use std::collections::BTreeMap;

/// Handle of a scheduled timer.
///
/// Ordering follows deadline first, then scheduling order, so timers due at
/// the same instant fire in the order they were scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: u64,
    seq: u64,
}

impl TimerId {
    /// Absolute deadline in milliseconds.
    pub fn deadline(&self) -> u64 {
        self.deadline
    }
}

/// Pending timers keyed by deadline.
#[derive(Debug)]
pub struct TimerQueue<E> {
    pending: BTreeMap<TimerId, E>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `event` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: u64, event: E) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, event);
        id
    }

    /// Cancel a pending timer, returning its event if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        self.pending.remove(&id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(TimerId::deadline)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, E)> {
        let first = *self.pending.keys().next()?;
        if first.deadline > now {
            return None;
        }
        self.pending.remove_entry(&first)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(30, "c");
        queue.schedule(10, "a");
        queue.schedule(20, "b");

        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(100))
            .map(|(_, e)| e)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(5, 1);
        queue.schedule(5, 2);
        assert_eq!(queue.pop_due(5).map(|(_, e)| e), Some(1));
        assert_eq!(queue.pop_due(5).map(|(_, e)| e), Some(2));
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(50, ());
        assert!(queue.pop_due(49).is_none());
        assert_eq!(queue.next_deadline(), Some(50));
        assert_eq!(queue.pop_due(50).map(|(id, _)| id), Some(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(10, "tick");
        assert!(queue.is_pending(id));
        assert_eq!(queue.cancel(id), Some("tick"));
        assert!(!queue.is_pending(id));
        assert_eq!(queue.cancel(id), None);
        assert!(queue.pop_due(100).is_none());
    }
}
