use core::cmp::{Ordering, Reverse};
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use web_time::Instant;

/// Counts boards within a session, so deferred work scheduled against an older board can tell
/// it has been superseded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug)]
struct Scheduled<E> {
    deadline: Instant,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Fire-and-forget callbacks waiting for their deadline on the event loop.
///
/// Events with the same deadline fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Reverse<Scheduled<E>>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            deadline,
            seq,
            event,
        }));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(scheduled)| scheduled.deadline)
    }

    /// Removes and returns the earliest event whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<E> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(scheduled)| scheduled.event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn fires_in_deadline_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start + Duration::from_secs(3), "late");
        queue.schedule(start + Duration::from_secs(1), "early");
        queue.schedule(start + Duration::from_secs(1), "early-too");

        assert_eq!(queue.next_deadline(), Some(start + Duration::from_secs(1)));
        assert_eq!(queue.pop_due(start), None);

        let now = start + Duration::from_secs(2);
        assert_eq!(queue.pop_due(now), Some("early"));
        assert_eq!(queue.pop_due(now), Some("early-too"));
        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.pop_due(start + Duration::from_secs(3)), Some("late"));
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn generations_advance() {
        let first = Generation::default();
        assert_eq!(first.next().get(), 1);
        assert!(first.next() > first);
    }
}
