//! Delayed-task queue over virtual time.
//!
//! The engine has no timers of its own. Deferred work is queued with a due
//! time measured from engine start, and whoever drives the engine (a UI loop,
//! the CLI, a test) advances the clock and collects what is due. Tests can
//! therefore step through delays deterministically.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    entries: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to become due at `due_at`.
    pub fn schedule(&mut self, due_at: Duration, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due_at, seq), task);
        TaskHandle(seq)
    }

    /// Cancel a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let key = self.entries.keys().find(|(_, seq)| *seq == handle.0).copied();
        key.and_then(|key| self.entries.remove(&key)).is_some()
    }

    /// Whether `handle` is still queued.
    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.keys().any(|(_, seq)| *seq == handle.0)
    }

    /// Remove and return every task due at or before `now`, in order.
    pub fn pop_due(&mut self, now: Duration) -> Vec<T> {
        let not_due = self.entries.split_off(&(now, u64::MAX));
        std::mem::replace(&mut self.entries, not_due)
            .into_values()
            .collect()
    }

    /// Due time of the earliest queued task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(due_at, _)| *due_at)
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pop_due_respects_time_and_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(ms(300), "c");
        queue.schedule(ms(100), "a");
        queue.schedule(ms(100), "b");

        assert!(queue.pop_due(ms(99)).is_empty());
        assert_eq!(queue.pop_due(ms(100)), vec!["a", "b"]);
        assert_eq!(queue.next_due(), Some(ms(300)));
        assert_eq!(queue.pop_due(ms(1000)), vec!["c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        let keep = queue.schedule(ms(10), 1);
        let drop = queue.schedule(ms(10), 2);

        assert!(queue.cancel(drop));
        assert!(!queue.cancel(drop));
        assert!(queue.is_scheduled(keep));
        assert!(!queue.is_scheduled(drop));
        assert_eq!(queue.pop_due(ms(10)), vec![1]);
        assert!(!queue.cancel(keep));
    }
}
