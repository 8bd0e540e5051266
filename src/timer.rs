//! Delayed tasks on a virtual clock
//!
//! The runtime owns a [`DelayedTasks`] queue and advances it with the elapsed
//! frame time. Every task is keyed by a [`TaskHandle`] allocated by the model,
//! so a pending task can be cancelled deterministically before it fires.

use std::time::Duration;

/// Cancel handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: Duration,
    payload: T,
}

/// Queue of tasks waiting for their deadline
#[derive(Debug, Clone)]
pub struct DelayedTasks<T> {
    now: Duration,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for DelayedTasks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayedTasks<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            tasks: Vec::new(),
        }
    }

    /// Number of tasks that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule `payload` to fire `delay` from now
    ///
    /// Re-scheduling an existing handle replaces the earlier task.
    pub fn schedule(&mut self, handle: TaskHandle, delay: Duration, payload: T) {
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.push(Scheduled {
            handle,
            due: self.now + delay,
            payload,
        });
    }

    /// Cancel a pending task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        before != self.tasks.len()
    }

    /// Move the clock forward and return every payload that came due,
    /// ordered by deadline then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;

        due.sort_by_key(|t| (t.due, t.handle));
        due.into_iter().map(|t| t.payload).collect()
    }
}
