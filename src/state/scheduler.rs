//! Deferred work that runs after the current synchronous event handler.
//!
//! The queue itself never runs anything. The host flushes it on its next
//! tick (a microtask in the browser, an explicit call natively); the waker
//! tells the host that a flush is needed.

use std::collections::VecDeque;

type Waker = Box<dyn Fn()>;

/// FIFO of pending tasks with duplicate suppression.
///
/// Tasks are plain values rather than closures so that the owner can run
/// them against its own `&mut self`. Scheduling a task equal to one already
/// pending is a no-op: the deferred work is a recomputation from current
/// inputs, so running it once covers every request made before the flush.
pub struct TickQueue<T> {
    pending: VecDeque<T>,
    waker: Option<Waker>,
}

impl<T: PartialEq> TickQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            waker: None,
        }
    }

    /// Called whenever the queue goes from empty to non-empty.
    pub fn set_waker(&mut self, waker: impl Fn() + 'static) {
        self.waker = Some(Box::new(waker));
    }

    /// Enqueue `task` unless an equal task is already pending. Returns
    /// `true` if it was added.
    pub fn schedule(&mut self, task: T) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        let was_idle = self.pending.is_empty();
        self.pending.push_back(task);
        if was_idle {
            if let Some(wake) = &self.waker {
                wake();
            }
        }
        true
    }

    /// Take every pending task, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<T: PartialEq> Default for TickQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TickQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending)
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Task {
        A,
        B,
    }

    #[test]
    fn test_duplicates_are_suppressed() {
        let mut q = TickQueue::new();
        assert!(q.schedule(Task::A));
        assert!(!q.schedule(Task::A));
        assert!(q.schedule(Task::B));
        assert_eq!(q.drain(), vec![Task::A, Task::B]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_waker_fires_once_per_idle_transition() {
        let wakes = Rc::new(Cell::new(0));
        let mut q = TickQueue::new();
        let w = Rc::clone(&wakes);
        q.set_waker(move || w.set(w.get() + 1));

        q.schedule(Task::A);
        q.schedule(Task::B);
        assert_eq!(wakes.get(), 1);

        q.drain();
        q.schedule(Task::A);
        assert_eq!(wakes.get(), 2);
    }
}
