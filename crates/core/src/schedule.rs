//! Deferred one-shot tasks driven by the event loop.
//!
//! The loop reports elapsed milliseconds through [`Scheduler::advance`] and
//! receives every task that came due, ordered by due time and then by the
//! order they were scheduled. Repeating work (the clock tick) is expressed by
//! scheduling the next task from the handler of the previous one.

use crate::session::SessionId;

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// End a mismatch lock window and flip the pair back.
    HideMismatch,
    /// Refresh the elapsed-time display.
    ClockTick,
}

/// A task that came due, tagged with the session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub id: TaskId,
    pub owner: SessionId,
    pub task: Task,
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    due: DueTask,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, owner: SessionId, delay_ms: u32, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms as u64,
            due: DueTask { id, owner, task },
        });
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.due.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending task of a session. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: SessionId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.due.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.due.id == id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Advance time and take every task that is now due.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<DueTask> {
        self.now_ms += elapsed_ms as u64;
        let now = self.now_ms;

        let mut ready: Vec<Pending> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now {
                ready.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        ready.sort_by_key(|p| (p.due_ms, p.due.id));
        ready.into_iter().map(|p| p.due).collect()
    }
}
