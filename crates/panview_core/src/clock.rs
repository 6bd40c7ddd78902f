//! Frame clock and deferred task queue
//!
//! The host drives the clock once per frame with [`Clock::advance`]. Tasks
//! are plain payloads; the owner of the clock interprets whatever comes due.
//! A task scheduled while due tasks are being handled never fires in the
//! same frame, so a task may safely re-schedule itself.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled task
    pub struct TaskId;
}

/// Tolerance when comparing due times accumulated from float deltas
const DUE_EPSILON: f64 = 1e-9;

struct ScheduledTask<T> {
    due: f64,
    seq: u64,
    payload: T,
}

/// Monotonic frame clock with fire-once, cancellable tasks
pub struct Clock<T> {
    now: f64,
    frames: u64,
    next_seq: u64,
    tasks: SlotMap<TaskId, ScheduledTask<T>>,
}

impl<T> Clock<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            frames: 0,
            next_seq: 0,
            tasks: SlotMap::with_key(),
        }
    }

    /// Current time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Schedule `payload` to come due after `delay` seconds
    ///
    /// A zero (or negative) delay means "on the next frame".
    pub fn schedule_once(&mut self, delay: f64, payload: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(ScheduledTask {
            due: self.now + delay.max(0.0),
            seq,
            payload,
        })
    }

    /// Cancel a pending task, returning its payload if it had not fired yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|t| t.payload)
    }

    /// Cancel every pending task whose payload matches
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| !predicate(&t.payload));
        before - self.tasks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance one frame of `dt` seconds and take every task that came due,
    /// ordered by due time and then by scheduling order
    pub fn advance(&mut self, dt: f64) -> Vec<(TaskId, T)> {
        self.now += dt.max(0.0);
        self.frames += 1;

        let now = self.now;
        let mut due: Vec<(f64, u64, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= now + DUE_EPSILON)
            .map(|(id, t)| (t.due, t.seq, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, _, id)| self.tasks.remove(id).map(|t| (id, t.payload)))
            .collect()
    }
}

impl<T> Default for Clock<T> {
    fn default() -> Self {
        Self::new()
    }
}
