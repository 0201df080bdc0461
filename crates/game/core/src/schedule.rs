//! Deferred and periodic work driven by the simulation clock.
//!
//! Timed behavior (gauge drain, darkness damage, spawning, temporary buffs)
//! is expressed as tasks on a [`Scheduler`] that the owner advances from its
//! `tick(dt)`. Cancelling a task is the equivalent of stopping a coroutine.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Handle returned when a task is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TaskId,
    deadline: f64,
    seq: u64,
    period: Option<f64>,
    task: T,
}

// Reversed so the max-heap pops the earliest deadline, then the lowest seq.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// Monotonic task queue.
///
/// Due tasks are returned in deadline order, ties broken by scheduling order.
/// Repeating tasks re-arm from their previous deadline, so a large `dt`
/// yields every period that elapsed, up to [`Scheduler::MAX_CATCH_UP`] per
/// task per advance. Periods beyond that are dropped.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: f64,
    next_id: u64,
    next_seq: u64,
    entries: BinaryHeap<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            next_seq: 0,
            entries: BinaryHeap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Shortest accepted repeat period.
    pub const MIN_PERIOD: f32 = 1e-3;
    /// Most times one repeating task fires during a single advance.
    pub const MAX_CATCH_UP: u32 = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since creation.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Runs `task` once, `delay` seconds from now. Negative delays fire on the
    /// next advance.
    pub fn schedule_after(&mut self, delay: f32, task: T) -> TaskId {
        self.push(f64::from(delay.max(0.0)), None, task)
    }

    /// Runs `task` every `interval` seconds, first after one interval.
    pub fn schedule_every(&mut self, interval: f32, task: T) -> TaskId {
        let period = Self::clamp_period(interval);
        self.push(period, Some(period), task)
    }

    /// Removes a pending task. Returns false when it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the clock forward and returns every task that came due.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += f64::from(dt.max(0.0));
        let mut due = Vec::new();
        let mut fired: HashMap<TaskId, u32> = HashMap::new();

        while self.entries.peek().is_some_and(|entry| entry.deadline <= self.now) {
            let Some(mut entry) = self.entries.pop() else {
                break;
            };
            let Some(period) = entry.period else {
                due.push(entry.task);
                continue;
            };

            due.push(entry.task.clone());
            entry.deadline += period;
            let count = fired.entry(entry.id).or_insert(0);
            *count += 1;
            if *count >= Self::MAX_CATCH_UP && entry.deadline <= self.now {
                let skipped = ((self.now - entry.deadline) / period).floor() + 1.0;
                entry.deadline += skipped * period;
                tracing::warn!(skipped, "repeating task fell behind; dropping periods");
            }
            entry.seq = self.bump_seq();
            self.entries.push(entry);
        }

        due
    }

    fn clamp_period(interval: f32) -> f64 {
        if interval < Self::MIN_PERIOD {
            tracing::warn!(interval, "repeat interval too small; clamping");
            f64::from(Self::MIN_PERIOD)
        } else {
            f64::from(interval)
        }
    }

    fn push(&mut self, delay: f64, period: Option<f64>, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            deadline: self.now + delay,
            seq,
            period,
            task,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
