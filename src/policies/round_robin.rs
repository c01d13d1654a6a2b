//! Round Robin scheduling.
//!
//! # Algorithm
//!
//! 1. Order tasks by arrival time; admit those that have arrived into a FIFO.
//! 2. Dequeue the head and run it for `min(remaining, quantum)`.
//! 3. Admit tasks that arrived while it ran, *then* re-enqueue the task at
//!    the tail if it still has work.
//! 4. If the queue empties while tasks are still to arrive, jump to the
//!    next arrival.

use std::collections::VecDeque;

use tracing::debug;

use crate::dispatching::WorkItem;
use crate::models::{Task, TimeSlice, Timeline};

/// Time-sliced FIFO scheduler.
///
/// # Example
///
/// ```
/// use cpu_schedule::policies::RoundRobin;
/// use cpu_schedule::models::Task;
///
/// let tasks = vec![Task::new(1, 0, 4), Task::new(2, 1, 3)];
/// let timeline = RoundRobin::new(2).timeline(&tasks);
/// assert_eq!(timeline.len(), 4);
/// assert_eq!(timeline.makespan(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a round robin scheduler with the given quantum.
    pub fn new(quantum: i64) -> Self {
        Self { quantum }
    }

    /// The time quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Simulates the run. A non-positive quantum yields an empty timeline.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        self.run(tasks, None)
    }

    /// Simulates the run, tagging every slice with a queue level.
    pub(crate) fn timeline_at_level(&self, tasks: &[Task], level: u32) -> Timeline {
        self.run(tasks, Some(level))
    }

    fn run(&self, tasks: &[Task], level: Option<u32>) -> Timeline {
        let mut timeline = Timeline::new();
        if self.quantum <= 0 || tasks.is_empty() {
            return timeline;
        }

        let mut items = WorkItem::by_arrival(tasks);
        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut admitted = 0;
        let mut time = 0;

        loop {
            while admitted < items.len() && items[admitted].task.has_arrived(time) {
                ready.push_back(admitted);
                admitted += 1;
            }

            let Some(idx) = ready.pop_front() else {
                match items.get(admitted) {
                    Some(next) => {
                        time = time.max(next.task.arrival_time);
                        continue;
                    }
                    None => break,
                }
            };

            let item = &mut items[idx];
            let start = time;
            time += item.run_for(self.quantum);

            let mut slice = TimeSlice::new(item.id(), start, time);
            if let Some(level) = level {
                slice = slice.at_level(level);
            }
            debug!(
                task = item.id(),
                start,
                end = time,
                remaining = item.remaining_time,
                "round robin slice"
            );
            timeline.push(slice);

            while admitted < items.len() && items[admitted].task.has_arrived(time) {
                ready.push_back(admitted);
                admitted += 1;
            }
            if items[idx].is_pending() {
                ready.push_back(idx);
            }
        }

        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_basic() {
        let tasks = vec![Task::new(1, 0, 4), Task::new(2, 1, 3)];
        let t = RoundRobin::new(2).timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7)]);
    }

    #[test]
    fn test_arrivals_enqueued_before_requeue() {
        // Task 2 arrives exactly when task 1's quantum expires: it goes first.
        let tasks = vec![Task::new(1, 0, 6), Task::new(2, 3, 3)];
        let t = RoundRobin::new(3).timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 0, 3), (2, 3, 6), (1, 6, 9)]);
    }

    #[test]
    fn test_simultaneous_arrivals_keep_input_order() {
        let tasks = vec![Task::new(5, 0, 2), Task::new(3, 0, 2)];
        let t = RoundRobin::new(1).timeline(&tasks);
        assert_eq!(t.task_ids(), vec![5, 3]);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_idle_gap_between_arrivals() {
        let tasks = vec![Task::new(1, 0, 2), Task::new(2, 10, 3)];
        let t = RoundRobin::new(2).timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 0, 2), (2, 10, 12), (2, 12, 13)]);
    }

    #[test]
    fn test_first_arrival_after_zero() {
        let tasks = vec![Task::new(1, 4, 3)];
        let t = RoundRobin::new(5).timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 4, 7)]);
    }

    #[test]
    fn test_invalid_quantum() {
        let tasks = vec![Task::new(1, 0, 3)];
        assert!(RoundRobin::new(0).timeline(&tasks).is_empty());
        assert!(RoundRobin::new(-2).timeline(&tasks).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(RoundRobin::new(2).timeline(&[]).is_empty());
    }

    #[test]
    fn test_level_tagging() {
        let t = RoundRobin::new(2).timeline_at_level(&[Task::new(1, 0, 3)], 0);
        assert!(t.iter().all(|s| s.level == Some(0)));
    }
}
