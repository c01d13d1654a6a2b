//! Multilevel Queue (MLQ) scheduling.
//!
//! Two static queues selected by `task.queue_level`:
//!
//! | Level | Policy | Notes |
//! |-------|--------|-------|
//! | 0 | Round Robin (quantum 2) | Runs to completion first |
//! | 1 | FCFS | Starts no earlier than queue 0's last slice |
//!
//! Queue 1 never interleaves with queue 0. Tasks with any other level are
//! not scheduled.

use tracing::debug;

use super::{NonPreemptiveScheduler, RoundRobin};
use crate::models::{Task, Timeline};

/// Number of static queue levels.
pub const MLQ_LEVELS: u32 = 2;

/// Default round robin quantum for queue 0.
pub const DEFAULT_MLQ_QUANTUM: i64 = 2;

/// Two-level static multilevel queue.
///
/// # Example
///
/// ```
/// use cpu_schedule::policies::MultilevelQueue;
/// use cpu_schedule::models::Task;
///
/// let tasks = vec![
///     Task::new(1, 0, 3).with_queue_level(1),
///     Task::new(2, 0, 3).with_queue_level(0),
/// ];
/// let timeline = MultilevelQueue::new().timeline(&tasks);
/// assert_eq!(timeline.task_ids(), vec![2, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultilevelQueue {
    quantum: i64,
}

impl MultilevelQueue {
    /// Creates an MLQ with the default queue-0 quantum.
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_MLQ_QUANTUM,
        }
    }

    /// Sets the queue-0 round robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// The queue-0 quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Whether a task belongs to one of the static queues.
    pub fn accepts(task: &Task) -> bool {
        task.effective_queue_level() < MLQ_LEVELS
    }

    /// Simulates the run: queue 0 slices first, then queue 1 slices.
    ///
    /// A non-positive quantum yields an empty timeline.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        if self.quantum <= 0 {
            return Timeline::new();
        }

        let (high, low): (Vec<Task>, Vec<Task>) = tasks
            .iter()
            .filter(|t| Self::accepts(t))
            .cloned()
            .partition(|t| t.effective_queue_level() == 0);

        let mut timeline = RoundRobin::new(self.quantum).timeline_at_level(&high, 0);
        let high_end = timeline.makespan();

        let shifted: Vec<Task> = low
            .into_iter()
            .map(|mut t| {
                t.arrival_time = t.arrival_time.max(high_end);
                t
            })
            .collect();

        debug!(
            high = high.len(),
            low = shifted.len(),
            high_end,
            "multilevel queue split"
        );

        let fcfs = NonPreemptiveScheduler::fcfs().timeline(&shifted);
        timeline.extend(fcfs.iter().map(|s| s.at_level(1)).collect());
        timeline
    }
}

impl Default for MultilevelQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_task_metrics;

    #[test]
    fn test_high_queue_round_robin_then_low_fcfs() {
        let tasks = vec![
            Task::new(1, 0, 3).with_queue_level(0),
            Task::new(2, 0, 2).with_queue_level(1),
            Task::new(3, 1, 2).with_queue_level(0),
        ];
        let t = MultilevelQueue::new().timeline(&tasks);
        assert_eq!(
            t.spans(),
            vec![(1, 0, 2), (3, 2, 4), (1, 4, 5), (2, 5, 7)]
        );
        assert_eq!(t.slices()[3].level, Some(1));
        assert!(t.slices()[..3].iter().all(|s| s.level == Some(0)));
    }

    #[test]
    fn test_low_queue_never_interleaves() {
        // Low task arrives first but must wait for the high queue to drain.
        let tasks = vec![
            Task::new(1, 0, 4).with_queue_level(1),
            Task::new(2, 3, 2).with_queue_level(0),
        ];
        let t = MultilevelQueue::new().timeline(&tasks);
        assert_eq!(t.spans(), vec![(2, 3, 5), (1, 5, 9)]);
    }

    #[test]
    fn test_low_queue_metrics_use_original_arrival() {
        let tasks = vec![
            Task::new(1, 0, 4).with_queue_level(0),
            Task::new(2, 1, 2).with_queue_level(1),
        ];
        let t = MultilevelQueue::new().timeline(&tasks);
        let scheduled = compute_task_metrics(&tasks, &t);
        assert_eq!(scheduled[1].metrics.start_time, 4);
        assert_eq!(scheduled[1].metrics.waiting_time, 3);
    }

    #[test]
    fn test_unclassified_goes_to_high_queue() {
        let tasks = vec![Task::new(1, 0, 2), Task::new(2, 0, 1).with_queue_level(1)];
        let t = MultilevelQueue::new().timeline(&tasks);
        assert_eq!(t.task_ids(), vec![1, 2]);
        assert_eq!(t.slices()[0].level, Some(0));
    }

    #[test]
    fn test_out_of_range_level_excluded() {
        let tasks = vec![
            Task::new(1, 0, 2).with_queue_level(0),
            Task::new(2, 0, 2).with_queue_level(5),
        ];
        let t = MultilevelQueue::new().timeline(&tasks);
        assert_eq!(t.task_ids(), vec![1]);
        assert!(!MultilevelQueue::accepts(&tasks[1]));
    }

    #[test]
    fn test_only_low_queue() {
        let tasks = vec![Task::new(1, 2, 3).with_queue_level(1)];
        let t = MultilevelQueue::new().timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 2, 5)]);
    }

    #[test]
    fn test_custom_quantum() {
        let tasks = vec![Task::new(1, 0, 3), Task::new(2, 0, 3)];
        let t = MultilevelQueue::new().with_quantum(3).timeline(&tasks);
        assert_eq!(t.spans(), vec![(1, 0, 3), (2, 3, 6)]);
        assert!(MultilevelQueue::new().with_quantum(0).timeline(&tasks).is_empty());
    }
}
