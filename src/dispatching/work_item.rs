//! Per-run working copy of a task.

use crate::models::{Task, TaskId};

/// Mutable scheduling state for one task during one simulation run.
///
/// Wraps a copy of the caller's task together with the bookkeeping that
/// preemptive and feedback policies need. The caller's list is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Copy of the input task.
    pub task: Task,
    /// Position in the caller's input list (first-found tie-breaking).
    pub index: usize,
    /// CPU time still owed to the task.
    pub remaining_time: i64,
    /// Current ready-queue level (feedback queues demote this).
    pub level: u32,
}

impl WorkItem {
    /// Creates a fresh work item with the full burst outstanding.
    pub fn new(task: &Task, index: usize) -> Self {
        Self {
            task: task.clone(),
            index,
            remaining_time: task.burst_time,
            level: 0,
        }
    }

    /// Builds work items for a task list, preserving input order.
    pub fn from_tasks(tasks: &[Task]) -> Vec<Self> {
        tasks
            .iter()
            .enumerate()
            .map(|(i, t)| Self::new(t, i))
            .collect()
    }

    /// Builds work items sorted by arrival time (stable, so input order breaks ties).
    pub fn by_arrival(tasks: &[Task]) -> Vec<Self> {
        let mut items = Self::from_tasks(tasks);
        items.sort_by_key(|w| w.task.arrival_time);
        items
    }

    /// Task id shortcut.
    #[inline]
    pub fn id(&self) -> TaskId {
        self.task.id
    }

    /// Whether the task still needs CPU time.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.remaining_time > 0
    }

    /// Whether the task is pending and has arrived by `time`.
    #[inline]
    pub fn is_ready(&self, time: i64) -> bool {
        self.is_pending() && self.task.has_arrived(time)
    }

    /// Runs the task for up to `budget` time units and returns the time consumed.
    pub fn run_for(&mut self, budget: i64) -> i64 {
        let exec = self.remaining_time.min(budget).max(0);
        self.remaining_time -= exec;
        exec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_arrival_is_stable() {
        let tasks = vec![Task::new(1, 3, 2), Task::new(2, 0, 2), Task::new(3, 0, 5)];
        let items = WorkItem::by_arrival(&tasks);
        let ids: Vec<_> = items.iter().map(WorkItem::id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(items[0].index, 1);
    }

    #[test]
    fn test_run_for_caps_at_remaining() {
        let mut item = WorkItem::new(&Task::new(1, 0, 3), 0);
        assert_eq!(item.run_for(2), 2);
        assert_eq!(item.remaining_time, 1);
        assert_eq!(item.run_for(2), 1);
        assert!(!item.is_pending());
        assert_eq!(item.run_for(2), 0);
    }

    #[test]
    fn test_is_ready() {
        let item = WorkItem::new(&Task::new(1, 4, 3), 0);
        assert!(!item.is_ready(3));
        assert!(item.is_ready(4));
    }

    #[test]
    fn test_working_copy_leaves_input_untouched() {
        let tasks = vec![Task::new(1, 0, 3)];
        let mut items = WorkItem::from_tasks(&tasks);
        items[0].run_for(3);
        assert_eq!(tasks[0].burst_time, 3);
    }
}
