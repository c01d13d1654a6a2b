//! Task (process) model.
//!
//! A task is a unit of CPU work: it becomes eligible at its arrival time
//! and needs `burst_time` units of CPU to finish. Priority and queue level
//! are optional and only consulted by the policies that need them.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Stable task identity used to correlate slices and metrics.
pub type TaskId = u32;

/// A task (process) to be scheduled.
///
/// Immutable for the duration of one simulation run. Policies work on
/// their own copies and never write back to the caller's list.
///
/// # Time Representation
/// All times are integer ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique positive task identifier.
    pub id: TaskId,
    /// Instant the task becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time the task needs.
    pub burst_time: i64,
    /// Scheduling priority (lower = more important). `None` = not applicable.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Static queue classification for multilevel queues. `None` = unclassified.
    #[serde(default)]
    pub queue_level: Option<u32>,
}

impl Task {
    /// Creates a new task.
    pub fn new(id: TaskId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
            queue_level: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the queue level.
    pub fn with_queue_level(mut self, level: u32) -> Self {
        self.queue_level = Some(level);
        self
    }

    /// Queue level used by multilevel policies (unclassified tasks go to 0).
    #[inline]
    pub fn effective_queue_level(&self) -> u32 {
        self.queue_level.unwrap_or(0)
    }

    /// Whether the task has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival_time <= time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(7, 3, 5).with_priority(2).with_queue_level(1);

        assert_eq!(task.id, 7);
        assert_eq!(task.arrival_time, 3);
        assert_eq!(task.burst_time, 5);
        assert_eq!(task.priority, Some(2));
        assert_eq!(task.queue_level, Some(1));
        assert_eq!(task.effective_queue_level(), 1);
    }

    #[test]
    fn test_unclassified_queue_level() {
        let task = Task::new(1, 0, 4);
        assert_eq!(task.queue_level, None);
        assert_eq!(task.effective_queue_level(), 0);
    }

    #[test]
    fn test_has_arrived() {
        let task = Task::new(1, 5, 1);
        assert!(!task.has_arrived(4));
        assert!(task.has_arrived(5));
        assert!(task.has_arrived(6));
    }

    #[test]
    fn test_task_wire_format() {
        let json = r#"{"id":2,"arrivalTime":1,"burstTime":3,"priority":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task, Task::new(2, 1, 3));

        let out = serde_json::to_string(&Task::new(1, 0, 4).with_queue_level(1)).unwrap();
        assert!(out.contains("\"burstTime\":4"));
        assert!(out.contains("\"queueLevel\":1"));
    }
}
