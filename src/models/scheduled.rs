//! Scheduled task (task + timing metrics) model.

use serde::{Deserialize, Serialize};

use super::{Task, TaskId};

/// Per-task timing metrics derived from a timeline.
///
/// # Definitions
/// - completion = end of the task's last slice
/// - turnaround = completion - arrival
/// - waiting = turnaround - burst
/// - response = start of the first slice - arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    /// Start of the first slice.
    pub start_time: i64,
    /// End of the last slice.
    pub completion_time: i64,
    /// Completion minus arrival.
    pub turnaround_time: i64,
    /// Turnaround minus burst.
    pub waiting_time: i64,
    /// First start minus arrival.
    pub response_time: i64,
}

/// A task annotated with its metrics for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// The input task.
    #[serde(flatten)]
    pub task: Task,
    /// Metrics computed from the task's slices.
    #[serde(flatten)]
    pub metrics: TaskMetrics,
}

impl ScheduledTask {
    /// Task id shortcut.
    #[inline]
    pub fn id(&self) -> TaskId {
        self.task.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScheduledTask {
        ScheduledTask {
            task: Task::new(2, 1, 3),
            metrics: TaskMetrics {
                start_time: 5,
                completion_time: 8,
                turnaround_time: 7,
                waiting_time: 4,
                response_time: 4,
            },
        }
    }

    #[test]
    fn test_wire_format_is_flat() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["arrivalTime"], 1);
        assert_eq!(json["startTime"], 5);
        assert_eq!(json["completionTime"], 8);
        assert_eq!(json["waitingTime"], 4);
        // The end of the last slice is carried by completionTime alone.
        assert!(json.get("endTime").is_none());
    }

    #[test]
    fn test_wire_round_trip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: ScheduledTask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
        assert_eq!(back.id(), 2);
    }
}
