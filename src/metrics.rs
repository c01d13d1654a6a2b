//! Per-task timing metrics and schedule-level summary.
//!
//! Every policy produces a [`Timeline`]; this module is the single place
//! where timing metrics are derived from it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | End of the task's last slice |
//! | Turnaround | Completion - arrival |
//! | Waiting | Turnaround - burst |
//! | Response | First start - arrival |
//! | Utilization | Busy time / (makespan - first start) |
//! | Throughput | Completed tasks / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ScheduledTask, Task, TaskMetrics, TimeSlice, Timeline};

impl TaskMetrics {
    /// Computes metrics for `task` from the slices it received.
    ///
    /// Returns `None` if the task never ran.
    pub fn from_slices(task: &Task, slices: &[&TimeSlice]) -> Option<Self> {
        let start_time = slices.iter().map(|s| s.start_time).min()?;
        let completion_time = slices.iter().map(|s| s.end_time).max()?;

        let turnaround_time = completion_time - task.arrival_time;
        Some(Self {
            start_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - task.burst_time,
            response_time: start_time - task.arrival_time,
        })
    }
}

/// Annotates every task that ran with its metrics, ordered by task id.
///
/// Tasks with no slices in `timeline` are omitted.
pub fn compute_task_metrics(tasks: &[Task], timeline: &Timeline) -> Vec<ScheduledTask> {
    let mut scheduled: Vec<ScheduledTask> = tasks
        .iter()
        .filter_map(|task| {
            let slices = timeline.slices_for_task(task.id);
            TaskMetrics::from_slices(task, &slices).map(|metrics| ScheduledTask {
                task: task.clone(),
                metrics,
            })
        })
        .collect();
    scheduled.sort_by_key(ScheduledTask::id);
    scheduled
}

/// Schedule-level performance summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Number of tasks that ran.
    pub task_count: usize,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Total CPU time spent running tasks.
    pub busy_time: i64,
    /// Busy fraction of the span from first start to makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed tasks per time unit.
    pub throughput: f64,
    /// Number of times the CPU switched from one task to another.
    pub context_switches: usize,
}

impl ScheduleSummary {
    /// Computes the summary from a timeline and its annotated tasks.
    pub fn calculate(timeline: &Timeline, scheduled: &[ScheduledTask]) -> Self {
        let task_count = scheduled.len();
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();

        // Summed as f64: per-task times can each approach the clock limit.
        let mean = |f: fn(&TaskMetrics) -> i64| -> f64 {
            if task_count == 0 {
                0.0
            } else {
                scheduled.iter().map(|s| f(&s.metrics) as f64).sum::<f64>() / task_count as f64
            }
        };

        let span = makespan - timeline.first_start().unwrap_or(0);
        let cpu_utilization = if span > 0 {
            busy_time as f64 / span as f64
        } else {
            0.0
        };

        let throughput = if makespan > 0 {
            task_count as f64 / makespan as f64
        } else {
            0.0
        };

        Self {
            task_count,
            avg_turnaround_time: mean(|m: &TaskMetrics| m.turnaround_time),
            avg_waiting_time: mean(|m: &TaskMetrics| m.waiting_time),
            avg_response_time: mean(|m: &TaskMetrics| m.response_time),
            makespan,
            busy_time,
            cpu_utilization,
            throughput,
            context_switches: count_context_switches(timeline),
        }
    }
}

fn count_context_switches(timeline: &Timeline) -> usize {
    let mut ordered: Vec<&TimeSlice> = timeline.iter().collect();
    ordered.sort_by_key(|s| s.start_time);
    ordered
        .windows(2)
        .filter(|pair| pair[0].task_id != pair[1].task_id)
        .count()
}
