//! Simulation facade.
//!
//! Ties configuration, validation, policy dispatch and metrics together:
//! one call to [`Simulator::run`] turns a task list into a timeline,
//! per-task metrics and a summary.
//!
//! # Example
//!
//! ```
//! use cpu_schedule::config::{Policy, SimulationConfig};
//! use cpu_schedule::models::Task;
//! use cpu_schedule::simulation::Simulator;
//!
//! let tasks = vec![Task::new(1, 0, 4), Task::new(2, 1, 3)];
//! let report = Simulator::new(SimulationConfig::new(Policy::RoundRobin))
//!     .run(&tasks)
//!     .unwrap();
//! assert_eq!(report.timeline.len(), 4);
//! assert_eq!(report.tasks[0].metrics.completion_time, 6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{IneligibleTasks, Policy, SimulationConfig};
use crate::error::SimulationError;
use crate::metrics::{compute_task_metrics, ScheduleSummary};
use crate::models::{ScheduledTask, Task, Timeline};
use crate::policies::{
    MultilevelFeedbackQueue, MultilevelQueue, NonPreemptiveScheduler, RemainingTimeScheduler,
    RoundRobin,
};
use crate::validation::{ineligible_tasks, validate_quantum, validate_tasks, ValidationError};

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Policy that produced the run.
    pub policy: Policy,
    /// Slices in dispatch order.
    pub timeline: Timeline,
    /// Tasks that ran, with metrics, ordered by id.
    pub tasks: Vec<ScheduledTask>,
    /// Schedule-level summary.
    pub summary: ScheduleSummary,
    /// Tasks the policy could not schedule.
    pub excluded: Vec<ValidationError>,
}

/// Runs simulations for a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates `tasks` under the configured policy.
    ///
    /// The caller's tasks are never modified; calling twice with the same
    /// input yields identical reports.
    ///
    /// # Errors
    /// - [`SimulationError::InvalidInput`] if the task list is structurally
    ///   invalid, or (in `Reject` mode) if the policy cannot schedule a task.
    /// - [`SimulationError::InvalidQuantum`] (in `Reject` mode) for a
    ///   non-positive quantum.
    pub fn run(&self, tasks: &[Task]) -> Result<SimulationReport, SimulationError> {
        validate_tasks(tasks).map_err(SimulationError::InvalidInput)?;

        let policy = self.config.policy;
        info!(
            policy = %policy,
            task_count = tasks.len(),
            "=== simulation start ==="
        );

        self.check_quanta()?;

        let excluded = ineligible_tasks(tasks, policy);
        if !excluded.is_empty() {
            match self.config.ineligible {
                IneligibleTasks::Reject => return Err(SimulationError::InvalidInput(excluded)),
                IneligibleTasks::Skip => {
                    for e in &excluded {
                        warn!(policy = %policy, task = ?e.task_id, "{}", e.message);
                    }
                }
            }
        }

        let timeline = self.timeline(tasks);
        let scheduled = compute_task_metrics(tasks, &timeline);
        let summary = ScheduleSummary::calculate(&timeline, &scheduled);

        info!(
            policy = %policy,
            slices = timeline.len(),
            scheduled = scheduled.len(),
            excluded = excluded.len(),
            makespan = summary.makespan,
            "=== simulation complete ==="
        );

        Ok(SimulationReport {
            policy,
            timeline,
            tasks: scheduled,
            summary,
            excluded,
        })
    }

    /// Produces the raw timeline for `tasks` without validation or metrics.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        match self.config.policy {
            Policy::Fcfs => NonPreemptiveScheduler::fcfs().timeline(tasks),
            Policy::Sjf => NonPreemptiveScheduler::sjf().timeline(tasks),
            Policy::Ljf => NonPreemptiveScheduler::ljf().timeline(tasks),
            Policy::Priority => NonPreemptiveScheduler::priority().timeline(tasks),
            Policy::RoundRobin => RoundRobin::new(self.config.quantum).timeline(tasks),
            Policy::Srtf => RemainingTimeScheduler::srtf().timeline(tasks),
            Policy::Lrtf => RemainingTimeScheduler::lrtf().timeline(tasks),
            Policy::Mlq => MultilevelQueue::new()
                .with_quantum(self.config.mlq_quantum)
                .timeline(tasks),
            Policy::Mlfq => {
                MultilevelFeedbackQueue::with_quanta(self.config.mlfq_quanta.clone())
                    .timeline(tasks)
            }
        }
    }

    /// Checks the quanta the configured policy uses.
    ///
    /// In `Skip` mode a bad quantum is only logged; the policy then
    /// produces an empty timeline.
    fn check_quanta(&self) -> Result<(), SimulationError> {
        let quanta: Vec<i64> = match self.config.policy {
            Policy::RoundRobin => vec![self.config.quantum],
            Policy::Mlq => vec![self.config.mlq_quantum],
            Policy::Mlfq => self.config.mlfq_quanta.clone(),
            _ => Vec::new(),
        };

        for q in quanta {
            if let Err(e) = validate_quantum(q) {
                match self.config.ineligible {
                    IneligibleTasks::Reject => return Err(SimulationError::InvalidQuantum(q)),
                    IneligibleTasks::Skip => {
                        warn!(policy = %self.config.policy, quantum = q, "{}", e.message)
                    }
                }
            }
        }
        Ok(())
    }
}

/// Simulates `tasks` under `policy` with default parameters.
pub fn simulate(tasks: &[Task], policy: Policy) -> Result<SimulationReport, SimulationError> {
    Simulator::new(SimulationConfig::new(policy)).run(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlice;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadGenerator;

    fn workloads() -> Vec<Vec<Task>> {
        (0..12)
            .map(|seed| {
                WorkloadGenerator::new(seed)
                    .with_horizon(40)
                    .with_priorities(1, 5)
                    .with_queue_levels(2)
                    .generate()
            })
            .collect()
    }

    fn assert_invariants(tasks: &[Task], report: &SimulationReport) {
        let slices = report.timeline.slices();

        // No overlap: single CPU.
        for (i, a) in slices.iter().enumerate() {
            for b in &slices[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }

        for task in tasks {
            let own: Vec<&TimeSlice> = report.timeline.slices_for_task(task.id);
            if own.is_empty() {
                continue;
            }
            // Conservation: slices add up to the burst.
            let total: i64 = own.iter().map(|s| s.duration()).sum();
            assert_eq!(total, task.burst_time, "task {} under {}", task.id, report.policy);
            // Causality.
            assert!(own.iter().all(|s| s.start_time >= task.arrival_time));
        }

        for scheduled in &report.tasks {
            let m = scheduled.metrics;
            assert!(m.waiting_time >= 0);
            assert!(m.response_time >= 0);
            assert!(m.turnaround_time >= scheduled.task.burst_time);
        }
    }

    #[test]
    fn test_invariants_hold_for_every_policy() {
        for tasks in workloads() {
            for policy in Policy::ALL {
                let report = simulate(&tasks, policy).unwrap();
                assert_invariants(&tasks, &report);
                assert_eq!(report.tasks.len() + report.excluded.len(), tasks.len());
            }
        }
    }

    #[test]
    fn test_rerun_is_identical_and_input_untouched() {
        for tasks in workloads() {
            let snapshot = tasks.clone();
            for policy in Policy::ALL {
                let first = simulate(&tasks, policy).unwrap();
                let second = simulate(&tasks, policy).unwrap();
                assert_eq!(first, second);
            }
            assert_eq!(tasks, snapshot);
        }
    }

    #[test]
    fn test_fcfs_report() {
        let tasks = vec![Task::new(1, 0, 5), Task::new(2, 1, 3)];
        let report = simulate(&tasks, Policy::Fcfs).unwrap();
        assert_eq!(report.timeline.spans(), vec![(1, 0, 5), (2, 5, 8)]);
        assert_eq!(report.tasks[0].metrics.waiting_time, 0);
        assert_eq!(report.tasks[1].metrics.waiting_time, 4);
        assert!((report.summary.avg_waiting_time - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_sjf_report() {
        let tasks = vec![Task::new(1, 0, 8), Task::new(2, 1, 4), Task::new(3, 2, 9)];
        let report = simulate(&tasks, Policy::Sjf).unwrap();
        assert_eq!(report.timeline.spans(), vec![(1, 0, 8), (2, 8, 12), (3, 12, 21)]);
    }

    #[test]
    fn test_round_robin_report() {
        let tasks = vec![Task::new(1, 0, 4), Task::new(2, 1, 3)];
        let report = simulate(&tasks, Policy::RoundRobin).unwrap();
        assert_eq!(
            report.timeline.spans(),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7)]
        );
        assert_eq!(report.summary.context_switches, 3);
    }

    #[test]
    fn test_srtf_report() {
        let tasks = vec![Task::new(1, 0, 3), Task::new(2, 0, 1)];
        let report = simulate(&tasks, Policy::Srtf).unwrap();
        assert_eq!(report.timeline.spans(), vec![(2, 0, 1), (1, 1, 4)]);
        assert_eq!(report.tasks[0].metrics.response_time, 1);
    }

    #[test]
    fn test_empty_input() {
        for policy in Policy::ALL {
            let report = simulate(&[], policy).unwrap();
            assert!(report.timeline.is_empty());
            assert!(report.tasks.is_empty());
            assert_eq!(report.summary, ScheduleSummary::default());
        }
    }

    #[test]
    fn test_structural_errors_always_rejected() {
        let tasks = vec![Task::new(1, 0, 0)];
        let err = simulate(&tasks, Policy::Fcfs).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::NonPositiveBurst
        );
    }

    #[test]
    fn test_missing_priority_skipped() {
        let tasks = vec![Task::new(1, 0, 3), Task::new(2, 0, 2).with_priority(1)];
        let report = simulate(&tasks, Policy::Priority).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.excluded.len(), 1);
        assert_eq!(report.excluded[0].task_id, Some(1));
    }

    #[test]
    fn test_missing_priority_rejected() {
        let tasks = vec![Task::new(1, 0, 3), Task::new(2, 0, 2).with_priority(1)];
        let config = SimulationConfig::new(Policy::Priority).with_ineligible(IneligibleTasks::Reject);
        let err = Simulator::new(config).run(&tasks).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::MissingPriority
        );
    }

    #[test]
    fn test_mlq_out_of_range_skipped() {
        let tasks = vec![Task::new(1, 0, 3).with_queue_level(3), Task::new(2, 0, 2)];
        let report = simulate(&tasks, Policy::Mlq).unwrap();
        assert_eq!(report.timeline.task_ids(), vec![2]);
        assert_eq!(
            report.excluded[0].kind,
            ValidationErrorKind::QueueLevelOutOfRange
        );
    }

    #[test]
    fn test_bad_quantum() {
        let tasks = vec![Task::new(1, 0, 3)];
        let skip = Simulator::new(SimulationConfig::new(Policy::RoundRobin).with_quantum(0));
        assert!(skip.run(&tasks).unwrap().timeline.is_empty());

        let reject = Simulator::new(
            SimulationConfig::new(Policy::RoundRobin)
                .with_quantum(0)
                .with_ineligible(IneligibleTasks::Reject),
        );
        assert_eq!(reject.run(&tasks).unwrap_err(), SimulationError::InvalidQuantum(0));

        // The round robin quantum is irrelevant to other policies.
        let fcfs = Simulator::new(
            SimulationConfig::new(Policy::Fcfs)
                .with_quantum(0)
                .with_ineligible(IneligibleTasks::Reject),
        );
        assert!(fcfs.run(&tasks).is_ok());
    }

    #[test]
    fn test_clock_overflow_rejected_for_every_policy() {
        let tasks = vec![Task::new(1, i64::MAX - 1, 5).with_priority(1)];
        for policy in Policy::ALL {
            let err = simulate(&tasks, policy).unwrap_err();
            assert_eq!(
                err.validation_errors()[0].kind,
                ValidationErrorKind::HorizonOverflow
            );
        }
    }

    #[test]
    fn test_run_ending_at_time_limit() {
        let tasks = vec![Task::new(1, i64::MAX - 5, 5).with_priority(1)];
        for policy in Policy::ALL {
            let report = simulate(&tasks, policy).unwrap();
            assert_eq!(report.summary.makespan, i64::MAX, "{policy}");
            assert_eq!(report.tasks[0].metrics.turnaround_time, 5);
        }
    }

    #[test]
    fn test_bad_mlfq_ladder_rejected() {
        let config = SimulationConfig::new(Policy::Mlfq)
            .with_mlfq_quanta(vec![4, -1])
            .with_ineligible(IneligibleTasks::Reject);
        let err = Simulator::new(config).run(&[Task::new(1, 0, 3)]).unwrap_err();
        assert_eq!(err, SimulationError::InvalidQuantum(-1));
    }

    #[test]
    fn test_report_serializes() {
        let report = simulate(&[Task::new(1, 0, 2)], Policy::Mlfq).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "MLFQ");
        assert_eq!(json["timeline"][0]["level"], 0);
        assert_eq!(json["tasks"][0]["completionTime"], 2);
        assert_eq!(json["summary"]["makespan"], 2);
    }
}
