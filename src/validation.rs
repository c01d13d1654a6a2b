//! Input validation for simulation runs.
//!
//! Checks the structural integrity of a task list before scheduling, and
//! reports which tasks a given policy cannot schedule. Detects:
//! - Duplicate or zero task IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Task sets whose total run would not fit in the time range
//! - Missing priorities under Priority scheduling
//! - Queue levels outside the static queues under MLQ
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Policy;
use crate::models::{Task, TaskId};
use crate::policies::{MultilevelQueue, MLQ_LEVELS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending task, when the problem belongs to one.
    pub task_id: Option<TaskId>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Task ID is zero (IDs must be positive).
    InvalidId,
    /// Arrival time is negative.
    NegativeArrival,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// Priority scheduling was requested but the task has no priority.
    MissingPriority,
    /// MLQ was requested but the task's queue level has no queue.
    QueueLevelOutOfRange,
    /// A time quantum is zero or negative.
    NonPositiveQuantum,
    /// Latest arrival plus total burst exceeds the representable time range.
    HorizonOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, task_id: Option<TaskId>, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id,
            message: message.into(),
        }
    }
}

/// Validates the structural integrity of a task list.
///
/// Checks:
/// 1. Task IDs are positive and unique
/// 2. Arrival times are non-negative
/// 3. Burst times are at least 1
/// 4. The latest arrival plus the sum of all bursts fits in `i64`, so no
///    policy clock can overflow
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for task in tasks {
        if task.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                Some(task.id),
                "Task ID must be positive",
            ));
        }
        if !seen.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                Some(task.id),
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if task.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                Some(task.id),
                format!(
                    "Task {} has negative arrival time {}",
                    task.id, task.arrival_time
                ),
            ));
        }
        if task.burst_time < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                Some(task.id),
                format!("Task {} has burst time {} (must be >= 1)", task.id, task.burst_time),
            ));
        }
    }

    if horizon(tasks).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            None,
            "Latest arrival plus total burst time exceeds the time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on any simulation clock: latest arrival + every burst.
fn horizon(tasks: &[Task]) -> Option<i64> {
    let latest = tasks.iter().map(|t| t.arrival_time.max(0)).max().unwrap_or(0);
    tasks
        .iter()
        .try_fold(latest, |acc, t| acc.checked_add(t.burst_time.max(0)))
}

/// Returns one error per task that `policy` cannot schedule.
///
/// An empty result means every task is eligible.
pub fn ineligible_tasks(tasks: &[Task], policy: Policy) -> Vec<ValidationError> {
    tasks
        .iter()
        .filter_map(|task| match policy {
            Policy::Priority if task.priority.is_none() => Some(ValidationError::new(
                ValidationErrorKind::MissingPriority,
                Some(task.id),
                format!("Task {} has no priority (required by {policy})", task.id),
            )),
            Policy::Mlq if !MultilevelQueue::accepts(task) => Some(ValidationError::new(
                ValidationErrorKind::QueueLevelOutOfRange,
                Some(task.id),
                format!(
                    "Task {} has queue level {} (expected < {MLQ_LEVELS})",
                    task.id,
                    task.effective_queue_level()
                ),
            )),
            _ => None,
        })
        .collect()
}

/// Validates the task list and the policy-specific attributes together.
pub fn validate_for_policy(tasks: &[Task], policy: Policy) -> ValidationResult {
    let mut errors = match validate_tasks(tasks) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };
    errors.extend(ineligible_tasks(tasks, policy));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a time quantum.
pub fn validate_quantum(quantum: i64) -> Result<(), ValidationError> {
    if quantum > 0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            None,
            format!("Time quantum must be positive, got {quantum}"),
        ))
    }
}
