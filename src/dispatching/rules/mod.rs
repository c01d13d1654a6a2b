//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Burst-based** (non-preemptive): SJF, LJF
//! - **Remaining-work** (preemptive): SRT, LRT
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for tasks that should run first.

use super::{DispatchingRule, RuleScore, WorkItem};

// ======================== Arrival-based rules ========================

/// First Come First Served.
///
/// Earliest arrival runs first.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        Some(item.task.arrival_time)
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

// ======================== Burst-based rules ========================

/// Shortest Job First.
///
/// Prioritizes the smallest total burst. Optimal for mean waiting time
/// among non-preemptive policies when all jobs are available.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        Some(item.task.burst_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Longest Job First.
#[derive(Debug, Clone, Copy)]
pub struct Ljf;

impl DispatchingRule for Ljf {
    fn name(&self) -> &'static str {
        "LJF"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        Some(-item.task.burst_time)
    }

    fn description(&self) -> &'static str {
        "Longest Job First"
    }
}

// ======================== Remaining-work rules ========================

/// Shortest Remaining Time.
#[derive(Debug, Clone, Copy)]
pub struct Srt;

impl DispatchingRule for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        Some(item.remaining_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Longest Remaining Time.
///
/// Prefers the task with the most outstanding work.
#[derive(Debug, Clone, Copy)]
pub struct Lrt;

impl DispatchingRule for Lrt {
    fn name(&self) -> &'static str {
        "LRT"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        Some(-item.remaining_time)
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Time"
    }
}

// ======================== Priority-based rule ========================

/// Static priority rule.
///
/// Lower `task.priority` values run first. Tasks without a priority are
/// not selectable by this rule.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore> {
        item.task.priority.map(RuleScore::from)
    }

    fn description(&self) -> &'static str {
        "Task Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn item(task: Task) -> WorkItem {
        WorkItem::new(&task, 0)
    }

    #[test]
    fn test_fcfs() {
        let early = item(Task::new(1, 0, 5));
        let late = item(Task::new(2, 3, 1));
        assert!(Fcfs.evaluate(&early) < Fcfs.evaluate(&late));
    }

    #[test]
    fn test_sjf() {
        let short = item(Task::new(1, 0, 2));
        let long = item(Task::new(2, 0, 9));
        assert!(Sjf.evaluate(&short) < Sjf.evaluate(&long));
    }

    #[test]
    fn test_ljf() {
        let short = item(Task::new(1, 0, 2));
        let long = item(Task::new(2, 0, 9));
        assert!(Ljf.evaluate(&long) < Ljf.evaluate(&short));
    }

    #[test]
    fn test_srt_tracks_remaining() {
        let mut a = item(Task::new(1, 0, 10));
        let b = item(Task::new(2, 0, 4));
        assert!(Srt.evaluate(&b) < Srt.evaluate(&a));
        a.run_for(8);
        assert!(Srt.evaluate(&a) < Srt.evaluate(&b));
    }

    #[test]
    fn test_lrt_tracks_remaining() {
        let mut a = item(Task::new(1, 0, 10));
        let b = item(Task::new(2, 0, 4));
        assert!(Lrt.evaluate(&a) < Lrt.evaluate(&b));
        a.run_for(8);
        assert!(Lrt.evaluate(&b) < Lrt.evaluate(&a));
    }

    #[test]
    fn test_priority() {
        let high = item(Task::new(1, 0, 5).with_priority(1));
        let low = item(Task::new(2, 0, 5).with_priority(3));
        assert!(Priority.evaluate(&high) < Priority.evaluate(&low));
        assert_eq!(Priority.evaluate(&item(Task::new(3, 0, 5))), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Fcfs.description(), "First Come First Served");
        assert_eq!(Lrt.name(), "LRT");
    }
}
