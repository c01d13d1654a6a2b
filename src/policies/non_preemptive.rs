//! Non-preemptive policies: FCFS, SJF, LJF, Priority.
//!
//! # Algorithm
//!
//! 1. Order tasks by arrival time (stable).
//! 2. At the current time, pick the best arrived task by dispatching rule.
//! 3. If nothing has arrived, jump to the next arrival (CPU idles).
//! 4. Run the selected task to completion; repeat.
//!
//! Tasks the rule cannot score (a missing priority under Priority
//! scheduling) are left out of the run entirely.
//!
//! # Complexity
//! O(n²) for n tasks.

use tracing::debug;

use super::next_arrival;
use crate::dispatching::{rules, RuleEngine, WorkItem};
use crate::metrics::compute_task_metrics;
use crate::models::{ScheduledTask, Task, TimeSlice, Timeline};

/// Run-to-completion scheduler driven by a dispatching rule.
///
/// # Example
///
/// ```
/// use cpu_schedule::policies::NonPreemptiveScheduler;
/// use cpu_schedule::models::Task;
///
/// let tasks = vec![Task::new(1, 0, 5), Task::new(2, 1, 3)];
/// let result = NonPreemptiveScheduler::fcfs().schedule(&tasks);
/// assert_eq!(result[1].metrics.start_time, 5);
/// assert_eq!(result[1].metrics.waiting_time, 4);
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    engine: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Creates a scheduler with a custom rule engine.
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// First Come First Served.
    pub fn fcfs() -> Self {
        Self::new(RuleEngine::new(rules::Fcfs))
    }

    /// Shortest Job First.
    pub fn sjf() -> Self {
        Self::new(RuleEngine::new(rules::Sjf))
    }

    /// Longest Job First.
    pub fn ljf() -> Self {
        Self::new(RuleEngine::new(rules::Ljf))
    }

    /// Static priority (lower value first).
    pub fn priority() -> Self {
        Self::new(RuleEngine::new(rules::Priority))
    }

    /// The rule engine driving selection.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Simulates the run and returns slices in execution order.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        let mut items = WorkItem::by_arrival(tasks);
        items.retain(|w| self.engine.is_eligible(w));

        let mut timeline = Timeline::new();
        let mut time = 0;

        loop {
            let Some(idx) = self.engine.select_best(&items, time) else {
                match next_arrival(&items) {
                    Some(arrival) if arrival > time => {
                        time = arrival;
                        continue;
                    }
                    _ => break,
                }
            };

            let item = &mut items[idx];
            let start = time;
            let budget = item.remaining_time;
            time += item.run_for(budget);

            debug!(
                rule = self.engine.primary_name(),
                task = item.id(),
                start,
                end = time,
                "dispatched to completion"
            );
            timeline.push(TimeSlice::new(item.id(), start, time));
        }

        timeline
    }

    /// Simulates the run and returns every scheduled task with its metrics,
    /// ordered by task id.
    pub fn schedule(&self, tasks: &[Task]) -> Vec<ScheduledTask> {
        compute_task_metrics(tasks, &self.timeline(tasks))
    }
}
