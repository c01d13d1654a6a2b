//! Multilevel Feedback Queue (MLFQ) scheduling.
//!
//! # Algorithm
//!
//! 1. Newly arrived tasks join the tail of queue 0, in arrival order.
//! 2. The head of the lowest-numbered non-empty queue is dispatched for
//!    `min(remaining, quantum[level])`. A running slice is never cut short
//!    by an arrival; arrivals are admitted after it ends.
//! 3. A task that still has work is demoted one level (capped at the last).
//! 4. The last level has no quantum: it runs tasks to completion (FCFS).
//!
//! The default ladder is `[4, 8, ∞]`.
//!
//! # Reference
//! Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8

use std::collections::VecDeque;

use tracing::debug;

use crate::dispatching::WorkItem;
use crate::models::{Task, TimeSlice, Timeline};

/// Default quanta for the time-sliced levels; the final level is unbounded.
pub const DEFAULT_MLFQ_QUANTA: [i64; 2] = [4, 8];

/// Multilevel feedback queue with a configurable quantum ladder.
///
/// # Example
///
/// ```
/// use cpu_schedule::policies::MultilevelFeedbackQueue;
/// use cpu_schedule::models::Task;
///
/// let timeline = MultilevelFeedbackQueue::new().timeline(&[Task::new(1, 0, 20)]);
/// // 4 at level 0, 8 at level 1, the rest at level 2
/// let levels: Vec<_> = timeline.iter().map(|s| s.level).collect();
/// assert_eq!(levels, vec![Some(0), Some(1), Some(2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilevelFeedbackQueue {
    quanta: Vec<i64>,
}

impl MultilevelFeedbackQueue {
    /// Creates an MLFQ with the default `[4, 8, ∞]` ladder.
    pub fn new() -> Self {
        Self::with_quanta(DEFAULT_MLFQ_QUANTA.to_vec())
    }

    /// Creates an MLFQ with the given quanta for the time-sliced levels.
    ///
    /// One extra run-to-completion level is always appended below them.
    pub fn with_quanta(quanta: Vec<i64>) -> Self {
        Self { quanta }
    }

    /// Quanta of the time-sliced levels.
    pub fn quanta(&self) -> &[i64] {
        &self.quanta
    }

    /// Total number of levels, including the final unbounded one.
    pub fn levels(&self) -> usize {
        self.quanta.len() + 1
    }

    /// Simulates the run. Any non-positive quantum yields an empty timeline.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        let mut timeline = Timeline::new();
        if tasks.is_empty() || self.quanta.iter().any(|&q| q <= 0) {
            return timeline;
        }

        let last = self.quanta.len();
        let mut items = WorkItem::by_arrival(tasks);
        let mut queues: Vec<VecDeque<usize>> = vec![VecDeque::new(); self.levels()];
        let mut admitted = 0;
        let mut time = 0;

        loop {
            while admitted < items.len() && items[admitted].task.has_arrived(time) {
                queues[0].push_back(admitted);
                admitted += 1;
            }

            let next = queues
                .iter_mut()
                .enumerate()
                .find_map(|(level, q)| q.pop_front().map(|idx| (level, idx)));

            let Some((level, idx)) = next else {
                match items.get(admitted) {
                    Some(upcoming) => {
                        time = time.max(upcoming.task.arrival_time);
                        continue;
                    }
                    None => break,
                }
            };

            let budget = self.quanta.get(level).copied().unwrap_or(i64::MAX);
            let item = &mut items[idx];
            let start = time;
            time += item.run_for(budget);
            timeline.push(TimeSlice::new(item.id(), start, time).at_level(level as u32));

            while admitted < items.len() && items[admitted].task.has_arrived(time) {
                queues[0].push_back(admitted);
                admitted += 1;
            }

            let item = &mut items[idx];
            if item.is_pending() {
                let demoted = (level + 1).min(last);
                item.level = demoted as u32;
                debug!(
                    task = item.id(),
                    from = level,
                    to = demoted,
                    remaining = item.remaining_time,
                    "quantum expired, demoting"
                );
                queues[demoted].push_back(idx);
            }
        }

        timeline
    }
}

impl Default for MultilevelFeedbackQueue {
    fn default() -> Self {
        Self::new()
    }
}
