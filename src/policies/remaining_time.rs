//! Preemptive remaining-time policies: SRTF and LRTF.
//!
//! # Algorithm
//!
//! Tick-by-tick simulation. At each tick the best ready task by remaining
//! time is chosen (ties go to the earliest task in input order) and run for
//! one unit. Consecutive ticks of the same task coalesce into one slice; a
//! slice is closed whenever the chosen task changes or finishes.

use tracing::debug;

use super::next_arrival;
use crate::dispatching::{rules, RuleEngine, WorkItem};
use crate::models::{Task, TimeSlice, Timeline};

/// Tick-level preemptive scheduler.
#[derive(Debug, Clone)]
pub struct RemainingTimeScheduler {
    engine: RuleEngine,
}

/// The slice currently being extended.
#[derive(Debug, Clone, Copy)]
struct OpenSlice {
    idx: usize,
    start: i64,
}

impl RemainingTimeScheduler {
    /// Creates a scheduler with a custom rule engine.
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// Shortest Remaining Time First.
    pub fn srtf() -> Self {
        Self::new(RuleEngine::new(rules::Srt))
    }

    /// Longest Remaining Time First.
    pub fn lrtf() -> Self {
        Self::new(RuleEngine::new(rules::Lrt))
    }

    /// Simulates the run and returns coalesced slices in execution order.
    pub fn timeline(&self, tasks: &[Task]) -> Timeline {
        let mut items = WorkItem::from_tasks(tasks);
        let mut timeline = Timeline::new();
        let mut open: Option<OpenSlice> = None;
        let mut time = 0;

        loop {
            let Some(idx) = self.engine.select_best(&items, time) else {
                close(&mut timeline, &items, open.take(), time);
                match next_arrival(&items) {
                    Some(arrival) if arrival > time => {
                        time = arrival;
                        continue;
                    }
                    _ => break,
                }
            };

            if open.map(|o| o.idx) != Some(idx) {
                if let Some(prev) = open {
                    debug!(
                        rule = self.engine.primary_name(),
                        preempted = items[prev.idx].id(),
                        by = items[idx].id(),
                        at = time,
                        "preemption"
                    );
                }
                close(&mut timeline, &items, open.take(), time);
                open = Some(OpenSlice { idx, start: time });
            }

            items[idx].run_for(1);
            time += 1;

            if !items[idx].is_pending() {
                close(&mut timeline, &items, open.take(), time);
            }
        }

        timeline
    }
}

fn close(timeline: &mut Timeline, items: &[WorkItem], open: Option<OpenSlice>, end: i64) {
    if let Some(slice) = open {
        timeline.push(TimeSlice::new(items[slice.idx].id(), slice.start, end));
    }
}
