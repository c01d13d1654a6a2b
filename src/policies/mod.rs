//! CPU scheduling policies.
//!
//! Each policy is a pure function of its input task list: it builds a
//! private working copy, simulates a single CPU, and returns the
//! [`Timeline`](crate::models::Timeline) of slices it dispatched.
//! Metrics are derived afterwards by [`crate::metrics`].
//!
//! # Families
//!
//! | Family | Policies | Preemption |
//! |--------|----------|------------|
//! | Non-preemptive | FCFS, SJF, LJF, Priority | None |
//! | Time-sliced | Round Robin | At quantum expiry |
//! | Remaining time | SRTF, LRTF | Every tick |
//! | Multilevel | MLQ, MLFQ | At quantum expiry |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod feedback;
mod multilevel;
mod non_preemptive;
mod remaining_time;
mod round_robin;

pub use feedback::{MultilevelFeedbackQueue, DEFAULT_MLFQ_QUANTA};
pub use multilevel::{MultilevelQueue, DEFAULT_MLQ_QUANTUM, MLQ_LEVELS};
pub use non_preemptive::NonPreemptiveScheduler;
pub use remaining_time::RemainingTimeScheduler;
pub use round_robin::RoundRobin;

use crate::dispatching::WorkItem;

/// Earliest arrival among tasks that still have work, if any.
///
/// Used to skip over idle CPU time.
fn next_arrival(items: &[WorkItem]) -> Option<i64> {
    items
        .iter()
        .filter(|w| w.is_pending())
        .map(|w| w.task.arrival_time)
        .min()
}
