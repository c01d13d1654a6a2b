//! Dispatching rules and rule engine for CPU scheduling.
//!
//! Every policy ultimately answers one question: among the ready tasks,
//! which one runs next? That choice is expressed as a dispatching rule
//! (FCFS, SJF, LJF, PRIORITY, SRT, LRT) evaluated by a rule engine that
//! owns the tie-breaking strategy.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{RuleEngine, WorkItem};
//! use cpu_schedule::dispatching::rules;
//! use cpu_schedule::models::Task;
//!
//! let engine = RuleEngine::new(rules::Sjf);
//! let items = WorkItem::by_arrival(&[Task::new(1, 0, 8), Task::new(2, 0, 4)]);
//! assert_eq!(engine.select_best(&items, 0), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;
mod work_item;

pub use engine::{RuleEngine, TieBreaker};
pub use work_item::WorkItem;

use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that scores ready work items.
///
/// # Score Convention
/// **Lower score = dispatched first.** Returning `None` marks the item as
/// ineligible under this rule; it will never be selected.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "SRT").
    fn name(&self) -> &'static str;

    /// Scores a work item. `None` = not selectable by this rule.
    fn evaluate(&self, item: &WorkItem) -> Option<RuleScore>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
