//! Rule engine for dispatch selection.
//!
//! Composes a primary dispatching rule with optional tie-breaking rules
//! and a final deterministic tie-breaker.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore, WorkItem};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the first candidate found in scan order (default).
    #[default]
    InputOrder,
    /// Lowest task id wins.
    ById,
}

/// A composable rule engine for selecting the next task to dispatch.
///
/// The primary rule decides eligibility: items it scores `None` are never
/// selected. Tie-breaker rules are consulted in order only when earlier
/// rules tie; an unscored item loses a tie-breaker comparison.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{RuleEngine, TieBreaker};
/// use cpu_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new(rules::Priority)
///     .with_tie_breaker(rules::Sjf)
///     .with_final_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.primary_name(), "PRIORITY");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an engine driven by `primary`.
    pub fn new<R: DispatchingRule + 'static>(primary: R) -> Self {
        Self {
            rules: vec![Arc::new(primary)],
            tie_breaker: TieBreaker::InputOrder,
        }
    }

    /// Adds a tie-breaking rule, consulted after all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Name of the primary rule.
    pub fn primary_name(&self) -> &'static str {
        self.rules.first().map_or("NONE", |r| r.name())
    }

    /// Whether the primary rule can ever select this item.
    pub fn is_eligible(&self, item: &WorkItem) -> bool {
        self.primary_score(item).is_some()
    }

    /// Returns the index (into `items`) of the best ready item at `now`.
    ///
    /// Only items that have arrived, still have work, and are scored by the
    /// primary rule are candidates. Returns `None` if nothing is ready.
    pub fn select_best(&self, items: &[WorkItem], now: i64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, item) in items.iter().enumerate() {
            if !item.is_ready(now) || !self.is_eligible(item) {
                continue;
            }
            best = match best {
                Some(current) if self.compare(item, &items[current]) != Ordering::Less => {
                    Some(current)
                }
                _ => Some(idx),
            };
        }
        best
    }

    /// Evaluates a single item and returns the score from each rule.
    pub fn evaluate(&self, item: &WorkItem) -> Vec<Option<RuleScore>> {
        self.rules.iter().map(|r| r.evaluate(item)).collect()
    }

    fn primary_score(&self, item: &WorkItem) -> Option<RuleScore> {
        self.rules.first().and_then(|r| r.evaluate(item))
    }

    fn compare(&self, a: &WorkItem, b: &WorkItem) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a).unwrap_or(RuleScore::MAX);
            let score_b = rule.evaluate(b).unwrap_or(RuleScore::MAX);
            match score_a.cmp(&score_b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id().cmp(&b.id()),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
