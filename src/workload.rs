//! Reproducible synthetic workloads.
//!
//! Generates task sets with Bernoulli arrivals: at every tick of the
//! horizon a task arrives with probability `p_arrival`, and is short with
//! probability `p_short`. The same seed always yields the same task set.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::Task;

/// Seeded generator for sample task sets.
///
/// # Example
///
/// ```
/// use cpu_schedule::workload::WorkloadGenerator;
///
/// let a = WorkloadGenerator::new(7).with_horizon(50).generate();
/// let b = WorkloadGenerator::new(7).with_horizon(50).generate();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    horizon: i64,
    p_arrival: f64,
    p_short: f64,
    short_burst: i64,
    long_burst: i64,
    priorities: Option<(i32, i32)>,
    queue_levels: Option<u32>,
}

impl WorkloadGenerator {
    /// Creates a generator with a 100-tick horizon and a 30/70 short/long mix.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            horizon: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            priorities: None,
            queue_levels: None,
        }
    }

    /// Sets the number of ticks during which tasks may arrive.
    pub fn with_horizon(mut self, ticks: i64) -> Self {
        self.horizon = ticks;
        self
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.p_arrival = p;
        self
    }

    /// Sets the burst mix: probability of a short task and the two burst lengths.
    pub fn with_burst_mix(mut self, p_short: f64, short_burst: i64, long_burst: i64) -> Self {
        self.p_short = p_short;
        self.short_burst = short_burst.max(1);
        self.long_burst = long_burst.max(1);
        self
    }

    /// Assigns every task a uniform priority in `low..=high`.
    pub fn with_priorities(mut self, low: i32, high: i32) -> Self {
        self.priorities = Some((low.min(high), low.max(high)));
        self
    }

    /// Assigns every task a uniform queue level in `0..levels`.
    pub fn with_queue_levels(mut self, levels: u32) -> Self {
        self.queue_levels = (levels > 0).then_some(levels);
        self
    }

    /// Generates the task set. IDs are assigned 1, 2, 3, ... in arrival order.
    pub fn generate(&self) -> Vec<Task> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut tasks = Vec::new();

        for tick in 0..self.horizon.max(0) {
            if rng.random::<f64>() >= self.p_arrival {
                continue;
            }

            let burst = if rng.random::<f64>() < self.p_short {
                self.short_burst
            } else {
                self.long_burst
            };

            let mut task = Task::new(tasks.len() as u32 + 1, tick, burst);
            if let Some((low, high)) = self.priorities {
                task = task.with_priority(rng.random_range(low..=high));
            }
            if let Some(levels) = self.queue_levels {
                task = task.with_queue_level(rng.random_range(0..levels));
            }
            tasks.push(task);
        }

        tasks
    }
}
