//! Simulation configuration.
//!
//! [`SimulationConfig`] is plain serde data, so it can be loaded from any
//! format the caller likes. Every field has a default; an empty document
//! yields an FCFS run.
//!
//! ```
//! use cpu_schedule::config::{Policy, SimulationConfig};
//!
//! let config = SimulationConfig::new(Policy::RoundRobin).with_quantum(3);
//! assert_eq!(config.quantum, 3);
//! assert_eq!("RRS".parse::<Policy>().unwrap(), Policy::RoundRobin);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::policies::{DEFAULT_MLFQ_QUANTA, DEFAULT_MLQ_QUANTUM};

/// Default round robin quantum.
pub const DEFAULT_QUANTUM: i64 = 2;

/// A CPU scheduling policy.
///
/// Serialized with the short names used by the selector (`FCFS`, `RRS`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// First Come First Served.
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Longest Job First (non-preemptive).
    #[serde(rename = "LJF")]
    Ljf,
    /// Static priority, lower value first (non-preemptive).
    #[serde(rename = "PRIORITY")]
    Priority,
    /// Round Robin with a caller-supplied quantum.
    #[serde(rename = "RRS")]
    RoundRobin,
    /// Shortest Remaining Time First.
    #[serde(rename = "SRTF")]
    Srtf,
    /// Longest Remaining Time First.
    #[serde(rename = "LRTF")]
    Lrtf,
    /// Two-level static multilevel queue.
    #[serde(rename = "MLQ")]
    Mlq,
    /// Three-level multilevel feedback queue.
    #[serde(rename = "MLFQ")]
    Mlfq,
}

impl Policy {
    /// Every supported policy, in selector order.
    pub const ALL: [Policy; 9] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Ljf,
        Policy::Srtf,
        Policy::Lrtf,
        Policy::RoundRobin,
        Policy::Priority,
        Policy::Mlq,
        Policy::Mlfq,
    ];

    /// Short name (`FCFS`, `RRS`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Ljf => "LJF",
            Policy::Priority => "PRIORITY",
            Policy::RoundRobin => "RRS",
            Policy::Srtf => "SRTF",
            Policy::Lrtf => "LRTF",
            Policy::Mlq => "MLQ",
            Policy::Mlfq => "MLFQ",
        }
    }

    /// Long, human-readable name.
    pub fn description(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Served",
            Policy::Sjf => "Shortest Job First",
            Policy::Ljf => "Longest Job First",
            Policy::Priority => "Priority Scheduling",
            Policy::RoundRobin => "Round Robin Scheduling",
            Policy::Srtf => "Shortest Remaining Time First",
            Policy::Lrtf => "Longest Remaining Time First",
            Policy::Mlq => "Multilevel Queue",
            Policy::Mlfq => "Multilevel Feedback Queue",
        }
    }

    /// Whether a task can be interrupted before it finishes.
    pub fn is_preemptive(&self) -> bool {
        !matches!(
            self,
            Policy::Fcfs | Policy::Sjf | Policy::Ljf | Policy::Priority
        )
    }

    /// Whether [`SimulationConfig::quantum`] applies.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, Policy::RoundRobin)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("RR") {
            return Ok(Policy::RoundRobin);
        }
        Policy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimulationError::UnknownPolicy(s.to_string()))
    }
}

/// What to do with tasks the chosen policy cannot schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleTasks {
    /// Leave them out of the run and list them in the report.
    #[default]
    Skip,
    /// Fail the run with a validation error.
    Reject,
}

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Policy to simulate.
    pub policy: Policy,
    /// Round robin quantum.
    pub quantum: i64,
    /// Queue-0 quantum for the multilevel queue.
    pub mlq_quantum: i64,
    /// Quanta of the time-sliced feedback levels; a final unbounded level follows.
    pub mlfq_quanta: Vec<i64>,
    /// Handling of tasks the policy cannot schedule.
    pub ineligible: IneligibleTasks,
}

impl SimulationConfig {
    /// Creates a config for `policy` with default parameters.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Sets the round robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the multilevel queue's queue-0 quantum.
    pub fn with_mlq_quantum(mut self, quantum: i64) -> Self {
        self.mlq_quantum = quantum;
        self
    }

    /// Sets the feedback queue ladder.
    pub fn with_mlfq_quanta(mut self, quanta: Vec<i64>) -> Self {
        self.mlfq_quanta = quanta;
        self
    }

    /// Sets ineligible-task handling.
    pub fn with_ineligible(mut self, mode: IneligibleTasks) -> Self {
        self.ineligible = mode;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            quantum: DEFAULT_QUANTUM,
            mlq_quantum: DEFAULT_MLQ_QUANTUM,
            mlfq_quanta: DEFAULT_MLFQ_QUANTA.to_vec(),
            ineligible: IneligibleTasks::default(),
        }
    }
}
