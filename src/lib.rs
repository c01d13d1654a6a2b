//! Single-CPU scheduling simulator.
//!
//! Simulates the classic textbook CPU scheduling policies over a list of
//! tasks with integer arrival and burst times. Each run produces a timeline
//! of execution slices (a Gantt chart), per-task timing metrics and a
//! schedule-level summary.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TimeSlice`, `Timeline`, `ScheduledTask`
//! - **`dispatching`**: Priority rules and the rule engine that picks the next task
//! - **`policies`**: FCFS, SJF, LJF, Priority, Round Robin, SRTF, LRTF, MLQ, MLFQ
//! - **`metrics`**: Turnaround, waiting and response times plus summary figures
//! - **`validation`**: Input integrity checks and per-policy eligibility
//! - **`config`**: Policy selection and tunable quanta
//! - **`simulation`**: One-call facade tying the above together
//! - **`workload`**: Seeded synthetic task sets
//!
//! # Example
//!
//! ```
//! use cpu_schedule::{simulate, Policy, Task};
//!
//! let tasks = vec![Task::new(1, 0, 5), Task::new(2, 1, 3)];
//! let report = simulate(&tasks, Policy::Fcfs).unwrap();
//! assert_eq!(report.summary.makespan, 8);
//! assert_eq!(report.tasks[1].metrics.waiting_time, 4);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod config;
pub mod dispatching;
pub mod error;
pub mod metrics;
pub mod models;
pub mod policies;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use config::{IneligibleTasks, Policy, SimulationConfig};
pub use error::SimulationError;
pub use metrics::ScheduleSummary;
pub use models::{ScheduledTask, Task, TaskId, TaskMetrics, TimeSlice, Timeline};
pub use simulation::{simulate, SimulationReport, Simulator};
