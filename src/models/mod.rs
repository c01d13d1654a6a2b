//! CPU scheduling domain models.
//!
//! Provides the input task record, the slice/timeline output, and the
//! merged task-plus-metrics record handed to display layers.
//!
//! # Domain Mappings
//!
//! | cpu-schedule | Textbook | Chart |
//! |--------------|----------|-------|
//! | Task | Process | Row label |
//! | TimeSlice | CPU burst segment | Bar |
//! | Timeline | Gantt chart | Whole chart |
//! | ScheduledTask | Process table row | Results table row |

mod scheduled;
mod task;
mod timeline;

pub use scheduled::{ScheduledTask, TaskMetrics};
pub use task::{Task, TaskId};
pub use timeline::{TimeSlice, Timeline};
