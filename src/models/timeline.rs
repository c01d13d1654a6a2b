//! Timeline (solution) model.
//!
//! A timeline is the ordered list of CPU time slices produced by one
//! simulation run. Slices never overlap: there is exactly one CPU.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3 (Gantt charts)

use serde::{Deserialize, Serialize};

use super::TaskId;

/// One contiguous span of CPU time assigned to a single task.
///
/// Covers `[start_time, end_time)`; slices are only emitted for
/// execution of more than zero time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlice {
    /// Task that ran.
    #[serde(rename = "id")]
    pub task_id: TaskId,
    /// Start time (inclusive).
    pub start_time: i64,
    /// End time (exclusive).
    pub end_time: i64,
    /// Ready-queue level the slice was dispatched from (multilevel policies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl TimeSlice {
    /// Creates a new slice.
    pub fn new(task_id: TaskId, start_time: i64, end_time: i64) -> Self {
        Self {
            task_id,
            start_time,
            end_time,
            level: None,
        }
    }

    /// Records the queue level the slice came from.
    pub fn at_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Length of the slice.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Whether two slices share any instant.
    #[inline]
    pub fn overlaps(&self, other: &TimeSlice) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// An ordered execution timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    slices: Vec<TimeSlice>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice. Zero-length slices are dropped.
    pub fn push(&mut self, slice: TimeSlice) {
        if slice.duration() > 0 {
            self.slices.push(slice);
        }
    }

    /// Appends every slice of another timeline, keeping its order.
    pub fn extend(&mut self, other: Timeline) {
        for slice in other.slices {
            self.push(slice);
        }
    }

    /// Slices in execution order.
    pub fn slices(&self) -> &[TimeSlice] {
        &self.slices
    }

    /// Iterates over slices in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeSlice> {
        self.slices.iter()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the timeline has no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// All slices for a given task, in execution order.
    pub fn slices_for_task(&self, task_id: TaskId) -> Vec<&TimeSlice> {
        self.slices.iter().filter(|s| s.task_id == task_id).collect()
    }

    /// Latest end time across all slices (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.slices.iter().map(|s| s.end_time).max().unwrap_or(0)
    }

    /// Earliest start time across all slices.
    pub fn first_start(&self) -> Option<i64> {
        self.slices.iter().map(|s| s.start_time).min()
    }

    /// Total time the CPU spent running tasks.
    pub fn busy_time(&self) -> i64 {
        self.slices.iter().map(TimeSlice::duration).sum()
    }

    /// Sorted, de-duplicated slice boundaries (chart axis ticks).
    pub fn time_points(&self) -> Vec<i64> {
        let mut points: Vec<i64> = self
            .slices
            .iter()
            .flat_map(|s| [s.start_time, s.end_time])
            .collect();
        points.sort_unstable();
        points.dedup();
        points
    }

    /// Intervals between the first start and the makespan where the CPU is idle.
    pub fn idle_gaps(&self) -> Vec<(i64, i64)> {
        let mut ordered: Vec<&TimeSlice> = self.slices.iter().collect();
        ordered.sort_by_key(|s| s.start_time);

        let mut gaps = Vec::new();
        let mut cursor: Option<i64> = None;
        for slice in ordered {
            if let Some(end) = cursor {
                if slice.start_time > end {
                    gaps.push((end, slice.start_time));
                }
            }
            cursor = Some(cursor.map_or(slice.end_time, |c| c.max(slice.end_time)));
        }
        gaps
    }

    /// Distinct task ids in order of first execution.
    pub fn task_ids(&self) -> Vec<TaskId> {
        let mut ids = Vec::new();
        for slice in &self.slices {
            if !ids.contains(&slice.task_id) {
                ids.push(slice.task_id);
            }
        }
        ids
    }
}

impl FromIterator<TimeSlice> for Timeline {
    fn from_iter<I: IntoIterator<Item = TimeSlice>>(iter: I) -> Self {
        let mut timeline = Timeline::new();
        for slice in iter {
            timeline.push(slice);
        }
        timeline
    }
}

#[cfg(test)]
impl Timeline {
    /// `(task, start, end)` triples in execution order, for compact assertions.
    pub(crate) fn spans(&self) -> Vec<(TaskId, i64, i64)> {
        self.slices
            .iter()
            .map(|s| (s.task_id, s.start_time, s.end_time))
            .collect()
    }
}
