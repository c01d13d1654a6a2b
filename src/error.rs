//! Error types for simulation runs.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by [`Simulator::run`](crate::simulation::Simulator::run)
/// and policy name parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The task list failed validation.
    #[error("invalid task input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// A time quantum was zero or negative.
    #[error("time quantum must be positive, got {0}")]
    InvalidQuantum(i64),
    /// The policy name is not recognized.
    #[error("unknown scheduling policy '{0}'")]
    UnknownPolicy(String),
}

impl SimulationError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
