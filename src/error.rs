//! Crate error types.

use thiserror::Error;

use crate::models::Scope;
use crate::scheduler::Report;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Errors returned by [`crate::generate`].
///
/// Unschedulable courses are not errors; they are reported in the
/// [`Report`].
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("invalid request: {}", join(.0))]
    InvalidRequest(Vec<ValidationError>),

    #[error("invalid snapshot: {}", join(.0))]
    InvalidSnapshot(Vec<ValidationError>),

    #[error("failed to load snapshot: {0}")]
    Load(#[source] StoreError),

    /// The timetable was computed but not persisted. `report` is the
    /// uncommitted result; the scope's previous rows are untouched.
    #[error("failed to persist timetable for {scope}: {source}")]
    Persistence {
        scope: Scope,
        #[source]
        source: StoreError,
        report: Box<Report>,
    },
}

impl TimetableError {
    /// Validation errors behind an invalid request or snapshot.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidRequest(errors) | Self::InvalidSnapshot(errors) => errors,
            _ => &[],
        }
    }

    /// The computed-but-uncommitted report of a persistence failure.
    pub fn uncommitted_report(&self) -> Option<&Report> {
        match self {
            Self::Persistence { report, .. } => Some(report.as_ref()),
            _ => None,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
