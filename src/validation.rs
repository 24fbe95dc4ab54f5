//! Input validation for timetabling runs.
//!
//! Checks run before any state is created:
//! - Request: date order, window count, non-empty scope labels
//! - Configuration: invigilator count, catalog shape
//! - Snapshot: duplicate IDs and codes, exam durations, room capacities
//!
//! All checks collect every problem found instead of stopping at the first.

use std::collections::HashSet;
use std::fmt;

use crate::config::EngineConfig;
use crate::models::{ExamWindow, SlotCatalog};
use crate::scheduler::GenerateRequest;
use crate::store::Snapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Start date is after end date.
    InvalidDateRange,
    /// Windows per day outside `1..=catalog size`.
    WindowCountOutOfRange,
    /// Semester or exam type is blank.
    EmptyField,
    /// Two entities share the same ID.
    DuplicateId,
    /// Two courses share the same code.
    DuplicateCode,
    /// An active course has a zero exam duration.
    InvalidDuration,
    /// An active room has zero capacity.
    InvalidCapacity,
    /// Slot catalog or invigilator count is unusable.
    InvalidConfig,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates run parameters against the slot catalog.
///
/// Checks:
/// 1. `start_date <= end_date`
/// 2. `1 <= windows_per_day <= catalog.len()`
/// 3. Semester and exam type are non-blank
pub fn validate_request(request: &GenerateRequest, catalog: &SlotCatalog) -> ValidationResult {
    let mut errors = Vec::new();

    if request.start_date > request.end_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDateRange,
            format!(
                "Start date {} is after end date {}",
                request.start_date, request.end_date
            ),
        ));
    }

    if request.windows_per_day == 0 || request.windows_per_day > catalog.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::WindowCountOutOfRange,
            format!(
                "Windows per day must be between 1 and {}, got {}",
                catalog.len(),
                request.windows_per_day
            ),
        ));
    }

    if request.semester.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyField,
            "Semester must not be empty",
        ));
    }

    if request.exam_type.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyField,
            "Exam type must not be empty",
        ));
    }

    finish(errors)
}

/// Validates engine configuration.
///
/// Checks:
/// 1. At least one invigilator per placement
/// 2. Catalog has 1..=6 windows with unique IDs and positive durations
/// 3. Each window lies within one day and its duration fits its clock span
pub fn validate_config(config: &EngineConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.invigilators_per_room == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "At least one invigilator per room is required",
        ));
    }

    let catalog = &config.catalog;
    if catalog.is_empty() || catalog.len() > SlotCatalog::MAX_WINDOWS {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            format!(
                "Slot catalog must hold 1 to {} windows, has {}",
                SlotCatalog::MAX_WINDOWS,
                catalog.len()
            ),
        ));
    }

    let mut window_ids = HashSet::new();
    for w in catalog.windows() {
        if !window_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate window ID: {}", w.id),
            ));
        }
        if w.duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!("Window '{}' has zero duration", w.id),
            ));
        }
        if w.end_min > ExamWindow::MINUTES_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!("Window '{}' ends after midnight ({} min)", w.id, w.end_min),
            ));
        }
        let span = w.end_min.saturating_sub(w.start_min);
        if w.duration_minutes > span {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!(
                    "Window '{}' declares {} min but spans {} min",
                    w.id, w.duration_minutes, span
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates snapshot integrity.
///
/// Checks:
/// 1. No duplicate course, room, or staff IDs
/// 2. No duplicate course codes
/// 3. Active courses have a positive exam duration
/// 4. Active rooms have a positive capacity
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_ids = HashSet::new();
    let mut course_codes = HashSet::new();
    for c in &snapshot.courses {
        if !course_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if !course_codes.insert(c.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate course code: {}", c.code),
            ));
        }
        if c.active && c.exam_duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Course '{}' has zero exam duration", c.code),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in &snapshot.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.active && r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' has zero capacity", r.display_name()),
            ));
        }
    }

    let mut staff_ids = HashSet::new();
    for s in &snapshot.staff {
        if !staff_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", s.id),
            ));
        }
    }

    finish(errors)
}
