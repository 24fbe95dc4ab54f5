//! Courses, registrations, and per-run scheduling demand.
//!
//! `Course` and `Registration` mirror the registry snapshots the engine
//! reads. `CourseDemand` is the derived, immutable unit of work the
//! scheduler places.

use serde::{Deserialize, Serialize};

/// A course as stored in the course registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Course code (e.g. "CS101"); unique, used for tie-breaking.
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Exam length (minutes).
    pub exam_duration_minutes: u32,
    /// Inactive courses are never scheduled.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Course {
    /// Creates an active course.
    pub fn new(id: impl Into<String>, code: impl Into<String>, exam_duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: String::new(),
            exam_duration_minutes,
            active: true,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the course inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// A student's registration for a course in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registration {
    /// Registered student.
    pub student_id: String,
    /// Course registered for.
    pub course_id: String,
    /// Semester label (e.g. "2025-2026/1").
    pub semester: String,
}

impl Registration {
    /// Creates a registration.
    pub fn new(
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
            semester: semester.into(),
        }
    }
}

/// Scheduling demand for one course in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDemand {
    /// Course identifier.
    pub course_id: String,
    /// Course code.
    pub code: String,
    /// Course name (reporting only).
    pub name: String,
    /// Exam length (minutes, > 0).
    pub duration_minutes: u32,
    /// Registered students for the target semester.
    pub students: u32,
}

impl CourseDemand {
    /// Creates a demand record.
    pub fn new(
        course_id: impl Into<String>,
        code: impl Into<String>,
        duration_minutes: u32,
        students: u32,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            code: code.into(),
            name: String::new(),
            duration_minutes,
            students,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// "CODE (Name)" or just the code when unnamed.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.code.clone()
        } else {
            format!("{} ({})", self.code, self.name)
        }
    }
}
