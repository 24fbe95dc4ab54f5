//! Timetable (solution) model.
//!
//! A timetable is the set of committed placements for one scope together
//! with their invigilator assignments. These are the rows handed to the
//! storage collaborator at the end of a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The (semester, exam type) pair that segments independent runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    /// Semester label (e.g. "2025-2026/1").
    pub semester: String,
    /// Exam type (e.g. "Final", "Midterm").
    pub exam_type: String,
}

impl Scope {
    /// Creates a scope.
    pub fn new(semester: impl Into<String>, exam_type: impl Into<String>) -> Self {
        Self {
            semester: semester.into(),
            exam_type: exam_type.into(),
        }
    }

    /// Deterministic placement ID for the `seq`-th placement of a run.
    pub fn placement_id(&self, seq: usize) -> String {
        format!("{}/{}/{:04}", self.semester, self.exam_type, seq)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester, self.exam_type)
    }
}

/// A committed (course, date, window, room) assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Placement identifier (unique within the run).
    pub id: String,
    /// Placed course.
    pub course_id: String,
    /// Course code (denormalized for reporting).
    pub course_code: String,
    /// Assigned room.
    pub room_id: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Daily window ID.
    pub window_id: String,
    /// Window start, `HH:MM`.
    pub start_time: String,
    /// Window end, `HH:MM`.
    pub end_time: String,
    /// Examinees seated in the room.
    pub student_count: u32,
    /// Semester of the run.
    pub semester: String,
    /// Exam type of the run.
    pub exam_type: String,
}

/// A staff member supervising a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvigilatorAssignment {
    /// Supervised placement.
    pub placement_id: String,
    /// Assigned staff member.
    pub staff_id: String,
    /// Position 1..=K within the placement.
    pub order: usize,
    /// Role label (e.g. "Invigilator 1").
    pub role: String,
}

impl InvigilatorAssignment {
    /// Creates the `order`-th assignment of a placement.
    pub fn new(placement_id: impl Into<String>, staff_id: impl Into<String>, order: usize) -> Self {
        Self {
            placement_id: placement_id.into(),
            staff_id: staff_id.into(),
            order,
            role: format!("Invigilator {order}"),
        }
    }
}

/// A placement already persisted for another scope.
///
/// Its room and staff are unavailable to the current run for that
/// (date, window).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    /// Booked date.
    pub date: NaiveDate,
    /// Booked window ID.
    pub window_id: String,
    /// Booked room.
    pub room_id: String,
    /// Staff supervising the booking.
    #[serde(default)]
    pub staff_ids: Vec<String>,
}

/// Committed placements and their invigilator assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Placements in commit order.
    pub placements: Vec<Placement>,
    /// Assignments in commit order (K per placement).
    pub assignments: Vec<InvigilatorAssignment>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement with its staffing.
    pub fn commit(&mut self, placement: Placement, assignments: Vec<InvigilatorAssignment>) {
        self.placements.push(placement);
        self.assignments.extend(assignments);
    }

    /// Number of placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Finds a placement by ID.
    pub fn placement(&self, placement_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == placement_id)
    }

    /// Finds the placement of a course.
    pub fn placement_for_course(&self, course_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.course_id == course_id)
    }

    /// All placements in a room.
    pub fn placements_for_room(&self, room_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.room_id == room_id)
            .collect()
    }

    /// Assignments of one placement, in order.
    pub fn assignments_for_placement(&self, placement_id: &str) -> Vec<&InvigilatorAssignment> {
        let mut found: Vec<&InvigilatorAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.placement_id == placement_id)
            .collect();
        found.sort_by_key(|a| a.order);
        found
    }

    /// Assignments of one staff member.
    pub fn assignments_for_staff(&self, staff_id: &str) -> Vec<&InvigilatorAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.staff_id == staff_id)
            .collect()
    }

    /// Duties per staff member, keyed by staff ID.
    pub fn duty_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for a in &self.assignments {
            *counts.entry(a.staff_id.clone()).or_insert(0) += 1;
        }
        counts
    }
}
