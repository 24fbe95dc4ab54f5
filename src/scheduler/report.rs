//! Run results.
//!
//! `ResultAggregator` collects per-course outcomes during a run and
//! produces one immutable `Report`. Every course considered ends up in
//! exactly one of the scheduled or unscheduled lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{CourseDemand, ExamWindow, InvigilatorAssignment, Placement, Scope, Timetable};

/// Why a course could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnscheduledReason {
    /// Exam is longer than every configured window.
    DurationExceedsCatalog,
    /// No active room seats all registered students.
    NoRoomCapacity,
    /// A room was free, but never with K free invigilators.
    InsufficientInvigilators,
    /// No free room/window in the whole date range.
    RangeExhausted,
    /// The run stopped before reaching this course.
    RunBudgetExhausted,
}

impl UnscheduledReason {
    /// Stable kebab-case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DurationExceedsCatalog => "duration-exceeds-catalog",
            Self::NoRoomCapacity => "no-room-capacity",
            Self::InsufficientInvigilators => "insufficient-invigilators",
            Self::RangeExhausted => "range-exhausted",
            Self::RunBudgetExhausted => "run-budget-exhausted",
        }
    }
}

impl fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course left out of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledCourse {
    /// Course identifier.
    pub course_id: String,
    /// Course code.
    pub course_code: String,
    /// Failure class.
    pub reason: UnscheduledReason,
    /// Human-readable diagnostic.
    pub message: String,
}

/// Reporting view of one placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledExam {
    /// Placement identifier.
    pub placement_id: String,
    /// Course code.
    pub course_code: String,
    /// Room name.
    pub room_name: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Window start, `HH:MM`.
    pub window_start: String,
    /// Window end, `HH:MM`.
    pub window_end: String,
    /// Window ID.
    pub window_id: String,
}

/// Outcome of a timetabling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// True iff every course was placed.
    pub success: bool,
    /// True only once the timetable has been persisted.
    pub committed: bool,
    /// Semester of the run.
    pub semester: String,
    /// Exam type of the run.
    pub exam_type: String,
    /// Courses considered.
    pub total_to_schedule: usize,
    /// Courses placed.
    pub scheduled_count: usize,
    /// Courses not placed.
    pub unscheduled_count: usize,
    /// Codes of courses not placed, in processing order.
    pub unscheduled_courses: Vec<String>,
    /// Per-course failure details.
    pub unscheduled: Vec<UnscheduledCourse>,
    /// Diagnostic messages, one per unscheduled course.
    pub errors: Vec<String>,
    /// Placements enriched for display.
    pub scheduled_exams: Vec<ScheduledExam>,
    /// Rows to persist; serialized as top-level `placements` and
    /// `assignments`.
    #[serde(flatten)]
    pub timetable: Timetable,
    /// Room candidates examined.
    pub search_steps: u64,
}

impl Report {
    /// Whether scheduled + unscheduled == total.
    pub fn is_complete(&self) -> bool {
        self.scheduled_count + self.unscheduled_count == self.total_to_schedule
    }

    /// Marks the report as persisted.
    pub fn into_committed(mut self) -> Self {
        self.committed = true;
        self
    }

    /// Failure record for a course code.
    pub fn unscheduled_course(&self, course_code: &str) -> Option<&UnscheduledCourse> {
        self.unscheduled.iter().find(|u| u.course_code == course_code)
    }

    /// Display record for a course code.
    pub fn scheduled_exam(&self, course_code: &str) -> Option<&ScheduledExam> {
        self.scheduled_exams
            .iter()
            .find(|e| e.course_code == course_code)
    }

    /// Serializes the report as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Accumulates course outcomes for one run.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    scope: Scope,
    total: usize,
    timetable: Timetable,
    scheduled_exams: Vec<ScheduledExam>,
    unscheduled: Vec<UnscheduledCourse>,
    search_steps: u64,
}

impl ResultAggregator {
    /// Starts a run over `total` courses.
    pub fn new(scope: Scope, total: usize) -> Self {
        Self {
            scope,
            total,
            timetable: Timetable::new(),
            scheduled_exams: Vec::new(),
            unscheduled: Vec::new(),
            search_steps: 0,
        }
    }

    /// Sequence number for the next placement (1-based).
    pub fn next_sequence(&self) -> usize {
        self.timetable.placement_count() + 1
    }

    /// Courses recorded so far.
    pub fn recorded(&self) -> usize {
        self.timetable.placement_count() + self.unscheduled.len()
    }

    /// Records a committed placement.
    pub fn record_scheduled(
        &mut self,
        placement: Placement,
        assignments: Vec<InvigilatorAssignment>,
        window: &ExamWindow,
        room_name: &str,
    ) {
        self.scheduled_exams.push(ScheduledExam {
            placement_id: placement.id.clone(),
            course_code: placement.course_code.clone(),
            room_name: room_name.to_string(),
            date: placement.date,
            window_start: window.start_label(),
            window_end: window.end_label(),
            window_id: window.id.clone(),
        });
        self.timetable.commit(placement, assignments);
    }

    /// Records a course that could not be placed.
    pub fn record_unscheduled(
        &mut self,
        demand: &CourseDemand,
        reason: UnscheduledReason,
        message: impl Into<String>,
    ) {
        self.unscheduled.push(UnscheduledCourse {
            course_id: demand.course_id.clone(),
            course_code: demand.code.clone(),
            reason,
            message: message.into(),
        });
    }

    /// Sets the number of room candidates examined.
    pub fn set_search_steps(&mut self, steps: u64) {
        self.search_steps = steps;
    }

    /// Produces the final, uncommitted report.
    pub fn finish(self) -> Report {
        debug_assert_eq!(
            self.recorded(),
            self.total,
            "every course must be scheduled or unscheduled"
        );

        let scheduled_count = self.timetable.placement_count();
        let unscheduled_count = self.unscheduled.len();

        Report {
            success: unscheduled_count == 0,
            committed: false,
            semester: self.scope.semester,
            exam_type: self.scope.exam_type,
            total_to_schedule: self.total,
            scheduled_count,
            unscheduled_count,
            unscheduled_courses: self
                .unscheduled
                .iter()
                .map(|u| u.course_code.clone())
                .collect(),
            errors: self.unscheduled.iter().map(|u| u.message.clone()).collect(),
            unscheduled: self.unscheduled,
            scheduled_exams: self.scheduled_exams,
            timetable: self.timetable,
            search_steps: self.search_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Scope {
        Scope::new("S1", "Final")
    }

    fn placement(seq: usize, code: &str) -> Placement {
        Placement {
            id: scope().placement_id(seq),
            course_id: code.to_lowercase(),
            course_code: code.into(),
            room_id: "R1".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            window_id: "1".into(),
            start_time: "07:30".into(),
            end_time: "09:00".into(),
            student_count: 10,
            semester: "S1".into(),
            exam_type: "Final".into(),
        }
    }

    #[test]
    fn test_reason_tags() {
        assert_eq!(
            UnscheduledReason::RunBudgetExhausted.to_string(),
            "run-budget-exhausted"
        );
        let json = serde_json::to_string(&UnscheduledReason::NoRoomCapacity).unwrap();
        assert_eq!(json, "\"no-room-capacity\"");
    }

    #[test]
    fn test_aggregate_mixed() {
        let window = ExamWindow::from_clock("1", (7, 30), (9, 0));
        let mut agg = ResultAggregator::new(scope(), 2);
        assert_eq!(agg.next_sequence(), 1);

        let p = placement(agg.next_sequence(), "A1");
        let pid = p.id.clone();
        agg.record_scheduled(
            p,
            vec![
                InvigilatorAssignment::new(&pid, "L1", 1),
                InvigilatorAssignment::new(&pid, "L2", 2),
            ],
            &window,
            "Hall A",
        );
        assert_eq!(agg.next_sequence(), 2);

        agg.record_unscheduled(
            &CourseDemand::new("b1", "B1", 90, 5),
            UnscheduledReason::RangeExhausted,
            "B1: no free room/window in range",
        );

        let report = agg.finish();
        assert!(!report.success);
        assert!(!report.committed);
        assert!(report.is_complete());
        assert_eq!(report.scheduled_count, 1);
        assert_eq!(report.unscheduled_courses, vec!["B1"]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.timetable.assignments.len(), 2);

        let exam = report.scheduled_exam("A1").unwrap();
        assert_eq!(exam.room_name, "Hall A");
        assert_eq!(exam.window_start, "07:30");
        assert_eq!(exam.placement_id, "S1/Final/0001");
        assert_eq!(
            report.unscheduled_course("B1").unwrap().reason,
            UnscheduledReason::RangeExhausted
        );
    }

    #[test]
    fn test_empty_run_is_success() {
        let report = ResultAggregator::new(scope(), 0).finish();
        assert!(report.success);
        assert!(report.is_complete());
        assert!(report.into_committed().committed);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ResultAggregator::new(scope(), 0).finish();
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        for key in [
            "success",
            "committed",
            "totalToSchedule",
            "scheduledCount",
            "unscheduledCount",
            "unscheduledCourses",
            "errors",
            "scheduledExams",
            "placements",
            "assignments",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("timetable").is_none());
    }

    #[test]
    fn test_report_rows_camel_case() {
        let window = ExamWindow::from_clock("1", (7, 30), (9, 0));
        let mut agg = ResultAggregator::new(scope(), 1);
        let p = placement(agg.next_sequence(), "A1");
        let pid = p.id.clone();
        agg.record_scheduled(p, vec![InvigilatorAssignment::new(&pid, "L1", 1)], &window, "R1");
        let report = agg.finish();

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        let row = &value["placements"][0];
        assert_eq!(row["courseCode"], "A1");
        assert_eq!(row["studentCount"], 10);
        assert!(row.get("course_code").is_none());
        assert_eq!(value["assignments"][0]["staffId"], "L1");
        assert_eq!(value["assignments"][0]["placementId"], "S1/Final/0001");

        let back: Report = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(back, report);
    }
}
