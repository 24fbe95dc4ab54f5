//! Largest-demand-first greedy exam scheduler.
//!
//! # Algorithm
//!
//! For each course, in demand order:
//! 1. Each date from start to end, ascending.
//! 2. Each feasible window, tightest first.
//! 3. Each active room that seats the course, ascending room ID.
//!    - Skip the room if it is reserved for the window.
//!    - Ask the invigilator assigner for K free staff.
//!    - Commit room and staff together, or move on.
//!
//! A course that finds nothing is reported with the most specific failure
//! class observed. Committed placements are never revisited.
//!
//! # Complexity
//! O(c * d * w * (r + s)) where c=courses, d=dates, w=windows, r=rooms,
//! s=staff. Every reservation check is O(1) average.

use chrono::NaiveDate;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::conflict::ConflictIndex;
use crate::demand::aggregate_demand;
use crate::models::{
    CourseDemand, ExamWindow, ExistingBooking, InvigilatorAssignment, Placement, Room, Scope,
    Staff,
};
use crate::store::Snapshot;

use super::invigilator::InvigilatorAssigner;
use super::report::{Report, ResultAggregator, UnscheduledReason};

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// First exam date (inclusive).
    pub start_date: NaiveDate,
    /// Last exam date (inclusive).
    pub end_date: NaiveDate,
    /// How many catalog windows are usable per day.
    pub windows_per_day: usize,
    /// Exam type of the scope.
    pub exam_type: String,
    /// Semester of the scope.
    pub semester: String,
}

impl GenerateRequest {
    /// Creates a request.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        windows_per_day: usize,
        exam_type: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            windows_per_day,
            exam_type: exam_type.into(),
            semester: semester.into(),
        }
    }

    /// The (semester, exam type) scope this run replaces.
    pub fn scope(&self) -> Scope {
        Scope::new(self.semester.trim(), self.exam_type.trim())
    }

    /// Calendar dates in range, ascending. Empty if start > end.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of calendar days in range.
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end_date - self.start_date).num_days() + 1).unwrap_or(0)
    }
}

/// Caps the search by room candidates examined and by wall-clock time.
#[derive(Debug)]
struct SearchBudget {
    steps: u64,
    max_steps: Option<u64>,
    deadline: Option<Instant>,
}

impl SearchBudget {
    fn new(max_steps: Option<u64>, time_budget: Option<Duration>) -> Self {
        Self {
            steps: 0,
            max_steps,
            deadline: time_budget.map(|b| Instant::now() + b),
        }
    }

    fn exhausted(&self) -> bool {
        self.max_steps.is_some_and(|max| self.steps >= max)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Consumes one step; `false` once the budget is spent.
    fn step(&mut self) -> bool {
        if self.exhausted() {
            return false;
        }
        self.steps += 1;
        true
    }
}

/// Result of searching placements for one course.
enum Search<'a> {
    Placed {
        room: &'a Room,
        date: NaiveDate,
        window: &'a ExamWindow,
        staff: Vec<&'a str>,
    },
    Failed(UnscheduledReason, String),
    OutOfBudget,
}

/// Greedy exam scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::config::EngineConfig;
/// use u_timetable::models::{Course, Registration, Room, Staff};
/// use u_timetable::scheduler::{GenerateRequest, GreedyScheduler};
/// use u_timetable::store::Snapshot;
///
/// let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let snapshot = Snapshot {
///     courses: vec![Course::new("c1", "CS101", 90)],
///     registrations: (0..40)
///         .map(|i| Registration::new(format!("s{i}"), "c1", "S1"))
///         .collect(),
///     rooms: vec![Room::new("R1", 50)],
///     staff: vec![Staff::new("L1"), Staff::new("L2")],
///     bookings: vec![],
/// };
/// let request = GenerateRequest::new(day, day, 1, "Final", "S1");
///
/// let report = GreedyScheduler::new(EngineConfig::default()).schedule(&request, &snapshot);
/// assert_eq!(report.scheduled_count, 1);
/// assert_eq!(report.timetable.assignments.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    config: EngineConfig,
}

impl GreedyScheduler {
    /// Creates a scheduler.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aggregates demand from the snapshot and schedules it.
    pub fn schedule(&self, request: &GenerateRequest, snapshot: &Snapshot) -> Report {
        let demands = aggregate_demand(
            request.semester.trim(),
            &snapshot.courses,
            &snapshot.registrations,
        );
        self.schedule_demands(
            request,
            &demands,
            &snapshot.rooms,
            &snapshot.staff,
            &snapshot.bookings,
        )
    }

    /// Schedules pre-ordered demands.
    ///
    /// `demands` are processed in the given order; use
    /// [`crate::demand::order_demand`] for the standard ordering.
    pub fn schedule_demands(
        &self,
        request: &GenerateRequest,
        demands: &[CourseDemand],
        rooms: &[Room],
        staff: &[Staff],
        bookings: &[ExistingBooking],
    ) -> Report {
        let scope = request.scope();
        let mut active_rooms: Vec<&Room> = rooms.iter().filter(|r| r.active).collect();
        active_rooms.sort_by(|a, b| a.id.cmp(&b.id));

        let assigner = InvigilatorAssigner::new(staff, self.config.invigilators_per_room);
        let mut index = ConflictIndex::with_bookings(bookings);
        let mut budget = SearchBudget::new(self.config.max_search_steps, self.config.time_budget());
        let mut results = ResultAggregator::new(scope.clone(), demands.len());
        let dates: Vec<NaiveDate> = request.dates().collect();

        info!(
            scope = %scope,
            courses = demands.len(),
            rooms = active_rooms.len(),
            invigilators = assigner.pool_size(),
            days = dates.len(),
            windows_per_day = request.windows_per_day,
            bookings = bookings.len(),
            "starting exam timetable generation"
        );

        for (pos, demand) in demands.iter().enumerate() {
            if budget.exhausted() {
                self.abandon(&mut results, &demands[pos..]);
                break;
            }

            match self.search(
                demand,
                request.windows_per_day,
                &dates,
                &active_rooms,
                &assigner,
                &index,
                &mut budget,
            ) {
                Search::Placed {
                    room,
                    date,
                    window,
                    staff,
                } => {
                    index.reserve_room_window(date, &room.id, &window.id);
                    for s in &staff {
                        index.reserve_staff_window(date, s, &window.id);
                    }

                    let placement_id = scope.placement_id(results.next_sequence());
                    let assignments: Vec<InvigilatorAssignment> = staff
                        .iter()
                        .enumerate()
                        .map(|(i, s)| InvigilatorAssignment::new(&placement_id, *s, i + 1))
                        .collect();
                    let placement = Placement {
                        id: placement_id,
                        course_id: demand.course_id.clone(),
                        course_code: demand.code.clone(),
                        room_id: room.id.clone(),
                        date,
                        window_id: window.id.clone(),
                        start_time: window.start_label(),
                        end_time: window.end_label(),
                        student_count: demand.students,
                        semester: scope.semester.clone(),
                        exam_type: scope.exam_type.clone(),
                    };

                    debug!(
                        course = %demand.code,
                        %date,
                        window = %window.id,
                        room = %room.id,
                        invigilators = ?staff,
                        "placed exam"
                    );
                    results.record_scheduled(placement, assignments, window, room.display_name());
                }
                Search::Failed(reason, message) => {
                    warn!(course = %demand.code, %reason, "{message}");
                    results.record_unscheduled(demand, reason, message);
                }
                Search::OutOfBudget => {
                    self.abandon(&mut results, &demands[pos..]);
                    break;
                }
            }
        }

        results.set_search_steps(budget.steps);
        let report = results.finish();
        info!(
            scope = %scope,
            scheduled = report.scheduled_count,
            unscheduled = report.unscheduled_count,
            steps = report.search_steps,
            "exam timetable generation finished"
        );
        report
    }

    /// Marks `remaining` courses unscheduled after the budget ran out.
    fn abandon(&self, results: &mut ResultAggregator, remaining: &[CourseDemand]) {
        warn!(
            remaining = remaining.len(),
            "search budget exhausted; stopping early"
        );
        for demand in remaining {
            results.record_unscheduled(
                demand,
                UnscheduledReason::RunBudgetExhausted,
                format!(
                    "{}: run budget exhausted before the course could be scheduled",
                    demand.label()
                ),
            );
        }
    }

    /// Window IDs that must be free for `window` to be usable.
    fn blocking_windows<'a>(&'a self, window: &'a ExamWindow) -> Vec<&'a str> {
        if self.config.block_overlapping_windows {
            self.config
                .catalog
                .overlapping(window)
                .into_iter()
                .map(|w| w.id.as_str())
                .collect()
        } else {
            vec![window.id.as_str()]
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn search<'a>(
        &'a self,
        demand: &CourseDemand,
        windows_per_day: usize,
        dates: &[NaiveDate],
        rooms: &[&'a Room],
        assigner: &'a InvigilatorAssigner,
        index: &ConflictIndex,
        budget: &mut SearchBudget,
    ) -> Search<'a> {
        let catalog = &self.config.catalog;
        let windows = catalog.feasible_windows(windows_per_day, demand.duration_minutes);
        if windows.is_empty() {
            let max = catalog.max_duration(windows_per_day).unwrap_or(0);
            return Search::Failed(
                UnscheduledReason::DurationExceedsCatalog,
                format!(
                    "{}: required duration {} min exceeds all configured exam windows (max {} min)",
                    demand.label(),
                    demand.duration_minutes,
                    max
                ),
            );
        }

        let candidates: Vec<&'a Room> = rooms
            .iter()
            .copied()
            .filter(|r| r.fits(demand.students))
            .collect();
        if candidates.is_empty() {
            let largest = rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
            return Search::Failed(
                UnscheduledReason::NoRoomCapacity,
                format!(
                    "{}: no active room seats {} students (largest capacity {})",
                    demand.label(),
                    demand.students,
                    largest
                ),
            );
        }

        let blocking: Vec<Vec<&str>> = windows.iter().map(|w| self.blocking_windows(*w)).collect();
        let mut staff_short = false;

        for &date in dates {
            for (&window, block) in windows.iter().zip(&blocking) {
                for &room in &candidates {
                    if !budget.step() {
                        return Search::OutOfBudget;
                    }
                    if !index.room_free_in(date, &room.id, block) {
                        continue;
                    }
                    match assigner.propose(index, date, block) {
                        Some(staff) => {
                            return Search::Placed {
                                room,
                                date,
                                window,
                                staff,
                            };
                        }
                        None => {
                            // Staff availability does not depend on the room.
                            staff_short = true;
                            break;
                        }
                    }
                }
            }
        }

        if staff_short {
            Search::Failed(
                UnscheduledReason::InsufficientInvigilators,
                format!(
                    "{}: insufficient invigilators; a room was free but never with {} available staff",
                    demand.label(),
                    assigner.required()
                ),
            )
        } else {
            Search::Failed(
                UnscheduledReason::RangeExhausted,
                format!(
                    "{}: no free room/window in range for {} students",
                    demand.label(),
                    demand.students
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::order_demand;
    use crate::models::{Course, Registration, SlotCatalog};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn demand(code: &str, duration: u32, students: u32) -> CourseDemand {
        CourseDemand::new(code.to_lowercase(), code, duration, students)
    }

    fn staff(n: usize) -> Vec<Staff> {
        (1..=n).map(|i| Staff::new(format!("L{i}"))).collect()
    }

    fn request(days: u32, per_day: usize) -> GenerateRequest {
        GenerateRequest::new(day(1), day(days), per_day, "Final", "S1")
    }

    fn single_window() -> EngineConfig {
        EngineConfig::default().with_catalog(SlotCatalog::new(vec![ExamWindow::from_clock(
            "1",
            (7, 30),
            (9, 0),
        )]))
    }

    #[test]
    fn test_single_course_scheduled() {
        let scheduler = GreedyScheduler::new(single_window());
        let report = scheduler.schedule_demands(
            &request(1, 1),
            &[demand("CS101", 90, 40)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        assert!(report.success);
        assert_eq!(report.scheduled_count, 1);
        let p = &report.timetable.placements[0];
        assert_eq!(p.room_id, "R1");
        assert_eq!(p.window_id, "1");
        assert_eq!(p.date, day(1));
        assert_eq!(p.student_count, 40);
        assert_eq!(p.start_time, "07:30");
        assert_eq!(p.end_time, "09:00");

        let a = report.timetable.assignments_for_placement(&p.id);
        assert_eq!(a.len(), 2);
        assert_eq!((a[0].staff_id.as_str(), a[0].order), ("L1", 1));
        assert_eq!((a[1].staff_id.as_str(), a[1].order), ("L2", 2));
        assert_eq!(a[1].role, "Invigilator 2");
    }

    #[test]
    fn test_duration_exceeds_catalog() {
        let scheduler = GreedyScheduler::default();
        let report = scheduler.schedule_demands(
            &request(30, 6),
            &[demand("LONG", 200, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        assert!(!report.success);
        let u = report.unscheduled_course("LONG").unwrap();
        assert_eq!(u.reason, UnscheduledReason::DurationExceedsCatalog);
        assert!(u.message.contains("exceeds all configured exam windows"));
        assert!(u.message.contains("max 180"));
        assert_eq!(report.search_steps, 0);
    }

    #[test]
    fn test_duration_checked_against_configured_prefix() {
        // 120-minute window exists in the catalog but only 4 windows are used
        let report = GreedyScheduler::default().schedule_demands(
            &request(3, 4),
            &[demand("MID", 120, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );
        assert_eq!(
            report.unscheduled[0].reason,
            UnscheduledReason::DurationExceedsCatalog
        );
    }

    #[test]
    fn test_equal_demand_tie_break_by_code() {
        let snapshot = Snapshot {
            courses: vec![Course::new("c1", "B2", 90), Course::new("c2", "A1", 90)],
            registrations: (0..30)
                .flat_map(|i| {
                    [
                        Registration::new(format!("s{i}"), "c1", "S1"),
                        Registration::new(format!("s{i}"), "c2", "S1"),
                    ]
                })
                .collect(),
            rooms: vec![Room::new("R1", 30)],
            staff: staff(4),
            bookings: vec![],
        };

        let report = GreedyScheduler::new(single_window()).schedule(&request(1, 1), &snapshot);
        assert_eq!(report.scheduled_count, 1);
        assert!(report.scheduled_exam("A1").is_some());
        let u = report.unscheduled_course("B2").unwrap();
        assert_eq!(u.reason, UnscheduledReason::RangeExhausted);
        assert!(u.message.contains("no free room/window in range"));
    }

    #[test]
    fn test_insufficient_invigilators_never_partial() {
        let report = GreedyScheduler::new(single_window()).schedule_demands(
            &request(1, 1),
            &[demand("CS101", 90, 40)],
            &[Room::new("R1", 50)],
            &staff(1),
            &[],
        );

        assert_eq!(report.scheduled_count, 0);
        assert!(report.timetable.is_empty());
        assert!(report.timetable.assignments.is_empty());
        let u = report.unscheduled_course("CS101").unwrap();
        assert_eq!(u.reason, UnscheduledReason::InsufficientInvigilators);
        assert!(u.message.contains("insufficient invigilators"));
    }

    #[test]
    fn test_unavailable_staff_not_used() {
        let mut pool = staff(1);
        pool.push(Staff::new("L0").unavailable());
        let report = GreedyScheduler::new(single_window()).schedule_demands(
            &request(1, 1),
            &[demand("CS101", 90, 10)],
            &[Room::new("R1", 50)],
            &pool,
            &[],
        );
        assert_eq!(
            report.unscheduled[0].reason,
            UnscheduledReason::InsufficientInvigilators
        );
    }

    #[test]
    fn test_rerun_is_identical() {
        let run = || {
            GreedyScheduler::new(single_window())
                .schedule_demands(
                    &request(1, 1),
                    &[demand("CS101", 90, 40)],
                    &[Room::new("R1", 50)],
                    &staff(2),
                    &[],
                )
                .to_json(false)
                .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_no_room_capacity() {
        let report = GreedyScheduler::default().schedule_demands(
            &request(5, 6),
            &[demand("BIG", 90, 100)],
            &[Room::new("R1", 50), Room::new("R9", 500).inactive()],
            &staff(2),
            &[],
        );
        let u = &report.unscheduled[0];
        assert_eq!(u.reason, UnscheduledReason::NoRoomCapacity);
        assert!(u.message.contains("largest capacity 50"));
    }

    #[test]
    fn test_tightest_window_first() {
        let scheduler = GreedyScheduler::default();
        let report = scheduler.schedule_demands(
            &request(1, 6),
            &[demand("A", 100, 10), demand("B", 60, 10)],
            &[Room::new("R1", 50)],
            &staff(4),
            &[],
        );
        assert_eq!(report.scheduled_exam("A").unwrap().window_id, "5");
        assert_eq!(report.scheduled_exam("B").unwrap().window_id, "1");
    }

    #[test]
    fn test_rooms_scanned_by_ascending_id() {
        let rooms = vec![Room::new("R3", 50), Room::new("R1", 50), Room::new("R2", 50)];
        let report = GreedyScheduler::new(single_window()).schedule_demands(
            &request(1, 1),
            &[demand("A", 90, 10), demand("B", 90, 10)],
            &rooms,
            &staff(4),
            &[],
        );

        let a = report.timetable.placement_for_course("a").unwrap();
        let b = report.timetable.placement_for_course("b").unwrap();
        assert_eq!(a.room_id, "R1");
        assert_eq!(b.room_id, "R2");
        assert_eq!(a.window_id, b.window_id);

        let b_staff: Vec<&str> = report
            .timetable
            .assignments_for_placement(&b.id)
            .iter()
            .map(|x| x.staff_id.as_str())
            .collect();
        assert_eq!(b_staff, vec!["L3", "L4"]);
    }

    #[test]
    fn test_staff_shortage_moves_to_next_window() {
        let config = EngineConfig::default().with_catalog(SlotCatalog::new(vec![
            ExamWindow::from_clock("1", (7, 30), (9, 0)),
            ExamWindow::from_clock("2", (9, 30), (11, 0)),
        ]));
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(1, 2),
            &[demand("A", 90, 10), demand("B", 90, 10)],
            &[Room::new("R1", 50), Room::new("R2", 50)],
            &staff(2),
            &[],
        );

        assert!(report.success);
        let b = report.timetable.placement_for_course("b").unwrap();
        assert_eq!(b.window_id, "2");
        assert_eq!(b.room_id, "R1");
    }

    fn overlapping_pair() -> SlotCatalog {
        SlotCatalog::new(vec![
            ExamWindow::from_clock("2", (9, 30), (11, 0)),
            ExamWindow::from_clock("5", (10, 0), (12, 0)),
        ])
    }

    #[test]
    fn test_overlapping_windows_block_room() {
        let config = EngineConfig::default()
            .with_catalog(overlapping_pair())
            .with_overlap_blocking(true);
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(2, 2),
            &[demand("A", 120, 10), demand("B", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(4),
            &[],
        );

        let a = report.timetable.placement_for_course("a").unwrap();
        let b = report.timetable.placement_for_course("b").unwrap();
        assert_eq!((a.date, a.window_id.as_str()), (day(1), "5"));
        assert_eq!((b.date, b.window_id.as_str()), (day(2), "2"));
    }

    #[test]
    fn test_overlap_blocking_off_by_default() {
        let config = EngineConfig::default().with_catalog(overlapping_pair());
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(2, 2),
            &[demand("A", 120, 10), demand("B", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        let b = report.timetable.placement_for_course("b").unwrap();
        assert_eq!((b.date, b.window_id.as_str()), (day(1), "2"));
    }

    #[test]
    fn test_default_uses_every_window_of_a_room() {
        let demands: Vec<CourseDemand> =
            (0..6).map(|i| demand(&format!("C{i}"), 90, 10)).collect();
        let report = GreedyScheduler::default().schedule_demands(
            &request(1, 6),
            &demands,
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        assert!(report.success, "unscheduled: {:?}", report.unscheduled_courses);
        assert_eq!(report.scheduled_count, 6);
        let mut windows: Vec<&str> = report
            .timetable
            .placements
            .iter()
            .map(|p| p.window_id.as_str())
            .collect();
        windows.sort_unstable();
        assert_eq!(windows, vec!["1", "2", "3", "4", "5", "6"]);

        let blocking = EngineConfig::default().with_overlap_blocking(true);
        let report = GreedyScheduler::new(blocking).schedule_demands(
            &request(1, 6),
            &demands,
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );
        assert_eq!(report.scheduled_count, 4);
    }

    #[test]
    fn test_existing_bookings_respected() {
        let bookings = vec![ExistingBooking {
            date: day(1),
            window_id: "1".into(),
            room_id: "R1".into(),
            staff_ids: vec!["L1".into()],
        }];
        let report = GreedyScheduler::new(single_window()).schedule_demands(
            &request(1, 1),
            &[demand("A", 90, 10)],
            &[Room::new("R1", 50), Room::new("R2", 50)],
            &staff(3),
            &bookings,
        );

        let p = &report.timetable.placements[0];
        assert_eq!(p.room_id, "R2");
        let s: Vec<&str> = report
            .timetable
            .assignments_for_placement(&p.id)
            .iter()
            .map(|a| a.staff_id.as_str())
            .collect();
        assert_eq!(s, vec!["L2", "L3"]);
    }

    #[test]
    fn test_step_budget_exhausted() {
        let config = single_window().with_max_search_steps(1);
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(3, 1),
            &[demand("A", 90, 10), demand("B", 90, 10), demand("C", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        assert!(report.is_complete());
        assert_eq!(report.scheduled_count, 1);
        assert_eq!(report.unscheduled_courses, vec!["B", "C"]);
        assert!(report
            .unscheduled
            .iter()
            .all(|u| u.reason == UnscheduledReason::RunBudgetExhausted));
        assert_eq!(report.search_steps, 1);
    }

    #[test]
    fn test_time_budget_exhausted() {
        let config = single_window().with_time_budget(Duration::ZERO);
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(3, 1),
            &[demand("A", 90, 10), demand("B", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );

        assert!(report.is_complete());
        assert_eq!(report.scheduled_count, 0);
        assert_eq!(report.search_steps, 0);
        assert_eq!(report.unscheduled_courses, vec!["A", "B"]);
        assert!(report
            .unscheduled
            .iter()
            .all(|u| u.reason == UnscheduledReason::RunBudgetExhausted));
    }

    #[test]
    fn test_zero_budget_schedules_nothing() {
        let config = single_window().with_max_search_steps(0);
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(3, 1),
            &[demand("A", 90, 10), demand("B", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );
        assert_eq!(report.scheduled_count, 0);
        assert_eq!(report.unscheduled_count, 2);
    }

    #[test]
    fn test_configurable_invigilator_count() {
        let config = single_window().with_invigilators_per_room(3);
        let report = GreedyScheduler::new(config).schedule_demands(
            &request(1, 1),
            &[demand("A", 90, 10)],
            &[Room::new("R1", 50)],
            &staff(3),
            &[],
        );
        assert_eq!(report.timetable.assignments.len(), 3);
    }

    #[test]
    fn test_given_order_is_processing_order() {
        let mut demands = vec![demand("SMALL", 90, 5), demand("LARGE", 90, 45)];
        order_demand(&mut demands);
        let report = GreedyScheduler::new(single_window()).schedule_demands(
            &request(1, 1),
            &demands,
            &[Room::new("R1", 50)],
            &staff(2),
            &[],
        );
        assert!(report.scheduled_exam("LARGE").is_some());
        assert_eq!(report.unscheduled_courses, vec!["SMALL"]);
    }

    #[test]
    fn test_empty_input() {
        let report = GreedyScheduler::default().schedule_demands(&request(1, 1), &[], &[], &[], &[]);
        assert!(report.success);
        assert_eq!(report.total_to_schedule, 0);
    }

    #[test]
    fn test_request_dates() {
        let r = request(3, 1);
        let dates: Vec<NaiveDate> = r.dates().collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(r.day_count(), 3);

        let reversed = GenerateRequest::new(day(3), day(1), 1, "Final", "S1");
        assert_eq!(reversed.dates().count(), 0);
        assert_eq!(reversed.day_count(), 0);
    }

    #[test]
    fn test_scope_labels_trimmed() {
        let r = GenerateRequest::new(day(1), day(1), 1, " Final ", " S1");
        assert_eq!(r.scope(), Scope::new("S1", "Final"));
    }
}
