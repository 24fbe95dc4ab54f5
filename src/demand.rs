//! Demand aggregation.
//!
//! Turns registration snapshots for one semester into the ordered list of
//! courses the scheduler places.
//!
//! # Ordering
//!
//! Largest demand first: descending student count, ties broken by
//! ascending course code, then ascending course ID. Placing large courses
//! before capacity fragments raises the overall placement rate, and the
//! tie-break makes the order independent of snapshot order.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::{Course, CourseDemand, Registration};

/// Builds the ordered demand list for `semester`.
///
/// Only active courses with at least one registration in the semester are
/// included. A student registered twice for the same course counts once.
pub fn aggregate_demand(
    semester: &str,
    courses: &[Course],
    registrations: &[Registration],
) -> Vec<CourseDemand> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for reg in registrations.iter().filter(|r| r.semester == semester) {
        if seen.insert((reg.course_id.as_str(), reg.student_id.as_str())) {
            *counts.entry(reg.course_id.as_str()).or_insert(0) += 1;
        }
    }

    let mut demands: Vec<CourseDemand> = courses
        .iter()
        .filter(|c| c.active)
        .filter_map(|c| {
            let students = counts.get(c.id.as_str()).copied().unwrap_or(0);
            (students > 0).then(|| {
                CourseDemand::new(&c.id, &c.code, c.exam_duration_minutes, students)
                    .with_name(&c.name)
            })
        })
        .collect();

    order_demand(&mut demands);
    demands
}

/// Sorts demands into scheduling order (see module docs).
pub fn order_demand(demands: &mut [CourseDemand]) {
    demands.sort_by(compare_demand);
}

fn compare_demand(a: &CourseDemand, b: &CourseDemand) -> Ordering {
    b.students
        .cmp(&a.students)
        .then_with(|| a.code.cmp(&b.code))
        .then_with(|| a.course_id.cmp(&b.course_id))
}
