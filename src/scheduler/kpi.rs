//! Timetable quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | scheduled / considered |
//! | Seat Fill | seated students / capacity of used rooms |
//! | Room-Slot Utilization | placements / (active rooms × days × windows) |
//! | Duty Spread | max − min invigilation duties among assigned staff |

use std::collections::{BTreeMap, HashMap};

use crate::models::Room;

use super::Report;

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Fraction of courses placed (0.0..1.0; 1.0 when nothing to place).
    pub placement_rate: f64,
    /// Seated students over capacity of the rooms used (0.0..1.0).
    pub seat_fill: f64,
    /// Placements over available room-slots (0.0..1.0).
    pub room_slot_utilization: f64,
    /// Per-room share of its slots used.
    pub utilization_by_room: BTreeMap<String, f64>,
    /// Invigilation duties per staff member.
    pub duties_by_staff: BTreeMap<String, usize>,
    /// Most duties held by one staff member.
    pub max_duties: usize,
    /// Fewest duties held by an assigned staff member.
    pub min_duties: usize,
}

impl TimetableKpi {
    /// Computes KPIs for a report.
    ///
    /// # Arguments
    /// * `report` - The run result.
    /// * `rooms` - Room registry (capacities; inactive rooms are ignored).
    /// * `days` - Days in the run's date range.
    /// * `windows_per_day` - Windows used per day.
    pub fn calculate(report: &Report, rooms: &[Room], days: usize, windows_per_day: usize) -> Self {
        let placement_rate = if report.total_to_schedule == 0 {
            1.0
        } else {
            report.scheduled_count as f64 / report.total_to_schedule as f64
        };

        let capacity: HashMap<&str, u32> = rooms
            .iter()
            .filter(|r| r.active)
            .map(|r| (r.id.as_str(), r.capacity))
            .collect();

        let placements = &report.timetable.placements;
        let seated: u64 = placements.iter().map(|p| u64::from(p.student_count)).sum();
        let offered: u64 = placements
            .iter()
            .filter_map(|p| capacity.get(p.room_id.as_str()))
            .map(|&c| u64::from(c))
            .sum();
        let seat_fill = if offered == 0 {
            0.0
        } else {
            seated as f64 / offered as f64
        };

        let slots_per_room = days * windows_per_day;
        let total_slots = capacity.len() * slots_per_room;
        let room_slot_utilization = if total_slots == 0 {
            0.0
        } else {
            placements.len() as f64 / total_slots as f64
        };

        let mut utilization_by_room = BTreeMap::new();
        if slots_per_room > 0 {
            for id in capacity.keys() {
                let used = report.timetable.placements_for_room(id).len();
                utilization_by_room.insert(id.to_string(), used as f64 / slots_per_room as f64);
            }
        }

        let duties_by_staff = report.timetable.duty_counts();
        let max_duties = duties_by_staff.values().copied().max().unwrap_or(0);
        let min_duties = duties_by_staff.values().copied().min().unwrap_or(0);

        Self {
            placement_rate,
            seat_fill,
            room_slot_utilization,
            utilization_by_room,
            duties_by_staff,
            max_duties,
            min_duties,
        }
    }

    /// Difference between the busiest and least busy assigned invigilator.
    pub fn duty_spread(&self) -> usize {
        self.max_duties - self.min_duties
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, min_seat_fill: f64) -> bool {
        self.placement_rate >= min_placement_rate && self.seat_fill >= min_seat_fill
    }
}
