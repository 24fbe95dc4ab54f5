//! Reservation tracking for rooms and staff.
//!
//! The conflict index records which (date, resource, window) triples are
//! taken. Checks and reservations are O(1) average; nothing is rescanned
//! as the run grows.
//!
//! The index is owned by a single run and threaded through the scheduler.
//! It is not synchronized: reservations must be made from one thread, in
//! decision order.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::ExistingBooking;

/// Composite-key set: date → window → resource IDs.
#[derive(Debug, Clone, Default)]
struct ReservationSet {
    by_date: HashMap<NaiveDate, HashMap<String, HashSet<String>>>,
    len: usize,
}

impl ReservationSet {
    fn contains(&self, date: NaiveDate, resource: &str, window: &str) -> bool {
        self.by_date
            .get(&date)
            .and_then(|windows| windows.get(window))
            .is_some_and(|resources| resources.contains(resource))
    }

    fn insert(&mut self, date: NaiveDate, resource: &str, window: &str) -> bool {
        let inserted = self
            .by_date
            .entry(date)
            .or_default()
            .entry(window.to_string())
            .or_default()
            .insert(resource.to_string());
        if inserted {
            self.len += 1;
        }
        inserted
    }
}

/// In-memory reservation tracker for one run.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::conflict::ConflictIndex;
///
/// let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let mut index = ConflictIndex::new();
/// assert!(index.room_window_free(day, "R1", "1"));
/// index.reserve_room_window(day, "R1", "1");
/// assert!(!index.room_window_free(day, "R1", "1"));
/// assert!(index.room_window_free(day, "R1", "2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    rooms: ReservationSet,
    staff: ReservationSet,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index pre-seeded with bookings from other scopes.
    pub fn with_bookings<'a>(bookings: impl IntoIterator<Item = &'a ExistingBooking>) -> Self {
        let mut index = Self::new();
        for b in bookings {
            index.rooms.insert(b.date, &b.room_id, &b.window_id);
            for staff_id in &b.staff_ids {
                index.staff.insert(b.date, staff_id, &b.window_id);
            }
        }
        index
    }

    /// Whether `room` is unreserved for (`date`, `window`).
    pub fn room_window_free(&self, date: NaiveDate, room: &str, window: &str) -> bool {
        !self.rooms.contains(date, room, window)
    }

    /// Whether `staff` is unreserved for (`date`, `window`).
    pub fn staff_window_free(&self, date: NaiveDate, staff: &str, window: &str) -> bool {
        !self.staff.contains(date, staff, window)
    }

    /// Whether `room` is unreserved in every one of `windows` on `date`.
    pub fn room_free_in(&self, date: NaiveDate, room: &str, windows: &[&str]) -> bool {
        windows.iter().all(|w| self.room_window_free(date, room, w))
    }

    /// Whether `staff` is unreserved in every one of `windows` on `date`.
    pub fn staff_free_in(&self, date: NaiveDate, staff: &str, windows: &[&str]) -> bool {
        windows.iter().all(|w| self.staff_window_free(date, staff, w))
    }

    /// Reserves `room` for (`date`, `window`).
    ///
    /// The caller must have checked [`Self::room_window_free`] in the same
    /// decision step.
    pub fn reserve_room_window(&mut self, date: NaiveDate, room: &str, window: &str) {
        let inserted = self.rooms.insert(date, room, window);
        debug_assert!(inserted, "room {room} double-booked on {date} window {window}");
    }

    /// Reserves `staff` for (`date`, `window`).
    ///
    /// The caller must have checked [`Self::staff_window_free`] in the same
    /// decision step.
    pub fn reserve_staff_window(&mut self, date: NaiveDate, staff: &str, window: &str) {
        let inserted = self.staff.insert(date, staff, window);
        debug_assert!(inserted, "staff {staff} double-booked on {date} window {window}");
    }

    /// Number of room reservations held.
    pub fn room_reservation_count(&self) -> usize {
        self.rooms.len
    }

    /// Number of staff reservations held.
    pub fn staff_reservation_count(&self) -> usize {
        self.staff.len
    }
}
