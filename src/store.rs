//! Storage boundary.
//!
//! The engine reads one snapshot per run and writes the finished
//! timetable back in one call. `TimetableStore` is the seam a real
//! database sits behind; `InMemoryStore` backs tests and the CLI.
//!
//! # Atomicity
//! `replace_scope` must purge the scope's previous rows and insert the new
//! ones as a single all-or-nothing operation. On error the previous rows
//! must still be in place.

use chrono::NaiveDate;
use serde::{de, Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Course, ExistingBooking, Registration, Room, Scope, Staff, Timetable};

/// Errors raised by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected for {scope}: {reason}")]
    WriteRejected { scope: Scope, reason: String },

    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Registry data read once at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Course registry.
    pub courses: Vec<Course>,
    /// Registrations (any semester; the run filters its own).
    pub registrations: Vec<Registration>,
    /// Room registry.
    pub rooms: Vec<Room>,
    /// Staff registry.
    pub staff: Vec<Staff>,
    /// Placements of other scopes inside the requested date range.
    pub bookings: Vec<ExistingBooking>,
}

impl Snapshot {
    /// Parses a snapshot from a JSON object.
    ///
    /// Missing lists default to empty. Any other top-level JSON value is
    /// rejected, including arrays, which serde would otherwise read
    /// positionally.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(StoreError::Decode(de::Error::custom(
                "snapshot must be a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Read/write access to timetable data.
pub trait TimetableStore {
    /// Loads the registry snapshot for a run over `[start, end]`.
    ///
    /// `bookings` must cover every other scope's placements in the range
    /// and must exclude `scope` itself, which is about to be replaced.
    fn load_snapshot(
        &self,
        scope: &Scope,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Snapshot, StoreError>;

    /// Atomically replaces all rows of `scope` with `timetable`.
    fn replace_scope(&mut self, scope: &Scope, timetable: &Timetable) -> Result<(), StoreError>;
}

/// In-memory store holding registry data and per-scope timetables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    registry: Snapshot,
    timetables: BTreeMap<Scope, Timetable>,
    fail_writes: bool,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from registry data.
    ///
    /// `snapshot.bookings` are kept as external bookings that belong to no
    /// stored scope; they are reported by every load that covers their date.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            registry: snapshot,
            ..Self::default()
        }
    }

    /// Seeds previously persisted rows for a scope.
    pub fn with_timetable(mut self, scope: Scope, timetable: Timetable) -> Self {
        self.timetables.insert(scope, timetable);
        self
    }

    /// Makes every subsequent write fail (for failure-path testing).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Persisted timetable of a scope.
    pub fn timetable(&self, scope: &Scope) -> Option<&Timetable> {
        self.timetables.get(scope)
    }

    /// Scopes with persisted rows.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.timetables.keys()
    }

    fn bookings_in_range(&self, scope: &Scope, start: NaiveDate, end: NaiveDate) -> Vec<ExistingBooking> {
        let in_range = |d: NaiveDate| d >= start && d <= end;

        let mut bookings: Vec<ExistingBooking> = self
            .registry
            .bookings
            .iter()
            .filter(|b| in_range(b.date))
            .cloned()
            .collect();

        for (other, timetable) in self.timetables.iter().filter(|(s, _)| *s != scope) {
            for p in timetable.placements.iter().filter(|p| in_range(p.date)) {
                let staff_ids = timetable
                    .assignments_for_placement(&p.id)
                    .into_iter()
                    .map(|a| a.staff_id.clone())
                    .collect();
                bookings.push(ExistingBooking {
                    date: p.date,
                    window_id: p.window_id.clone(),
                    room_id: p.room_id.clone(),
                    staff_ids,
                });
            }
            debug!(scope = %other, "collected bookings from other scope");
        }

        bookings
    }
}

impl TimetableStore for InMemoryStore {
    fn load_snapshot(
        &self,
        scope: &Scope,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            courses: self.registry.courses.clone(),
            registrations: self
                .registry
                .registrations
                .iter()
                .filter(|r| r.semester == scope.semester)
                .cloned()
                .collect(),
            rooms: self.registry.rooms.clone(),
            staff: self.registry.staff.clone(),
            bookings: self.bookings_in_range(scope, start, end),
        })
    }

    fn replace_scope(&mut self, scope: &Scope, timetable: &Timetable) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteRejected {
                scope: scope.clone(),
                reason: "store is read-only".to_string(),
            });
        }

        let previous = self.timetables.insert(scope.clone(), timetable.clone());
        info!(
            scope = %scope,
            purged = previous.map_or(0, |t| t.placement_count()),
            placements = timetable.placement_count(),
            assignments = timetable.assignments.len(),
            "replaced scope timetable"
        );
        Ok(())
    }
}
