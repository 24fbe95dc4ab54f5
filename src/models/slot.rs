//! Daily exam windows and the slot catalog.
//!
//! A window is a fixed clock-time interval that can host exams on any
//! calendar day. The catalog is an ordered table of at most
//! [`SlotCatalog::MAX_WINDOWS`] windows; a run uses only the first N.
//!
//! # Time Model
//! Clock times are minutes since midnight. Intervals are half-open
//! `[start, end)`, so back-to-back windows do not overlap.

use serde::{Deserialize, Serialize};

/// A named daily exam window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamWindow {
    /// Window identifier (e.g. "1").
    pub id: String,
    /// Start (minutes since midnight, inclusive).
    pub start_min: u32,
    /// End (minutes since midnight, exclusive).
    pub end_min: u32,
    /// Maximum exam length this window can hold (minutes).
    pub duration_minutes: u32,
}

impl ExamWindow {
    /// Minutes in a day; windows end at or before midnight.
    pub const MINUTES_PER_DAY: u32 = 24 * 60;

    /// Creates a window; duration is derived from the clock interval.
    pub fn new(id: impl Into<String>, start_min: u32, end_min: u32) -> Self {
        Self {
            id: id.into(),
            start_min,
            end_min,
            duration_minutes: end_min.saturating_sub(start_min),
        }
    }

    /// Creates a window from `(hour, minute)` pairs.
    pub fn from_clock(id: impl Into<String>, start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(id, start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    /// Whether an exam of `duration_minutes` fits.
    #[inline]
    pub fn fits(&self, duration_minutes: u32) -> bool {
        self.duration_minutes >= duration_minutes
    }

    /// Whether two windows overlap in clock time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Start as `HH:MM`.
    pub fn start_label(&self) -> String {
        clock_label(self.start_min)
    }

    /// End as `HH:MM`.
    pub fn end_label(&self) -> String {
        clock_label(self.end_min)
    }
}

/// Formats minutes since midnight as `HH:MM`.
pub fn clock_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Ordered table of daily exam windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCatalog {
    windows: Vec<ExamWindow>,
}

impl SlotCatalog {
    /// Upper bound on catalog size.
    pub const MAX_WINDOWS: usize = 6;

    /// Creates a catalog. Entries beyond [`Self::MAX_WINDOWS`] are dropped.
    pub fn new(mut windows: Vec<ExamWindow>) -> Self {
        windows.truncate(Self::MAX_WINDOWS);
        Self { windows }
    }

    /// The standard six-window day.
    ///
    /// | id | window      | minutes |
    /// |----|-------------|---------|
    /// | 1  | 07:30–09:00 | 90      |
    /// | 2  | 09:30–11:00 | 90      |
    /// | 3  | 13:00–14:30 | 90      |
    /// | 4  | 15:00–16:30 | 90      |
    /// | 5  | 10:00–12:00 | 120     |
    /// | 6  | 14:00–17:00 | 180     |
    pub fn reference() -> Self {
        Self::new(vec![
            ExamWindow::from_clock("1", (7, 30), (9, 0)),
            ExamWindow::from_clock("2", (9, 30), (11, 0)),
            ExamWindow::from_clock("3", (13, 0), (14, 30)),
            ExamWindow::from_clock("4", (15, 0), (16, 30)),
            ExamWindow::from_clock("5", (10, 0), (12, 0)),
            ExamWindow::from_clock("6", (14, 0), (17, 0)),
        ])
    }

    /// All windows in catalog order.
    pub fn windows(&self) -> &[ExamWindow] {
        &self.windows
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the catalog has no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Looks up a window by ID.
    pub fn get(&self, id: &str) -> Option<&ExamWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// The first `per_day` windows (clamped to catalog size).
    pub fn configured(&self, per_day: usize) -> &[ExamWindow] {
        &self.windows[..per_day.min(self.windows.len())]
    }

    /// Longest configured window within the first `per_day` (minutes).
    pub fn max_duration(&self, per_day: usize) -> Option<u32> {
        self.configured(per_day)
            .iter()
            .map(|w| w.duration_minutes)
            .max()
    }

    /// Configured windows that can hold `duration_minutes`, tightest first.
    ///
    /// Ties on duration keep catalog order (stable sort), so the result is
    /// fully determined by the catalog.
    pub fn feasible_windows(&self, per_day: usize, duration_minutes: u32) -> Vec<&ExamWindow> {
        let mut feasible: Vec<&ExamWindow> = self
            .configured(per_day)
            .iter()
            .filter(|w| w.fits(duration_minutes))
            .collect();
        feasible.sort_by_key(|w| w.duration_minutes);
        feasible
    }

    /// Every catalog window overlapping `window` in clock time, itself included.
    ///
    /// Scans the whole catalog, not just the configured prefix: bookings
    /// from other runs may use windows this run does not.
    pub fn overlapping(&self, window: &ExamWindow) -> Vec<&ExamWindow> {
        self.windows
            .iter()
            .filter(|w| w.id == window.id || w.overlaps(window))
            .collect()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
