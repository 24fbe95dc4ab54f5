//! Invigilator selection.
//!
//! Staff are scanned in ascending ID order and the first K free for the
//! candidate (date, window) are proposed. Proposing reserves nothing; the
//! scheduler commits room and staff in one step.

use chrono::NaiveDate;

use crate::conflict::ConflictIndex;
use crate::models::Staff;

/// Proposes K free invigilators for a candidate (date, window).
#[derive(Debug, Clone)]
pub struct InvigilatorAssigner {
    /// Staff available for invigilation, ascending ID, deduplicated.
    pool: Vec<String>,
    required: usize,
}

impl InvigilatorAssigner {
    /// Builds the pool from staff flagged available for invigilation.
    pub fn new(staff: &[Staff], required: usize) -> Self {
        let mut pool: Vec<String> = staff
            .iter()
            .filter(|s| s.available_for_invigilation)
            .map(|s| s.id.clone())
            .collect();
        pool.sort();
        pool.dedup();
        Self { pool, required }
    }

    /// Invigilators needed per placement (K).
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of staff in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Staff pool in scan order.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Proposes the first K staff free on `date` in all of `windows`.
    ///
    /// `windows` is the candidate window plus any window that must also be
    /// free (clock overlaps). Returns `None` when fewer than K are free.
    pub fn propose(
        &self,
        index: &ConflictIndex,
        date: NaiveDate,
        windows: &[&str],
    ) -> Option<Vec<&str>> {
        if self.pool.len() < self.required {
            return None;
        }

        let chosen: Vec<&str> = self
            .pool
            .iter()
            .filter(|id| index.staff_free_in(date, id, windows))
            .take(self.required)
            .map(String::as_str)
            .collect();

        (chosen.len() == self.required).then_some(chosen)
    }
}
