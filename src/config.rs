//! Engine configuration.
//!
//! Every field has a default matching standard operation, so an empty
//! JSON object (`{}`) is a valid configuration.

use serde::{de, Deserialize, Serialize};
use std::time::Duration;

use crate::models::SlotCatalog;

/// Tunables for a timetabling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Invigilators required per placement (K).
    pub invigilators_per_room: usize,
    /// Treat windows overlapping in clock time as mutually exclusive for
    /// rooms and staff. Off by default: reservations are keyed on the
    /// window ID alone.
    pub block_overlapping_windows: bool,
    /// Maximum room candidates examined across the run. `None` = unbounded.
    pub max_search_steps: Option<u64>,
    /// Wall-clock budget for the search (ms). `None` = unbounded.
    pub time_budget_ms: Option<u64>,
    /// Daily window table.
    pub catalog: SlotCatalog,
}

impl EngineConfig {
    /// Default number of invigilators per placement.
    pub const DEFAULT_INVIGILATORS: usize = 2;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            invigilators_per_room: Self::DEFAULT_INVIGILATORS,
            block_overlapping_windows: false,
            max_search_steps: None,
            time_budget_ms: None,
            catalog: SlotCatalog::reference(),
        }
    }

    /// Parses a configuration from a JSON object. Non-object input is
    /// rejected.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(de::Error::custom("configuration must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Sets K.
    pub fn with_invigilators_per_room(mut self, k: usize) -> Self {
        self.invigilators_per_room = k;
        self
    }

    /// Enables or disables clock-overlap blocking.
    pub fn with_overlap_blocking(mut self, enabled: bool) -> Self {
        self.block_overlapping_windows = enabled;
        self
    }

    /// Sets the search step budget.
    pub fn with_max_search_steps(mut self, steps: u64) -> Self {
        self.max_search_steps = Some(steps);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Replaces the slot catalog.
    pub fn with_catalog(mut self, catalog: SlotCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Wall-clock budget as a `Duration`.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
