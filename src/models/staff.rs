//! Staff eligible to invigilate.

use serde::{Deserialize, Serialize};

/// A staff member (lecturer) who may supervise exams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique staff identifier.
    pub id: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Only flagged staff are considered by the invigilator assigner.
    #[serde(default = "default_true")]
    pub available_for_invigilation: bool,
}

fn default_true() -> bool {
    true
}

impl Staff {
    /// Creates a staff member available for invigilation.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            available_for_invigilation: true,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Opts the staff member out of invigilation.
    pub fn unavailable(mut self) -> Self {
        self.available_for_invigilation = false;
        self
    }
}
