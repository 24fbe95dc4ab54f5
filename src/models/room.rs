//! Exam rooms.

use serde::{Deserialize, Serialize};

/// A room that can host exams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name (e.g. "A-101").
    #[serde(default)]
    pub name: String,
    /// Seats available for examinees.
    pub capacity: u32,
    /// Inactive rooms never receive placements.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Room {
    /// Creates an active room.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            active: true,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the room inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether `students` examinees fit.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        self.capacity >= students
    }

    /// Name for reports; falls back to the ID.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
