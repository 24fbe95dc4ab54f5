//! Timetabling domain models.
//!
//! Read-only registry snapshots (courses, registrations, rooms, staff),
//! the daily slot catalog, and the rows a run produces (placements and
//! invigilator assignments).
//!
//! # Domain Mappings
//!
//! | u-timetable | Scheduling term | Registry record |
//! |-------------|-----------------|-----------------|
//! | CourseDemand | Job | Course + registrations |
//! | Room | Primary resource | Room |
//! | Staff | Human resource | Lecturer |
//! | ExamWindow | Time slot | Exam shift |
//! | Placement | Assignment | Exam schedule row |

mod course;
mod room;
mod slot;
mod staff;
mod timetable;

pub use course::{Course, CourseDemand, Registration};
pub use room::Room;
pub use slot::{clock_label, ExamWindow, SlotCatalog};
pub use staff::Staff;
pub use timetable::{ExistingBooking, InvigilatorAssignment, Placement, Scope, Timetable};
