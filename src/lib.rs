//! Exam timetabling engine for the U-Engine ecosystem.
//!
//! Places each course's exam into a (date, daily window, room) triple and
//! staffs it with K invigilators, without double-booking any room or
//! staff member. Courses that cannot be placed are reported with a
//! specific reason.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `CourseDemand`, `Room`, `Staff`,
//!   `ExamWindow`, `SlotCatalog`, `Placement`, `InvigilatorAssignment`, `Timetable`
//! - **`demand`**: Registration snapshots → ordered scheduling demand
//! - **`conflict`**: O(1) room/staff reservation index
//! - **`scheduler`**: Greedy scheduler, invigilator assigner, report, KPIs
//! - **`validation`**: Request, configuration, and snapshot checks
//! - **`store`**: Storage boundary and in-memory implementation
//! - **`config`**: Engine configuration
//!
//! # Entry Point
//!
//! [`generate`] validates a request, loads one snapshot, schedules in
//! memory, and replaces the scope's rows in a single storage call.
//!
//! # References
//!
//! - Carter & Laporte (1996), "Recent Developments in Practical Examination Timetabling"
//! - Qu et al. (2009), "A Survey of Search Methodologies and Automated System
//!   Development for Examination Timetabling"

pub mod config;
pub mod conflict;
pub mod demand;
pub mod error;
mod generate;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Result, TimetableError};
pub use generate::generate;
