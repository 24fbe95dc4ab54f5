//! Greedy exam scheduler, invigilator assignment, reporting, and KPIs.
//!
//! # Algorithm
//!
//! `GreedyScheduler` is a single-pass, largest-demand-first heuristic:
//! each course takes the earliest date, tightest feasible window, and
//! lowest-ID room that is free and can be fully staffed. It never
//! backtracks, so results are not optimal, but they are deterministic.
//!
//! # Commit
//!
//! `InvigilatorAssigner` only proposes staff. The scheduler reserves the
//! room and all K staff together, or nothing.
//!
//! # KPI
//!
//! `TimetableKpi` computes placement rate, seat fill, room-slot
//! utilization, and invigilation duty spread.

mod greedy;
mod invigilator;
mod kpi;
mod report;

pub use greedy::{GenerateRequest, GreedyScheduler};
pub use invigilator::InvigilatorAssigner;
pub use kpi::TimetableKpi;
pub use report::{Report, ResultAggregator, ScheduledExam, UnscheduledCourse, UnscheduledReason};
