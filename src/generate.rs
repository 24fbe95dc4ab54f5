//! Regenerate the timetable of one scope.
//!
//! Validate → load snapshot → schedule in memory → replace the scope's
//! rows in one storage call. Nothing is written unless the whole run
//! succeeds, and a failed write leaves the previous rows in place.
//!
//! Concurrent runs on the same scope are not serialized here; callers
//! must hold a per-scope lock around `generate`.

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::error::{Result, TimetableError};
use crate::scheduler::{GenerateRequest, GreedyScheduler, Report};
use crate::store::TimetableStore;
use crate::validation::{validate_config, validate_request, validate_snapshot};

/// Recomputes and persists the timetable for `request`'s scope.
///
/// Returns a committed report on success. Unschedulable courses do not
/// fail the call; check [`Report::success`].
///
/// # Errors
/// - [`TimetableError::InvalidRequest`]: bad dates, window count, blank
///   scope, or unusable configuration. Nothing is loaded or written.
/// - [`TimetableError::Load`]: the snapshot could not be read.
/// - [`TimetableError::InvalidSnapshot`]: registry data failed integrity
///   checks. Nothing is written.
/// - [`TimetableError::Persistence`]: the write failed; the error carries
///   the uncommitted report.
pub fn generate<S: TimetableStore + ?Sized>(
    store: &mut S,
    request: &GenerateRequest,
    config: &EngineConfig,
) -> Result<Report> {
    let mut problems = Vec::new();
    if let Err(errors) = validate_config(config) {
        problems.extend(errors);
    }
    if let Err(errors) = validate_request(request, &config.catalog) {
        problems.extend(errors);
    }
    if !problems.is_empty() {
        return Err(TimetableError::InvalidRequest(problems));
    }

    let scope = request.scope();
    info!(
        scope = %scope,
        start = %request.start_date,
        end = %request.end_date,
        "regenerating exam timetable"
    );

    let snapshot = store
        .load_snapshot(&scope, request.start_date, request.end_date)
        .map_err(TimetableError::Load)?;
    validate_snapshot(&snapshot).map_err(TimetableError::InvalidSnapshot)?;

    let report = GreedyScheduler::new(config.clone()).schedule(request, &snapshot);

    match store.replace_scope(&scope, &report.timetable) {
        Ok(()) => Ok(report.into_committed()),
        Err(source) => {
            error!(scope = %scope, error = %source, "timetable not persisted");
            Err(TimetableError::Persistence {
                scope,
                source,
                report: Box::new(report),
            })
        }
    }
}
