//! Next-due-date derivation for recurring plans.

use chrono::{Duration, NaiveDate};

/// Compute when a plan is next due.
///
/// With no completion on record the originally scheduled date stands.
/// Otherwise the next cycle starts `frequency_days` calendar days after the
/// last completion; no timezone shifting happens beyond date truncation,
/// which the caller already applied by handing over `NaiveDate`s.
///
/// Frequency positivity is enforced at plan-edit time
/// ([`crate::model::MaintenancePlan::validate`]), not here.
pub fn next_due_date(
    last_completed: Option<NaiveDate>,
    frequency_days: i64,
    fallback_scheduled: NaiveDate,
) -> NaiveDate {
    match last_completed {
        Some(completed) => completed + Duration::days(frequency_days),
        None => fallback_scheduled,
    }
}
