//! Stale-instance detection and effective due date derivation.
//!
//! The scheduling source that generates instances is eventually consistent: a
//! pending row can linger after a later completion already satisfied its
//! cycle. This module is the single place that corrects for that, so the UI
//! and the compliance metrics both see the same coherent due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{InstanceStatus, MaintenanceInstance};
use crate::schedule::recurrence::next_due_date;

/// An instance plus the derived view the rest of the system consumes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReconciledInstance {
    pub instance: MaintenanceInstance,
    /// Corrected due date; `None` only when the source never scheduled the
    /// instance at all.
    pub effective_due_date: Option<NaiveDate>,
    pub is_overdue: bool,
    /// True when a completion already covers the cycle this pending row was
    /// generated for.
    pub is_stale: bool,
}

/// Derive the canonical view of one instance.
///
/// `frequency_days` is `None` when the owning plan is missing or failed
/// validation; staleness detection is then impossible and the nominal
/// scheduled date stands.
///
/// An instance is stale when it is still pending, a completion is on record,
/// and the gap between the nominal scheduled date and that completion is at
/// most `frequency_days`. The boundary is inclusive: a completion exactly one
/// frequency before the scheduled date still covers the cycle.
pub fn reconcile(
    instance: MaintenanceInstance,
    frequency_days: Option<i64>,
    today: NaiveDate,
) -> ReconciledInstance {
    let correction = match (
        instance.status,
        frequency_days,
        instance.scheduled_date,
        instance.last_completed,
    ) {
        (InstanceStatus::Pending, Some(frequency), Some(scheduled), Some(completed))
            if (scheduled - completed).num_days() <= frequency =>
        {
            Some(next_due_date(Some(completed), frequency, scheduled))
        }
        _ => None,
    };

    let is_stale = correction.is_some();
    let effective_due_date = correction.or(instance.scheduled_date);
    let is_overdue = instance.status == InstanceStatus::Pending
        && effective_due_date.is_some_and(|due| due < today);

    ReconciledInstance {
        instance,
        effective_due_date,
        is_overdue,
        is_stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn instance(
        status: InstanceStatus,
        scheduled: Option<NaiveDate>,
        last_completed: Option<NaiveDate>,
    ) -> MaintenanceInstance {
        MaintenanceInstance {
            id: "i1".to_string(),
            plan_id: "p1".to_string(),
            plan_title: "Grease spindle".to_string(),
            scheduled_date: scheduled,
            status,
            last_completed,
            completed_at: None,
        }
    }

    #[test]
    fn test_stale_instance_gets_corrected_due_date() {
        // frequency 30, completed Jan 1, nominally scheduled Jan 15:
        // gap 14 <= 30, so the pending row is already satisfied.
        let out = reconcile(
            instance(
                InstanceStatus::Pending,
                Some(date(2024, 1, 15)),
                Some(date(2024, 1, 1)),
            ),
            Some(30),
            date(2024, 1, 20),
        );
        assert!(out.is_stale);
        assert_eq!(out.effective_due_date, Some(date(2024, 1, 31)));
        assert!(!out.is_overdue);
    }

    #[test]
    fn test_staleness_boundary_is_inclusive() {
        let scheduled = date(2024, 3, 31);
        // gap == frequency: stale
        let out = reconcile(
            instance(
                InstanceStatus::Pending,
                Some(scheduled),
                Some(date(2024, 3, 1)),
            ),
            Some(30),
            date(2024, 3, 31),
        );
        assert!(out.is_stale);

        // gap == frequency + 1: a full cycle has elapsed, the row is genuinely due
        let out = reconcile(
            instance(
                InstanceStatus::Pending,
                Some(scheduled),
                Some(date(2024, 2, 29)),
            ),
            Some(30),
            date(2024, 3, 31),
        );
        assert!(!out.is_stale);
        assert_eq!(out.effective_due_date, Some(scheduled));
    }

    #[test]
    fn test_no_completion_is_never_stale() {
        let out = reconcile(
            instance(InstanceStatus::Pending, Some(date(2024, 1, 15)), None),
            Some(30),
            date(2024, 1, 20),
        );
        assert!(!out.is_stale);
        assert_eq!(out.effective_due_date, Some(date(2024, 1, 15)));
        assert!(out.is_overdue);
    }

    #[test]
    fn test_non_pending_statuses_are_never_stale_or_overdue() {
        for status in [
            InstanceStatus::InProgress,
            InstanceStatus::Completed,
            InstanceStatus::Cancelled,
        ] {
            let out = reconcile(
                instance(status, Some(date(2024, 1, 1)), Some(date(2023, 12, 31))),
                Some(30),
                date(2024, 6, 1),
            );
            assert!(!out.is_stale, "{:?}", status);
            assert!(!out.is_overdue, "{:?}", status);
        }
    }

    #[test]
    fn test_missing_frequency_passes_nominal_date_through() {
        let out = reconcile(
            instance(
                InstanceStatus::Pending,
                Some(date(2024, 1, 15)),
                Some(date(2024, 1, 10)),
            ),
            None,
            date(2024, 1, 20),
        );
        assert!(!out.is_stale);
        assert_eq!(out.effective_due_date, Some(date(2024, 1, 15)));
        assert!(out.is_overdue);
    }

    #[test]
    fn test_unscheduled_instance_is_never_overdue() {
        let out = reconcile(
            instance(InstanceStatus::Pending, None, Some(date(2024, 1, 1))),
            Some(30),
            date(2024, 6, 1),
        );
        assert_eq!(out.effective_due_date, None);
        assert!(!out.is_overdue);
        assert!(!out.is_stale);
    }

    #[test]
    fn test_overdue_uses_corrected_date_not_nominal() {
        // Nominal date far in the past, but the completion pushes the
        // effective due date beyond today: not overdue.
        let out = reconcile(
            instance(
                InstanceStatus::Pending,
                Some(date(2024, 1, 5)),
                Some(date(2024, 1, 4)),
            ),
            Some(30),
            date(2024, 1, 20),
        );
        assert!(out.is_stale);
        assert_eq!(out.effective_due_date, Some(date(2024, 2, 3)));
        assert!(!out.is_overdue);
    }
}
