//! Fleet-level compliance metrics over reconciled instances.

use chrono::Duration;

use crate::model::{ComplianceSnapshot, InstanceStatus};
use crate::schedule::ReconciledInstance;

/// Aggregate one pass over the reconciled instance set.
///
/// "On time" tolerates a one-day lag past the scheduled date so an
/// end-of-day completion still counts. With no scheduled baseline at all the
/// rate defaults to 100: absence of data must never read as failure.
pub fn aggregate(instances: &[ReconciledInstance]) -> ComplianceSnapshot {
    let mut snapshot = ComplianceSnapshot {
        total: instances.len(),
        compliance_rate: 100,
        ..Default::default()
    };

    let mut total_scheduled = 0usize;
    let mut completed_on_time = 0usize;

    for item in instances {
        match item.instance.status {
            InstanceStatus::Pending => {
                snapshot.pending += 1;
                if item.is_overdue {
                    snapshot.overdue += 1;
                }
            }
            InstanceStatus::InProgress => {
                snapshot.pending += 1;
                snapshot.in_progress += 1;
            }
            InstanceStatus::Completed => snapshot.completed += 1,
            InstanceStatus::Cancelled => {}
        }

        if let Some(scheduled) = item.instance.scheduled_date {
            total_scheduled += 1;
            if item.instance.status == InstanceStatus::Completed {
                if let Some(completed_at) = item.instance.completed_at {
                    if completed_at < scheduled + Duration::days(1) {
                        completed_on_time += 1;
                    }
                }
            }
        }
    }

    if total_scheduled > 0 {
        let rate = completed_on_time as f64 / total_scheduled as f64 * 100.0;
        snapshot.compliance_rate = rate.round() as u32;
    }

    snapshot
}
