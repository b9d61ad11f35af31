//! Fleet pipeline: raw plans + raw instances in, canonical views and
//! compliance metrics out.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::model::{ComplianceSnapshot, MaintenanceInstance, MaintenancePlan};
use crate::schedule::{aggregate, dedupe, reconcile, ReconciledInstance};

/// The reconciled instance set plus the metrics computed over it.
#[derive(Debug, Clone)]
pub struct FleetOverview {
    pub instances: Vec<ReconciledInstance>,
    pub snapshot: ComplianceSnapshot,
}

/// Stateless orchestration over the schedule layer.
pub struct FleetService;

impl FleetService {
    /// Reconcile every instance against its plan, optionally collapse
    /// duplicate titles, and aggregate compliance metrics.
    ///
    /// Instances of inactive plans are dropped. A missing plan or a plan with
    /// a broken frequency downgrades its instances to the nominal scheduled
    /// date (no staleness correction) instead of failing the whole pass.
    pub fn overview(
        plans: &[MaintenancePlan],
        instances: &[MaintenanceInstance],
        today: NaiveDate,
        collapse_duplicates: bool,
    ) -> FleetOverview {
        let plans_by_id: HashMap<&str, &MaintenancePlan> =
            plans.iter().map(|plan| (plan.id.as_str(), plan)).collect();

        let mut reconciled = Vec::with_capacity(instances.len());
        for instance in instances {
            let plan = plans_by_id.get(instance.plan_id.as_str()).copied();
            if let Some(plan) = plan {
                if !plan.active {
                    debug!(plan_id = %plan.id, "skipping instance of inactive plan");
                    continue;
                }
            }
            let frequency = match plan {
                Some(plan) => match plan.validate() {
                    Ok(()) => Some(plan.frequency_days),
                    Err(err) => {
                        warn!(plan_id = %plan.id, %err, "plan misconfigured, staleness check skipped");
                        None
                    }
                },
                None => {
                    warn!(
                        instance_id = %instance.id,
                        plan_id = %instance.plan_id,
                        "instance references an unknown plan"
                    );
                    None
                }
            };
            reconciled.push(reconcile(instance.clone(), frequency, today));
        }

        let instances = if collapse_duplicates {
            dedupe(reconciled)
        } else {
            reconciled
        };
        let snapshot = aggregate(&instances);
        FleetOverview {
            instances,
            snapshot,
        }
    }

    /// Pending instances whose effective due date has passed, soonest-overdue
    /// first.
    pub fn overdue(
        plans: &[MaintenancePlan],
        instances: &[MaintenanceInstance],
        today: NaiveDate,
    ) -> Vec<ReconciledInstance> {
        let mut overdue: Vec<ReconciledInstance> =
            Self::overview(plans, instances, today, false)
                .instances
                .into_iter()
                .filter(|item| item.is_overdue)
                .collect();
        overdue.sort_by_key(|item| item.effective_due_date);
        overdue
    }
}
