//! Orchestrates one execution attempt across the collaborator boundary:
//! seed the ledger, validate, persist, signal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{ExecutionError, ValidationErrors};
use crate::execution::{
    submit, ExecutionContext, ExecutionFormInput, ExecutionKind, ResourceLedger,
};
use crate::model::{ExecutionRecord, InstanceStatus, MaintenanceInstance, MaintenancePlan};
use crate::ports::{
    AdHocCandidate, AdHocSearchSource, ChecklistSource, ExecutionStore, InvalidationSignal,
    OperatorDirectory, ReservationSource,
};

/// What the caller gets back after a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Storage id assigned by the persistence sink.
    pub record_id: String,
    pub record: ExecutionRecord,
    pub new_status: InstanceStatus,
}

pub struct ExecutionService {
    reservations: Arc<dyn ReservationSource>,
    checklist: Arc<dyn ChecklistSource>,
    search: Arc<dyn AdHocSearchSource>,
    operators: Arc<dyn OperatorDirectory>,
    store: Arc<dyn ExecutionStore>,
    invalidation: Arc<dyn InvalidationSignal>,
}

impl ExecutionService {
    pub fn new(
        reservations: Arc<dyn ReservationSource>,
        checklist: Arc<dyn ChecklistSource>,
        search: Arc<dyn AdHocSearchSource>,
        operators: Arc<dyn OperatorDirectory>,
        store: Arc<dyn ExecutionStore>,
        invalidation: Arc<dyn InvalidationSignal>,
    ) -> Self {
        Self {
            reservations,
            checklist,
            search,
            operators,
            store,
            invalidation,
        }
    }

    /// Seed the resource ledger for an execution that is about to start.
    ///
    /// Corrective executions pull open reservations; preventive ones pull the
    /// plan's checklist. Collaborator outages degrade to whatever is known
    /// locally (resources are informative, not mandatory for completion).
    pub async fn begin(
        &self,
        instance: &MaintenanceInstance,
        plan: &MaintenancePlan,
        kind: ExecutionKind,
    ) -> ResourceLedger {
        match kind {
            ExecutionKind::Corrective => match self.reservations.list(&instance.id).await {
                Ok(reservations) => ResourceLedger::from_reservations(reservations),
                Err(err) => {
                    warn!(instance_id = %instance.id, %err, "reservation source down, starting with an empty ledger");
                    ResourceLedger::new(ExecutionKind::Corrective)
                }
            },
            ExecutionKind::Preventive => match self.checklist.required_tools(&plan.id).await {
                Ok(tools) => ResourceLedger::from_checklist(tools),
                Err(err) => {
                    // The plan carries an embedded copy of its checklist;
                    // stale is better than empty here.
                    warn!(plan_id = %plan.id, %err, "checklist source down, using the plan's embedded checklist");
                    ResourceLedger::from_checklist(plan.required_tools.clone())
                }
            },
        }
    }

    /// Candidates for an ad-hoc addition, minus tools already on the ledger.
    /// A search outage yields an empty candidate list, not a failed execution.
    pub async fn ad_hoc_candidates(
        &self,
        query: &str,
        company_id: &str,
        ledger: &ResourceLedger,
    ) -> Vec<AdHocCandidate> {
        match self.search.search(query, company_id).await {
            Ok(candidates) => candidates
                .into_iter()
                .filter(|candidate| !ledger.contains_tool(&candidate.id))
                .collect(),
            Err(err) => {
                warn!(%err, "ad-hoc search unavailable");
                Vec::new()
            }
        }
    }

    /// Validate and persist one execution attempt.
    ///
    /// Field-scoped failures come back as
    /// [`ExecutionError::Validation`]; a store conflict (someone else
    /// completed this instance first) comes back as
    /// [`ExecutionError::AlreadyCompleted`].
    pub async fn submit(
        &self,
        ctx: &ExecutionContext<'_>,
        form: &ExecutionFormInput,
        ledger: &ResourceLedger,
        company_id: &str,
    ) -> Result<SubmitReceipt, ExecutionError> {
        if !ctx.instance.status.is_open() {
            return Err(ExecutionError::AlreadyCompleted);
        }

        let mut directory_errors = ValidationErrors::new();
        match self.operators.list_active(company_id).await {
            Ok(active) => {
                let unknown = form.operators.iter().any(|id| {
                    let id = id.trim();
                    !id.is_empty() && !active.iter().any(|op| op.id == id)
                });
                if unknown {
                    directory_errors.add("operators", "contains an unknown or inactive employee");
                }
            }
            Err(err) => {
                // Directory outage must not block a completion; the ids are
                // persisted as given and reconciled later.
                warn!(%err, "operator directory unavailable, skipping roster check");
            }
        }

        let outcome = match submit(ctx, form, ledger) {
            Ok(outcome) if directory_errors.is_empty() => outcome,
            Ok(_) => return Err(directory_errors.into()),
            Err(mut errors) => {
                errors.merge(directory_errors);
                return Err(errors.into());
            }
        };

        let record_id = self.store.create_execution_record(&outcome.record).await?;
        info!(
            record_id = %record_id,
            instance_id = %ctx.instance.id,
            plan_id = %ctx.plan.id,
            status = ?outcome.record.completion_status,
            "execution recorded"
        );

        // Fire-and-forget: dependent views refresh on their own schedule.
        self.invalidation.invalidate(&ctx.plan.id).await;

        Ok(SubmitReceipt {
            record_id,
            record: outcome.record,
            new_status: outcome.new_status,
        })
    }
}

/// Convenience used by callers that resolve the re-execution guard from the
/// instance's history: a completion on `today` makes this a re-execution.
pub fn was_completed_today(
    history: &[ExecutionRecord],
    plan_id: &str,
    today: chrono::NaiveDate,
) -> bool {
    history
        .iter()
        .any(|record| record.plan_id == plan_id && record.executed_at.date_naive() == today)
}
