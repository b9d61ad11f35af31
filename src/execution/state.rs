//! The submit transition: validate captured input, then produce the immutable
//! execution record and the instance's next status.
//!
//! Either every rule passes and a record comes back, or a field-scoped error
//! map does. There is no partial-commit state to roll back; retrying with the
//! same input yields the same outcome (modulo the freshly minted record id).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::ValidationErrors;
use crate::execution::form::ExecutionFormInput;
use crate::execution::ledger::ResourceLedger;
use crate::model::{
    DurationCapture, DurationUnit, ExecutionRecord, InstanceStatus, MaintenanceInstance,
    MaintenancePlan, QuantityCapture, ResourceUsage,
};

/// Everything the transition needs to know about the world, resolved by the
/// caller before validation starts.
pub struct ExecutionContext<'a> {
    pub plan: &'a MaintenancePlan,
    pub instance: &'a MaintenanceInstance,
    /// A completion for this plan already exists on the current calendar day,
    /// which makes this attempt a re-execution.
    pub was_completed_today: bool,
    pub executed_at: DateTime<Utc>,
}

/// A validated submission: the record to persist plus the status the instance
/// retires into.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub record: ExecutionRecord,
    pub new_status: InstanceStatus,
}

/// Run the completion transition.
///
/// All rules are evaluated before returning so the caller can render every
/// inline message at once rather than replaying the form rule by rule.
pub fn submit(
    ctx: &ExecutionContext<'_>,
    form: &ExecutionFormInput,
    ledger: &ResourceLedger,
) -> Result<ExecutionOutcome, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let duration = match parse_positive(&form.actual_duration) {
        Parsed::Missing => {
            errors.add("actual_duration", "required");
            None
        }
        Parsed::Invalid => {
            errors.add("actual_duration", "must be a number greater than zero");
            None
        }
        Parsed::Value(value) => Some(normalize_duration(value, form.duration_unit)),
    };

    let quantity = if form.exclude_quantity {
        // Exclusion always wins: whatever was typed, the record stores no
        // quantity at all.
        None
    } else {
        match parse_positive(&form.actual_value) {
            Parsed::Missing => {
                errors.add("actual_value", "required");
                None
            }
            Parsed::Invalid => {
                errors.add("actual_value", "must be a number greater than zero");
                None
            }
            Parsed::Value(value) => Some(QuantityCapture {
                value,
                unit: form.actual_unit.clone(),
            }),
        }
    };

    let operators: Vec<String> = form
        .operators
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if operators.is_empty() {
        errors.add("operators", "required");
    }

    let re_execution_reason = if ctx.was_completed_today {
        let reason = form.re_execution_reason.trim();
        if reason.is_empty() {
            errors.add("re_execution_reason", "required");
            None
        } else {
            Some(reason.to_string())
        }
    } else {
        // Not a re-execution: the field is forced empty regardless of input.
        None
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    let duration = match duration {
        Some(duration) => duration,
        None => return Err(errors),
    };

    let resources = ledger
        .lines()
        .iter()
        .map(|line| ResourceUsage {
            reservation_id: line.reservation_id.clone(),
            tool_id: line.tool_id.clone(),
            tool_name: line.tool_name.clone(),
            class: line.class,
            used_quantity: line.used_quantity,
            returned_damaged: line.returned_damaged,
            is_ad_hoc: line.is_ad_hoc,
        })
        .collect();

    let record = ExecutionRecord {
        id: Uuid::new_v4().to_string(),
        instance_id: ctx.instance.id.clone(),
        plan_id: ctx.plan.id.clone(),
        executed_at: ctx.executed_at,
        duration,
        quantity,
        completion_status: form.completion_status,
        operators,
        notes: none_if_blank(&form.notes),
        issues: none_if_blank(&form.issues),
        re_execution_reason,
        resources,
        asset: ctx.plan.asset.clone(),
        component_id: ctx.plan.component_id.clone(),
        subcomponent_id: ctx.plan.subcomponent_id.clone(),
    };

    // Partial completion and follow-up still retire the instance; the next
    // cycle gets a fresh instance from the scheduling source.
    Ok(ExecutionOutcome {
        record,
        new_status: InstanceStatus::Completed,
    })
}

enum Parsed {
    Missing,
    Invalid,
    Value(f64),
}

fn parse_positive(raw: &str) -> Parsed {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Parsed::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Parsed::Value(value),
        _ => Parsed::Invalid,
    }
}

fn normalize_duration(value: f64, unit: DurationUnit) -> DurationCapture {
    let hours = match unit {
        DurationUnit::Hours => value,
        DurationUnit::Minutes => value / 60.0,
    };
    DurationCapture {
        hours,
        raw_value: value,
        raw_unit: unit,
    }
}

fn none_if_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
