//! Domain entities for the preventive maintenance engine.
//!
//! Everything in here is plain data: derived fields (effective due date,
//! overdue flag) live on [`crate::schedule::ReconciledInstance`], never on the
//! stored entities themselves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;

//
// Plans
//

/// The asset a plan targets. A plan is attached to exactly one of a fixed
/// machine or a mobile unit, never both.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetRef {
    Machine(String),
    MobileUnit(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// One line of a plan's fixed tool checklist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequiredTool {
    pub name: String,
    pub quantity: Option<f64>,
}

/// Estimated effort attached to a plan (e.g. `2.5` hours, `300` kilometers).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub unit: String,
}

/// A recurring maintenance definition. Plans are never deleted upstream, only
/// deactivated, so `active` gates everything the scheduling layer does.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MaintenancePlan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub asset: AssetRef,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub subcomponent_id: Option<String>,
    pub frequency_days: i64,
    #[serde(default)]
    pub estimated_duration: Option<Estimate>,
    #[serde(default)]
    pub estimated_quantity: Option<Estimate>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub required_tools: Vec<RequiredTool>,
    #[serde(default)]
    pub priority: Priority,
    pub active: bool,
}

impl MaintenancePlan {
    /// Configuration check applied at plan-edit time. A non-positive frequency
    /// must never reach the reconciler.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.frequency_days <= 0 {
            return Err(ScheduleError::InvalidFrequency {
                plan_id: self.id.clone(),
                frequency_days: self.frequency_days,
            });
        }
        Ok(())
    }
}

//
// Instances
//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl InstanceStatus {
    /// Open instances are the ones an execution can still be submitted for.
    pub fn is_open(self) -> bool {
        matches!(self, InstanceStatus::Pending | InstanceStatus::InProgress)
    }
}

/// One scheduled occurrence of a plan, as reported by the upstream scheduling
/// source. The source is eventually consistent: a pending row can survive a
/// completion that already covers its cycle, which is what the reconciler
/// corrects for.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MaintenanceInstance {
    pub id: String,
    pub plan_id: String,
    pub plan_title: String,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    pub status: InstanceStatus,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,
}

//
// Resources
//

/// Flat classification of a tool/consumable line.
///
/// Upstream sometimes reports this as a bare string and sometimes as a nested
/// object; [`ItemClass::from_raw`] is the single normalization point, so only
/// the flat enum ever enters the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemClass {
    Tool,
    HandTool,
    SparePart,
    Consumable,
    Material,
    Unknown,
}

impl ItemClass {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "TOOL" => ItemClass::Tool,
            "HAND_TOOL" => ItemClass::HandTool,
            "SPARE_PART" => ItemClass::SparePart,
            "CONSUMABLE" => ItemClass::Consumable,
            "MATERIAL" => ItemClass::Material,
            _ => ItemClass::Unknown,
        }
    }

    /// Consumables get quantity-return semantics; everything else (including
    /// `Unknown`) is treated as a tool and gets the damage flag instead. The
    /// partition drives which badge a line renders with, so it must not drift.
    pub fn is_consumable(self) -> bool {
        matches!(
            self,
            ItemClass::SparePart | ItemClass::Consumable | ItemClass::Material
        )
    }

    pub fn is_tool(self) -> bool {
        !self.is_consumable()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Picked,
    Consumed,
    Returned,
    Cancelled,
}

impl ReservationStatus {
    /// Only reservations still in flight seed an execution.
    pub fn is_open(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Picked)
    }
}

//
// Execution records
//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    #[default]
    Completed,
    PartiallyCompleted,
    RequiresFollowup,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationUnit {
    #[default]
    Hours,
    Minutes,
}

/// Captured duration, normalized to hours but keeping the operator's original
/// input alongside for audit/display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DurationCapture {
    pub hours: f64,
    pub raw_value: f64,
    pub raw_unit: DurationUnit,
}

/// Captured quantity (cycles, kilometers, ...). Absent entirely when the
/// operator excluded quantity tracking for this run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuantityCapture {
    pub value: f64,
    pub unit: Option<String>,
}

/// Audit snapshot of one resource line inside an execution record. Picked
/// quantity is intentionally absent: it stays derivable from the reservation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    pub reservation_id: Option<String>,
    pub tool_id: Option<String>,
    pub tool_name: String,
    pub class: ItemClass,
    pub used_quantity: f64,
    pub returned_damaged: bool,
    pub is_ad_hoc: bool,
}

/// The immutable outcome of running one instance. Created exactly once per
/// execution attempt and appended to the instance's history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExecutionRecord {
    pub id: String,
    pub instance_id: String,
    pub plan_id: String,
    pub executed_at: DateTime<Utc>,
    pub duration: DurationCapture,
    pub quantity: Option<QuantityCapture>,
    pub completion_status: CompletionStatus,
    pub operators: Vec<String>,
    pub notes: Option<String>,
    pub issues: Option<String>,
    pub re_execution_reason: Option<String>,
    pub resources: Vec<ResourceUsage>,
    pub asset: AssetRef,
    pub component_id: Option<String>,
    pub subcomponent_id: Option<String>,
}

//
// Fleet metrics
//

/// Derived fleet metrics. Recomputed on demand, holds no lifecycle of its own.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplianceSnapshot {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Percentage of scheduled instances completed within one day of their
    /// scheduled date. Defaults to 100 when nothing was scheduled: absence of
    /// data must never read as failure.
    pub compliance_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_validate_rejects_non_positive_frequency() {
        let mut plan = MaintenancePlan {
            id: "p1".to_string(),
            title: "Grease spindle".to_string(),
            description: None,
            asset: AssetRef::Machine("m1".to_string()),
            component_id: None,
            subcomponent_id: None,
            frequency_days: 0,
            estimated_duration: None,
            estimated_quantity: None,
            assigned_to: None,
            required_tools: vec![],
            priority: Priority::Medium,
            active: true,
        };
        assert!(plan.validate().is_err());
        plan.frequency_days = -7;
        assert!(plan.validate().is_err());
        plan.frequency_days = 30;
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_item_class_normalization() {
        assert_eq!(ItemClass::from_raw("SPARE_PART"), ItemClass::SparePart);
        assert_eq!(ItemClass::from_raw(" consumable "), ItemClass::Consumable);
        assert_eq!(ItemClass::from_raw("hand_tool"), ItemClass::HandTool);
        assert_eq!(ItemClass::from_raw("widget"), ItemClass::Unknown);
        assert_eq!(ItemClass::from_raw(""), ItemClass::Unknown);
    }

    #[test]
    fn test_item_class_partition() {
        assert!(ItemClass::SparePart.is_consumable());
        assert!(ItemClass::Material.is_consumable());
        assert!(ItemClass::Tool.is_tool());
        assert!(ItemClass::HandTool.is_tool());
        // Unclassified lines fall on the tool side of the split.
        assert!(ItemClass::Unknown.is_tool());
    }

    #[test]
    fn test_status_serialization_matches_upstream() {
        let json = serde_json::to_string(&InstanceStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: InstanceStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(back, InstanceStatus::Pending);
    }
}
