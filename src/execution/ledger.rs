//! Reserved/picked/used/returned accounting for the resources of one
//! execution attempt.
//!
//! Quantity edits clamp instead of erroring: the quantity stepper in the
//! capture flow must never be able to produce an invalid intermediate state.

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::model::{ItemClass, RequiredTool};
use crate::ports::{AdHocCandidate, Reservation};

/// Upper bound for ad-hoc quantities, which have no reservation to clamp to.
pub const AD_HOC_CEILING: f64 = 9999.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionKind {
    Corrective,
    Preventive,
}

/// One tool/consumable line of the execution being captured. Discarded as a
/// standalone value on submit, when it is flattened into the record snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceConfirmation {
    pub reservation_id: Option<String>,
    /// `None` for pure checklist lines that carry no stock binding.
    pub tool_id: Option<String>,
    pub tool_name: String,
    pub class: ItemClass,
    pub unit: Option<String>,
    pub picked_quantity: f64,
    pub used_quantity: f64,
    pub returned_damaged: bool,
    pub is_ad_hoc: bool,
}

impl ResourceConfirmation {
    /// Quantity going back to stock. Only consumable classes have return
    /// semantics; tool classes expose `returned_damaged` instead.
    pub fn to_return(&self) -> Option<f64> {
        if self.class.is_consumable() {
            Some((self.picked_quantity - self.used_quantity).max(0.0))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceLedger {
    kind: ExecutionKind,
    lines: Vec<ResourceConfirmation>,
}

impl ResourceLedger {
    pub fn new(kind: ExecutionKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    /// Corrective seeding: open reservations become confirmed lines, with the
    /// full reserved quantity assumed used until the operator says otherwise.
    pub fn from_reservations(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let lines = reservations
            .into_iter()
            .filter(|r| r.status.is_open())
            .map(|r| ResourceConfirmation {
                reservation_id: Some(r.id),
                tool_id: Some(r.tool_id),
                tool_name: r.tool_name,
                class: ItemClass::from_raw(&r.item_type),
                unit: r.unit,
                picked_quantity: r.quantity,
                used_quantity: r.quantity,
                returned_damaged: false,
                is_ad_hoc: false,
            })
            .collect();
        Self {
            kind: ExecutionKind::Corrective,
            lines,
        }
    }

    /// Preventive seeding from the plan's fixed checklist. Checklist lines
    /// carry no stock binding, so `tool_id` stays empty.
    pub fn from_checklist(tools: impl IntoIterator<Item = RequiredTool>) -> Self {
        let lines = tools
            .into_iter()
            .map(|tool| {
                let quantity = tool.quantity.unwrap_or(1.0);
                ResourceConfirmation {
                    reservation_id: None,
                    tool_id: None,
                    tool_name: tool.name,
                    class: ItemClass::Unknown,
                    unit: None,
                    picked_quantity: quantity,
                    used_quantity: quantity,
                    returned_damaged: false,
                    is_ad_hoc: false,
                }
            })
            .collect();
        Self {
            kind: ExecutionKind::Preventive,
            lines,
        }
    }

    pub fn kind(&self) -> ExecutionKind {
        self.kind
    }

    pub fn lines(&self) -> &[ResourceConfirmation] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains_tool(&self, tool_id: &str) -> bool {
        self.lines
            .iter()
            .any(|line| line.tool_id.as_deref() == Some(tool_id))
    }

    /// Add a resource that was not part of the original reservation set.
    /// Preventive checklists are fixed, so this is corrective-only.
    pub fn add_ad_hoc(&mut self, candidate: &AdHocCandidate) -> Result<(), LedgerError> {
        if self.kind == ExecutionKind::Preventive {
            return Err(LedgerError::AdHocNotAllowed);
        }
        if self.contains_tool(&candidate.id) {
            return Err(LedgerError::DuplicateTool(candidate.name.clone()));
        }
        self.lines.push(ResourceConfirmation {
            reservation_id: None,
            tool_id: Some(candidate.id.clone()),
            tool_name: candidate.name.clone(),
            class: ItemClass::from_raw(&candidate.item_type),
            unit: candidate.unit.clone(),
            picked_quantity: 1.0,
            used_quantity: 1.0,
            returned_damaged: false,
            is_ad_hoc: true,
        });
        Ok(())
    }

    /// Set the used quantity of one line, clamping into `[0, picked]` for
    /// reserved lines and `[0, AD_HOC_CEILING]` for ad-hoc ones. Out-of-range
    /// values clamp silently; an unknown index is ignored.
    pub fn set_used_quantity(&mut self, index: usize, value: f64) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        if !value.is_finite() {
            return;
        }
        let ceiling = if line.is_ad_hoc {
            AD_HOC_CEILING
        } else {
            line.picked_quantity
        };
        line.used_quantity = value.clamp(0.0, ceiling);
    }

    pub fn increment_used(&mut self, index: usize) {
        if let Some(current) = self.lines.get(index).map(|line| line.used_quantity) {
            self.set_used_quantity(index, current + 1.0);
        }
    }

    pub fn decrement_used(&mut self, index: usize) {
        if let Some(current) = self.lines.get(index).map(|line| line.used_quantity) {
            self.set_used_quantity(index, current - 1.0);
        }
    }

    pub fn set_returned_damaged(&mut self, index: usize, damaged: bool) {
        if let Some(line) = self.lines.get_mut(index) {
            line.returned_damaged = damaged;
        }
    }

    /// Lines with damage-flag return semantics.
    pub fn tools(&self) -> impl Iterator<Item = &ResourceConfirmation> {
        self.lines.iter().filter(|line| line.class.is_tool())
    }

    /// Lines with quantity-return semantics.
    pub fn consumables(&self) -> impl Iterator<Item = &ResourceConfirmation> {
        self.lines.iter().filter(|line| line.class.is_consumable())
    }
}
