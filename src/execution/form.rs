//! The operator's captured input, as an immutable value object.
//!
//! Numeric fields are kept as the raw strings the capture surface produced;
//! parsing and validation happen in one place, [`crate::execution::submit`],
//! so a half-typed value can never leak into a record.

use serde::{Deserialize, Serialize};

use crate::model::{CompletionStatus, DurationUnit};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExecutionFormInput {
    /// Raw duration text, e.g. `"1.5"`.
    pub actual_duration: String,
    #[serde(default)]
    pub duration_unit: DurationUnit,
    /// Raw quantity text; ignored entirely when `exclude_quantity` is set.
    #[serde(default)]
    pub actual_value: String,
    #[serde(default)]
    pub actual_unit: Option<String>,
    #[serde(default)]
    pub exclude_quantity: bool,
    #[serde(default)]
    pub completion_status: CompletionStatus,
    pub operators: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub issues: String,
    /// Mandatory only when a completion already exists for today.
    #[serde(default)]
    pub re_execution_reason: String,
}
