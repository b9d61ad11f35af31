//! Execution-side error types.
//!
//! `ValidationErrors` is deliberately a map rather than a list: the execution
//! form renders inline per-field messages, so every rule failure is keyed by
//! the field it belongs to and all failures are collected in one pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Field-scoped validation failures, in form order.
///
/// The first message recorded for a field wins; later rules for the same
/// field do not overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: IndexMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Fold another set of failures in, keeping existing messages.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, message) in other.fields {
            self.fields.entry(field).or_insert(message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no failure was recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed")?;
        for (field, message) in &self.fields {
            write!(f, "; {}: {}", field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while mutating a resource ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The tool is already on the execution's list.
    #[error("Tool '{0}' is already part of this execution")]
    DuplicateTool(String),

    /// Preventive checklists are fixed; ad-hoc additions are corrective-only.
    #[error("Ad-hoc resources cannot be added to a preventive execution")]
    AdHocNotAllowed,
}

/// A collaborator (reservations, checklist, search, directory) is unreachable.
/// The engine degrades rather than failing the whole execution on these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{collaborator} is unavailable: {reason}")]
pub struct UpstreamError {
    pub collaborator: &'static str,
    pub reason: String,
}

impl UpstreamError {
    pub fn new(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self {
            collaborator,
            reason: reason.into(),
        }
    }
}

/// Failures from the persistence sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A second completion raced the same instance. Never silently merged.
    #[error("An execution record already exists for this instance")]
    Conflict,

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Everything that can stop an execution submission.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Surfaced to the caller as "already completed, refresh and retry".
    #[error("This instance was already completed, refresh and retry")]
    AlreadyCompleted,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Storage backend failure: {0}")]
    Store(String),
}

impl ExecutionError {
    /// Recoverable by the operator re-prompting or retrying, as opposed to a
    /// system fault worth logging.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExecutionError::Validation(_)
                | ExecutionError::Ledger(_)
                | ExecutionError::AlreadyCompleted
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ExecutionError::Validation(_) | ExecutionError::Ledger(_) => "VALIDATION_FAILED",
            ExecutionError::AlreadyCompleted => "CONFLICT",
            ExecutionError::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            ExecutionError::Store(_) => "STORE_FAILED",
        }
    }
}

impl From<StoreError> for ExecutionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => ExecutionError::AlreadyCompleted,
            StoreError::Backend(reason) => ExecutionError::Store(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_first_message() {
        let mut errors = ValidationErrors::new();
        errors.add("actual_duration", "required");
        errors.add("actual_duration", "must be greater than zero");
        assert_eq!(errors.get("actual_duration"), Some("required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validation_errors_preserve_field_order() {
        let mut errors = ValidationErrors::new();
        errors.add("actual_duration", "required");
        errors.add("operators", "required");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["actual_duration", "operators"]);
    }

    #[test]
    fn test_into_result() {
        let empty = ValidationErrors::new();
        assert_eq!(empty.into_result(5).unwrap(), 5);

        let mut errors = ValidationErrors::new();
        errors.add("operators", "required");
        assert!(errors.into_result(5).is_err());
    }

    #[test]
    fn test_conflict_maps_to_already_completed() {
        let err: ExecutionError = StoreError::Conflict.into();
        assert!(matches!(err, ExecutionError::AlreadyCompleted));
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_upstream_error_display() {
        let err = UpstreamError::new("reservation source", "connection refused");
        assert_eq!(
            err.to_string(),
            "reservation source is unavailable: connection refused"
        );
        let err: ExecutionError = err.into();
        assert!(!err.is_recoverable());
        assert_eq!(err.error_code(), "UPSTREAM_UNAVAILABLE");
    }
}
