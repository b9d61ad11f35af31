//! Scheduling and plan-configuration error types.

use thiserror::Error;

/// Errors raised while deriving due dates for a fleet of plans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A plan with a non-positive frequency. Surfaced at plan-edit time and
    /// again defensively by the fleet pipeline, which skips the plan instead
    /// of crashing reconciliation.
    #[error("Plan '{plan_id}' has a non-positive frequency of {frequency_days} days")]
    InvalidFrequency { plan_id: String, frequency_days: i64 },

    /// An instance references a plan the caller did not supply.
    #[error("Plan '{0}' not found")]
    PlanNotFound(String),
}

impl ScheduleError {
    /// Configuration errors are caller-fixable; they must block instance
    /// generation rather than crash the reconciler.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScheduleError::InvalidFrequency { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::InvalidFrequency { .. } => "INVALID_CONFIGURATION",
            ScheduleError::PlanNotFound(_) => "NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_frequency_display() {
        let err = ScheduleError::InvalidFrequency {
            plan_id: "p7".to_string(),
            frequency_days: -3,
        };
        assert_eq!(
            err.to_string(),
            "Plan 'p7' has a non-positive frequency of -3 days"
        );
        assert!(err.is_configuration());
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_plan_not_found() {
        let err = ScheduleError::PlanNotFound("p9".to_string());
        assert!(!err.is_configuration());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
