//! Domain-specific error types for the maintenance engine.
//!
//! Every failure path in this crate is a named kind:
//!
//! - **ValidationErrors**: field-scoped operator input problems, always
//!   recoverable by re-prompting; never a system fault.
//! - **ScheduleError**: plan configuration problems (non-positive frequency)
//!   caught at plan-edit time, before the reconciler ever sees the plan.
//! - **ExecutionError**: everything that can stop a submission, including the
//!   conflict raised when two submissions race for the same instance.
//! - **UpstreamError / StoreError**: collaborator boundaries (see
//!   [`crate::ports`]).

pub mod execution;
pub mod schedule;

pub use execution::{ExecutionError, LedgerError, StoreError, UpstreamError, ValidationErrors};
pub use schedule::ScheduleError;

/// Result type alias for scheduling operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Result type alias for execution operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;
