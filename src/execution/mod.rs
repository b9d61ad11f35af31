//! Execution-time workflow: resource accounting and the submit state machine.

pub mod form;
pub mod ledger;
pub mod state;

pub use form::ExecutionFormInput;
pub use ledger::{ExecutionKind, ResourceConfirmation, ResourceLedger, AD_HOC_CEILING};
pub use state::{submit, ExecutionContext, ExecutionOutcome};
