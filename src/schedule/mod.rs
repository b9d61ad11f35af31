//! Scheduling layer: pure derivations over caller-supplied plan and instance
//! data. Nothing here reads the clock or performs I/O; "today" is always an
//! explicit argument.

pub mod compliance;
pub mod dedupe;
pub mod reconcile;
pub mod recurrence;

pub use compliance::aggregate;
pub use dedupe::dedupe;
pub use reconcile::{reconcile, ReconciledInstance};
pub use recurrence::next_due_date;
