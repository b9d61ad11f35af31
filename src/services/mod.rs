pub mod execution_service;
pub mod fleet_service;

pub use execution_service::{was_completed_today, ExecutionService, SubmitReceipt};
pub use fleet_service::{FleetOverview, FleetService};
