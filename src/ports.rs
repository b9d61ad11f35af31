//! Boundary contracts for the collaborators this engine consumes.
//!
//! All of these are in-process interfaces, not network protocols; the engine
//! owns no wire format. Persistence is also where the at-most-one-in-flight
//! submission rule lives: [`ExecutionStore::create_execution_record`] must
//! reject a second concurrent completion of the same instance with
//! [`StoreError::Conflict`](crate::errors::StoreError::Conflict).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, UpstreamError};
use crate::model::{ExecutionRecord, RequiredTool, ReservationStatus};

/// A stock reservation attached to an instance, as the reservation system
/// reports it. `item_type` arrives as a raw string and is normalized through
/// [`ItemClass::from_raw`](crate::model::ItemClass::from_raw) before it enters
/// the ledger.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub tool_id: String,
    pub tool_name: String,
    pub item_type: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub quantity: f64,
    pub status: ReservationStatus,
}

/// A search hit offered as an ad-hoc addition candidate.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdHocCandidate {
    pub id: String,
    pub name: String,
    pub item_type: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub stock_quantity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Operator {
    pub id: String,
    pub name: String,
}

#[async_trait]
pub trait ReservationSource: Send + Sync {
    async fn list(&self, instance_id: &str) -> Result<Vec<Reservation>, UpstreamError>;
}

#[async_trait]
pub trait ChecklistSource: Send + Sync {
    async fn required_tools(&self, plan_id: &str) -> Result<Vec<RequiredTool>, UpstreamError>;
}

#[async_trait]
pub trait AdHocSearchSource: Send + Sync {
    async fn search(
        &self,
        query: &str,
        company_id: &str,
    ) -> Result<Vec<AdHocCandidate>, UpstreamError>;
}

#[async_trait]
pub trait OperatorDirectory: Send + Sync {
    async fn list_active(&self, company_id: &str) -> Result<Vec<Operator>, UpstreamError>;
}

#[async_trait]
pub trait ExecutionStore: Send + Sync {
    /// Persist a record, returning its storage id. Two submissions racing for
    /// the same instance must not both succeed.
    async fn create_execution_record(&self, record: &ExecutionRecord)
        -> Result<String, StoreError>;
}

/// Fired after a successful submission so dependent views (plan list,
/// calendar, history) refresh. Fire-and-forget from the engine's perspective.
#[async_trait]
pub trait InvalidationSignal: Send + Sync {
    async fn invalidate(&self, plan_id: &str);
}
