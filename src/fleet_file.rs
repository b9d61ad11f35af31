//! YAML fleet snapshot consumed by the CLI: the plans and instances to
//! reconcile, as exported from the upstream store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{MaintenanceInstance, MaintenancePlan};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FleetFile {
    #[serde(default)]
    pub plans: Vec<MaintenancePlan>,
    #[serde(default)]
    pub instances: Vec<MaintenanceInstance>,
}

impl FleetFile {
    pub fn from_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("invalid fleet file")
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read fleet file {}", path.display()))?;
        Self::from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstanceStatus;

    #[test]
    fn test_fleet_file_deserialization() {
        let yaml_str = r#"
plans:
  - id: p1
    title: Grease spindle
    asset:
      machine: m1
    frequency_days: 30
    active: true
instances:
  - id: i1
    plan_id: p1
    plan_title: Grease spindle
    scheduled_date: 2024-01-15
    status: PENDING
    last_completed: 2024-01-01
"#;
        let fleet = FleetFile::from_str(yaml_str).unwrap();
        assert_eq!(fleet.plans.len(), 1);
        assert_eq!(fleet.plans[0].frequency_days, 30);
        assert_eq!(fleet.instances.len(), 1);
        assert_eq!(fleet.instances[0].status, InstanceStatus::Pending);
        assert!(fleet.instances[0].last_completed.is_some());
    }

    #[test]
    fn test_empty_sections_default() {
        let fleet = FleetFile::from_str("plans: []").unwrap();
        assert!(fleet.plans.is_empty());
        assert!(fleet.instances.is_empty());
    }
}
