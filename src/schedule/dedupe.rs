//! Collapsing duplicate instances reported for the same logical plan.
//!
//! The upstream data source can report overlapping entries for one plan. This
//! is a pure, order-preserving reduction keyed by normalized title, exposed as
//! an opt-in toggle so callers can always get the raw list back.

use std::collections::HashSet;

use crate::schedule::ReconciledInstance;

/// Keep the first occurrence per case-insensitive trimmed plan title.
pub fn dedupe(instances: Vec<ReconciledInstance>) -> Vec<ReconciledInstance> {
    let mut seen: HashSet<String> = HashSet::new();
    instances
        .into_iter()
        .filter(|item| seen.insert(normalized_title(&item.instance.plan_title)))
        .collect()
}

fn normalized_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InstanceStatus, MaintenanceInstance};
    use crate::schedule::reconcile;
    use chrono::NaiveDate;

    fn reconciled(id: &str, title: &str) -> ReconciledInstance {
        reconcile(
            MaintenanceInstance {
                id: id.to_string(),
                plan_id: format!("plan-{id}"),
                plan_title: title.to_string(),
                scheduled_date: None,
                status: InstanceStatus::Pending,
                last_completed: None,
                completed_at: None,
            },
            None,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_first_occurrence_wins_order_preserved() {
        let out = dedupe(vec![
            reconciled("a", "Grease spindle"),
            reconciled("b", "Check belts"),
            reconciled("c", "  grease SPINDLE "),
            reconciled("d", "Replace filter"),
        ]);
        let ids: Vec<&str> = out.iter().map(|r| r.instance.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_distinct_titles_untouched() {
        let out = dedupe(vec![
            reconciled("a", "Grease spindle"),
            reconciled("b", "Check belts"),
        ]);
        assert_eq!(out.len(), 2);
    }
}
