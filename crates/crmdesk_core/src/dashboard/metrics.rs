//! Pure dashboard reductions.

use crate::model::contact::Contact;
use crate::model::deal::{Deal, DealStage};
use crate::model::lead::Lead;
use crate::model::task::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_pipeline_value: f64,
    pub closed_value: f64,
    /// Closed deals over all deals, in percent.
    pub conversion_rate: f64,
    pub total_contacts: usize,
    pub total_deals: usize,
    pub total_leads: usize,
    pub pending_tasks: usize,
    /// Pending tasks due before `now`.
    pub overdue_tasks_count: usize,
}

/// Reduces store snapshots into dashboard metrics as of `now`.
pub fn compute_metrics(
    contacts: &[Contact],
    leads: &[Lead],
    deals: &[Deal],
    tasks: &[Task],
    now: DateTime<Utc>,
) -> DashboardMetrics {
    let total_pipeline_value = deals.iter().map(|deal| deal.value).sum();
    let (closed_count, closed_value) = deals
        .iter()
        .filter(|deal| deal.stage == DealStage::Closed)
        .fold((0usize, 0.0f64), |(count, value), deal| {
            (count + 1, value + deal.value)
        });
    let conversion_rate = if deals.is_empty() {
        0.0
    } else {
        closed_count as f64 / deals.len() as f64 * 100.0
    };

    DashboardMetrics {
        total_pipeline_value,
        closed_value,
        conversion_rate,
        total_contacts: contacts.len(),
        total_deals: deals.len(),
        total_leads: leads.len(),
        pending_tasks: tasks.iter().filter(|task| task.is_pending()).count(),
        overdue_tasks_count: tasks.iter().filter(|task| task.is_overdue(now)).count(),
    }
}

/// Renders a percentage with one decimal, e.g. `33.3%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
