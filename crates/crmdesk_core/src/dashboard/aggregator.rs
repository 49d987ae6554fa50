//! Async snapshot loader feeding `compute_metrics`.

use crate::dashboard::metrics::{compute_metrics, DashboardMetrics};
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::lead::Lead;
use crate::model::task::Task;
use crate::repo::EntityStore;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

/// Reads the four stores the dashboard depends on.
#[derive(Clone)]
pub struct DashboardAggregator {
    contacts: Arc<EntityStore<Contact>>,
    leads: Arc<EntityStore<Lead>>,
    deals: Arc<EntityStore<Deal>>,
    tasks: Arc<EntityStore<Task>>,
}

impl DashboardAggregator {
    pub fn new(
        contacts: Arc<EntityStore<Contact>>,
        leads: Arc<EntityStore<Lead>>,
        deals: Arc<EntityStore<Deal>>,
        tasks: Arc<EntityStore<Task>>,
    ) -> Self {
        Self {
            contacts,
            leads,
            deals,
            tasks,
        }
    }

    /// Loads all four snapshots concurrently and reduces them as of `now`.
    ///
    /// Each snapshot is consistent on its own; the four are not taken
    /// atomically with respect to each other.
    pub async fn snapshot(&self, now: DateTime<Utc>) -> DashboardMetrics {
        let (contacts, leads, deals, tasks) = tokio::join!(
            self.contacts.get_all(),
            self.leads.get_all(),
            self.deals.get_all(),
            self.tasks.get_all(),
        );
        let metrics = compute_metrics(&contacts, &leads, &deals, &tasks, now);
        debug!(
            "event=dashboard_snapshot module=dashboard status=ok deals={} tasks={}",
            metrics.total_deals,
            tasks.len()
        );
        metrics
    }
}
