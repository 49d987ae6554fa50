//! Activity recorder.
//!
//! # Responsibility
//! - Append timeline entries stamped with id and time.
//! - Serve newest-first views for the dashboard and per-contact timelines.
//!
//! # Invariants
//! - The log is append-only; entries are never updated or removed.
//! - Views order by timestamp descending, then id descending, so ties have
//!   a deterministic order.

use crate::model::activity::{Activity, NewActivity};
use crate::model::{ContactId, RecordId};
use crate::repo::EntityStore;
use crate::service::ServiceResult;
use log::debug;
use std::sync::Arc;

/// Entries returned by `recent` when the caller has no preference.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<EntityStore<Activity>>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<EntityStore<Activity>>) -> Self {
        Self { store }
    }

    /// Stamps and prepends one entry.
    pub async fn record(&self, entry: NewActivity) -> ServiceResult<Activity> {
        entry.validate()?;
        let activity = self.store.create(entry).await;
        debug!(
            "event=activity_record module=service status=ok contact_id={} kind={:?}",
            activity.contact_id, activity.kind
        );
        Ok(activity)
    }

    /// Log in stored order, newest recorded first.
    pub async fn list(&self) -> Vec<Activity> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: RecordId) -> Option<Activity> {
        self.store.get_by_id(id).await
    }

    /// Top `limit` entries by timestamp, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<Activity> {
        let mut entries = self.store.get_all().await;
        entries.sort_by(Activity::newest_first);
        entries.truncate(limit);
        entries
    }

    /// Timeline for one contact, newest first.
    pub async fn for_contact(&self, contact_id: ContactId) -> Vec<Activity> {
        let mut entries = self.store.get_by_contact_id(contact_id).await;
        entries.sort_by(Activity::newest_first);
        entries
    }
}
