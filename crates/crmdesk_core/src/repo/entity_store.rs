//! Generic in-memory record store.
//!
//! # Responsibility
//! - Act as the single source of truth for one record type.
//! - Provide CRUD and filter APIs over an ordered collection.
//!
//! # Invariants
//! - Reads return clones; callers can never alias store state.
//! - The lock is taken only inside synchronous sections, never across an
//!   `.await`, so concurrent callers interleave between whole operations.
//! - Store operations cannot be cancelled midway: once the latency pause
//!   resolves the mutation runs to completion even if the caller has
//!   dropped interest.
//! - Ids are UUID v4 and never collide with existing records.

use crate::model::{ContactId, ContactLinked, InsertPosition, Record, RecordId};
use crate::repo::clock::{Clock, SystemClock};
use crate::repo::latency::{Latency, OperationClass};
use log::{debug, warn};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error. Only absent ids can fail a store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound { kind: &'static str, id: RecordId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// In-memory ordered collection of one record type.
pub struct EntityStore<T: Record> {
    records: Mutex<Vec<T>>,
    latency: Latency,
    clock: Arc<dyn Clock>,
}

impl<T: Record> EntityStore<T> {
    /// Creates an empty store using the system clock.
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency, Arc::new(SystemClock))
    }

    /// Creates a store that owns `records` in the given order.
    ///
    /// Callers are expected to pass records with unique ids; seed loading
    /// checks this before constructing stores.
    pub fn with_records(records: Vec<T>, latency: Latency, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(records),
            latency,
            clock,
        }
    }

    /// Number of records at the time of the call.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Current time from the store clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Returns a snapshot of the whole collection in collection order.
    pub async fn get_all(&self) -> Vec<T> {
        self.latency.pause(OperationClass::List).await;
        self.records.lock().clone()
    }

    pub async fn get_by_id(&self, id: RecordId) -> Option<T> {
        self.latency.pause(OperationClass::Read).await;
        self.records
            .lock()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Returns copies of every record matching `predicate`, in collection
    /// order.
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.latency.pause(OperationClass::Read).await;
        self.records
            .lock()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Inserts a record built from `draft` with a fresh id.
    pub async fn create(&self, draft: T::Draft) -> T {
        self.latency.pause(OperationClass::Write).await;
        let record = T::from_draft(Uuid::new_v4(), draft, self.clock.now());
        {
            let mut records = self.records.lock();
            match T::INSERT_AT {
                InsertPosition::Front => records.insert(0, record.clone()),
                InsertPosition::Back => records.push(record.clone()),
            }
        }
        debug!(
            "event=record_create module=repo status=ok kind={} id={}",
            T::KIND,
            record.id()
        );
        record
    }

    /// Shallow-merges `patch` into the record with `id`.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    pub async fn update(&self, id: RecordId, patch: T::Patch) -> RepoResult<T> {
        self.latency.pause(OperationClass::Write).await;
        self.modify(id, |record| record.apply_patch(patch))
    }

    /// Applies `change` to the record with `id` inside the critical section.
    ///
    /// Used for targeted edits that do not fit a patch, such as toggles
    /// derived from the current value. No latency is applied here.
    pub(crate) fn modify<F>(&self, id: RecordId, change: F) -> RepoResult<T>
    where
        F: FnOnce(&mut T),
    {
        let updated = {
            let mut records = self.records.lock();
            records.iter_mut().find(|record| record.id() == id).map(|record| {
                change(record);
                record.clone()
            })
        };

        match updated {
            Some(record) => {
                debug!(
                    "event=record_update module=repo status=ok kind={} id={}",
                    T::KIND,
                    id
                );
                Ok(record)
            }
            None => Err(self.not_found(id, "update")),
        }
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    pub async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.latency.pause(OperationClass::Delete).await;
        let removed = {
            let mut records = self.records.lock();
            match records.iter().position(|record| record.id() == id) {
                Some(index) => {
                    records.remove(index);
                    true
                }
                None => false,
            }
        };

        if !removed {
            return Err(self.not_found(id, "delete"));
        }
        debug!(
            "event=record_delete module=repo status=ok kind={} id={}",
            T::KIND,
            id
        );
        Ok(())
    }

    /// Simulated delay for a write-class operation run through `modify`.
    pub(crate) async fn pause_for_write(&self) {
        self.latency.pause(OperationClass::Write).await;
    }

    fn not_found(&self, id: RecordId, op: &str) -> RepoError {
        warn!(
            "event=record_{op} module=repo status=error kind={} id={} reason=not_found",
            T::KIND,
            id
        );
        RepoError::NotFound { kind: T::KIND, id }
    }
}

impl<T: Record + ContactLinked> EntityStore<T> {
    /// Records whose loose contact reference equals `contact_id`, in
    /// collection order.
    ///
    /// No sorting happens here. Activity timelines are read through
    /// `ActivityRecorder::for_contact`, which orders newest first.
    pub async fn get_by_contact_id(&self, contact_id: ContactId) -> Vec<T> {
        self.filter(move |record| record.contact_id() == Some(contact_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityStore, RepoError};
    use crate::model::contact::{Contact, ContactPatch, NewContact};
    use crate::repo::latency::Latency;

    #[tokio::test]
    async fn returned_snapshots_do_not_alias_state() {
        let store: EntityStore<Contact> = EntityStore::new(Latency::none());
        store
            .create(NewContact::new("Jane Doe", "jane@acme.com"))
            .await;

        let mut snapshot = store.get_all().await;
        snapshot[0].name = "Mallory".to_string();
        snapshot.clear();

        let fresh = store.get_all().await;
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn update_missing_id_reports_kind_and_id() {
        let store: EntityStore<Contact> = EntityStore::new(Latency::none());
        let id = uuid::Uuid::new_v4();
        let err = store.update(id, ContactPatch::default()).await.unwrap_err();
        assert_eq!(err, RepoError::NotFound { kind: "contact", id });
        assert_eq!(err.to_string(), format!("contact not found: {id}"));
    }
}
