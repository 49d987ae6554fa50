//! Contact use-case service.
//!
//! # Invariants
//! - `search` is case-insensitive and OR-combines name, email and company.
//! - An empty query matches every contact.

use crate::model::contact::{Contact, ContactPatch, NewContact};
use crate::model::ContactId;
use crate::repo::EntityStore;
use crate::service::ServiceResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct ContactService {
    store: Arc<EntityStore<Contact>>,
}

impl ContactService {
    pub fn new(store: Arc<EntityStore<Contact>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Contact> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: ContactId) -> Option<Contact> {
        self.store.get_by_id(id).await
    }

    /// Creates a contact after validating name, email and company.
    pub async fn create(&self, draft: NewContact) -> ServiceResult<Contact> {
        draft.validate()?;
        Ok(self.store.create(draft).await)
    }

    pub async fn update(&self, id: ContactId, patch: ContactPatch) -> ServiceResult<Contact> {
        patch.validate()?;
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn delete(&self, id: ContactId) -> ServiceResult<()> {
        Ok(self.store.delete(id).await?)
    }

    pub async fn search(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.store
            .filter(move |contact| contact.matches_lowercase(&needle))
            .await
    }

    /// Records that the team just interacted with the contact.
    pub async fn touch_last_contact(
        &self,
        id: ContactId,
        at: DateTime<Utc>,
    ) -> ServiceResult<Contact> {
        let patch = ContactPatch {
            last_contact: Some(at),
            ..ContactPatch::default()
        };
        Ok(self.store.update(id, patch).await?)
    }
}
