//! Lead use-case service.

use crate::model::lead::{Lead, LeadPatch, LeadStatus, NewLead};
use crate::model::{ContactId, RecordId};
use crate::repo::EntityStore;
use crate::service::ServiceResult;
use std::sync::Arc;

/// Per-status lead totals for filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStatusCounts {
    pub all: usize,
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub converted: usize,
}

impl LeadStatusCounts {
    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        leads.into_iter().fold(Self::default(), |mut counts, lead| {
            counts.all += 1;
            match lead.status {
                LeadStatus::New => counts.new += 1,
                LeadStatus::Contacted => counts.contacted += 1,
                LeadStatus::Qualified => counts.qualified += 1,
                LeadStatus::Converted => counts.converted += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: LeadStatus) -> usize {
        match status {
            LeadStatus::New => self.new,
            LeadStatus::Contacted => self.contacted,
            LeadStatus::Qualified => self.qualified,
            LeadStatus::Converted => self.converted,
        }
    }
}

#[derive(Clone)]
pub struct LeadService {
    store: Arc<EntityStore<Lead>>,
}

impl LeadService {
    pub fn new(store: Arc<EntityStore<Lead>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Lead> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: RecordId) -> Option<Lead> {
        self.store.get_by_id(id).await
    }

    pub async fn by_contact(&self, contact_id: ContactId) -> Vec<Lead> {
        self.store.get_by_contact_id(contact_id).await
    }

    pub async fn by_status(&self, status: LeadStatus) -> Vec<Lead> {
        self.store.filter(move |lead| lead.status == status).await
    }

    pub async fn status_counts(&self) -> LeadStatusCounts {
        LeadStatusCounts::from_leads(&self.store.get_all().await)
    }

    pub async fn create(&self, draft: NewLead) -> ServiceResult<Lead> {
        draft.validate()?;
        Ok(self.store.create(draft).await)
    }

    pub async fn update(&self, id: RecordId, patch: LeadPatch) -> ServiceResult<Lead> {
        patch.validate()?;
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn update_status(&self, id: RecordId, status: LeadStatus) -> ServiceResult<Lead> {
        Ok(self.store.update(id, LeadPatch::status(status)).await?)
    }

    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.store.delete(id).await?)
    }
}
