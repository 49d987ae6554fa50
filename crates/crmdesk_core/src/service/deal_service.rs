//! Deal use-case service.
//!
//! Board moves go through `pipeline::PipelineService`; `update_stage` here
//! is the unconditional store write it builds on.

use crate::model::deal::{Deal, DealPatch, DealStage, NewDeal};
use crate::model::{ContactId, RecordId};
use crate::repo::EntityStore;
use crate::service::ServiceResult;
use std::sync::Arc;

#[derive(Clone)]
pub struct DealService {
    store: Arc<EntityStore<Deal>>,
}

impl DealService {
    pub fn new(store: Arc<EntityStore<Deal>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Deal> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: RecordId) -> Option<Deal> {
        self.store.get_by_id(id).await
    }

    pub async fn by_contact(&self, contact_id: ContactId) -> Vec<Deal> {
        self.store.get_by_contact_id(contact_id).await
    }

    pub async fn by_stage(&self, stage: DealStage) -> Vec<Deal> {
        self.store.filter(move |deal| deal.stage == stage).await
    }

    /// Creates a deal; name and company are required and value must be
    /// greater than zero.
    pub async fn create(&self, draft: NewDeal) -> ServiceResult<Deal> {
        draft.validate()?;
        Ok(self.store.create(draft).await)
    }

    pub async fn update(&self, id: RecordId, patch: DealPatch) -> ServiceResult<Deal> {
        patch.validate()?;
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn update_stage(&self, id: RecordId, stage: DealStage) -> ServiceResult<Deal> {
        Ok(self.store.update(id, DealPatch::stage(stage)).await?)
    }

    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.store.delete(id).await?)
    }
}
