//! Stage transitions for deals on the pipeline board.

use crate::model::deal::{Deal, DealStage};
use crate::model::{Record, RecordId};
use crate::pipeline::board::PipelineBoard;
use crate::service::deal_service::DealService;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Outcome of a stage move.
#[derive(Debug, Clone, PartialEq)]
pub enum StageMove {
    /// Target equals the current stage; nothing was written.
    Unchanged(Deal),
    /// Stage was rewritten through the store.
    Moved { deal: Deal, from: DealStage },
}

impl StageMove {
    pub fn deal(&self) -> &Deal {
        match self {
            Self::Unchanged(deal) => deal,
            Self::Moved { deal, .. } => deal,
        }
    }

    pub fn into_deal(self) -> Deal {
        match self {
            Self::Unchanged(deal) => deal,
            Self::Moved { deal, .. } => deal,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Board-facing facade over the deal store.
#[derive(Clone)]
pub struct PipelineService {
    deals: DealService,
}

impl PipelineService {
    pub fn new(deals: DealService) -> Self {
        Self { deals }
    }

    /// Board snapshot over `stages`.
    pub async fn board(&self, stages: &[DealStage]) -> PipelineBoard {
        let deals = self.deals.list().await;
        PipelineBoard::build(&deals, stages)
    }

    /// Moves a deal to `target`.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when the deal does not exist, or was
    ///   removed between the read and the write.
    pub async fn move_to_stage(
        &self,
        deal_id: RecordId,
        target: DealStage,
    ) -> ServiceResult<StageMove> {
        let current = self
            .deals
            .get(deal_id)
            .await
            .ok_or(ServiceError::NotFound {
                kind: Deal::KIND,
                id: deal_id,
            })?;

        if current.stage == target {
            return Ok(StageMove::Unchanged(current));
        }

        let from = current.stage;
        let deal = self.deals.update_stage(deal_id, target).await?;
        info!(
            "event=deal_stage_move module=pipeline status=ok id={} from={} to={}",
            deal_id, from, target
        );
        Ok(StageMove::Moved { deal, from })
    }
}
