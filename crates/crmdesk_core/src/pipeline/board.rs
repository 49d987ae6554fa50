//! Pure board projections over a deal snapshot.

use crate::model::deal::{Deal, DealStage};

/// Groups `deals` by stage, one entry per stage in `stages` order.
///
/// Deals whose stage is not listed are left out. Within a stage deals keep
/// their snapshot order.
pub fn group_by_stage(deals: &[Deal], stages: &[DealStage]) -> Vec<(DealStage, Vec<Deal>)> {
    stages
        .iter()
        .map(|&stage| {
            let members = deals
                .iter()
                .filter(|deal| deal.stage == stage)
                .cloned()
                .collect();
            (stage, members)
        })
        .collect()
}

/// Sum of `value` over deals in `stage`.
pub fn stage_total(deals: &[Deal], stage: DealStage) -> f64 {
    deals
        .iter()
        .filter(|deal| deal.stage == stage)
        .map(|deal| deal.value)
        .sum()
}

/// One board column.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn {
    pub stage: DealStage,
    pub deals: Vec<Deal>,
    pub total: f64,
}

impl StageColumn {
    pub fn count(&self) -> usize {
        self.deals.len()
    }
}

/// Board snapshot: columns in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineBoard {
    pub columns: Vec<StageColumn>,
}

impl PipelineBoard {
    pub fn build(deals: &[Deal], stages: &[DealStage]) -> Self {
        let columns = group_by_stage(deals, stages)
            .into_iter()
            .map(|(stage, deals)| {
                let total = deals.iter().map(|deal| deal.value).sum();
                StageColumn {
                    stage,
                    deals,
                    total,
                }
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, stage: DealStage) -> Option<&StageColumn> {
        self.columns.iter().find(|column| column.stage == stage)
    }

    /// Sum of every column total.
    pub fn total(&self) -> f64 {
        self.columns.iter().map(|column| column.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{group_by_stage, stage_total, PipelineBoard};
    use crate::model::deal::{Deal, DealStage, NewDeal};
    use crate::model::Record;
    use chrono::Utc;
    use uuid::Uuid;

    fn deal(name: &str, value: f64, stage: DealStage) -> Deal {
        Deal::from_draft(
            Uuid::new_v4(),
            NewDeal::new(name, "Acme", value, stage),
            Utc::now(),
        )
    }

    #[test]
    fn grouping_follows_stage_list_and_skips_unlisted_stages() {
        let deals = vec![
            deal("a", 100.0, DealStage::Closed),
            deal("b", 200.0, DealStage::Proposal),
            deal("c", 300.0, DealStage::Prospect),
            deal("d", 400.0, DealStage::Closed),
        ];

        let groups = group_by_stage(&deals, &DealStage::BOARD);
        let shape: Vec<_> = groups
            .iter()
            .map(|(stage, members)| {
                let names: Vec<_> = members.iter().map(|d| d.name.as_str()).collect();
                (*stage, names)
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                (DealStage::Prospect, vec!["c"]),
                (DealStage::Negotiation, vec![]),
                (DealStage::Closed, vec!["a", "d"]),
            ]
        );
    }

    #[test]
    fn stage_totals_over_all_stages_sum_to_pipeline_value() {
        let deals = vec![
            deal("a", 1250.0, DealStage::Qualified),
            deal("b", 8000.0, DealStage::Negotiation),
            deal("c", 420.5, DealStage::Closed),
        ];
        let pipeline: f64 = deals.iter().map(|d| d.value).sum();
        let by_stage: f64 = DealStage::ALL
            .iter()
            .map(|&stage| stage_total(&deals, stage))
            .sum();
        assert_eq!(by_stage, pipeline);

        let board = PipelineBoard::build(&deals, &DealStage::ALL);
        assert_eq!(board.total(), pipeline);
        assert_eq!(board.column(DealStage::Negotiation).unwrap().count(), 1);
    }

    #[test]
    fn empty_stage_total_is_zero() {
        assert_eq!(stage_total(&[], DealStage::Closed), 0.0);
    }
}
