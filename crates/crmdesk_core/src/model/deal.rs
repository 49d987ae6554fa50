//! Deal domain model.
//!
//! # Invariants
//! - `stage` is always one of the enumerated `DealStage` values.
//! - Stage changes are unrestricted: any stage may follow any other.

use crate::model::validation::{
    require_positive, require_probability, require_text, ModelValidationError,
};
use crate::model::{
    clearable, merge_field, ContactId, ContactLinked, InsertPosition, Record, RecordId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named phase of the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Prospect,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
}

impl DealStage {
    /// Every stage in pipeline order.
    pub const ALL: [DealStage; 5] = [
        DealStage::Prospect,
        DealStage::Qualified,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::Closed,
    ];

    /// Stages shown as columns on the pipeline board.
    pub const BOARD: [DealStage; 3] = [
        DealStage::Prospect,
        DealStage::Negotiation,
        DealStage::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prospect => "prospect",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Closed => "closed",
        }
    }

    /// Column heading used by board views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prospect => "Prospect",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Closed => "Closed",
        }
    }
}

impl Display for DealStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for stage names outside the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl Display for UnknownStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown deal stage `{}`", self.0)
    }
}

impl std::error::Error for UnknownStage {}

impl FromStr for DealStage {
    type Err = UnknownStage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| UnknownStage(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// Deals created from the board form carry only a display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub contact_name: String,
    pub value: f64,
    pub stage: DealStage,
    #[serde(default)]
    pub probability: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub contact_name: String,
    pub value: f64,
    pub stage: DealStage,
    #[serde(default)]
    pub probability: u8,
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

impl NewDeal {
    /// Minimal draft with the fields the board form requires.
    pub fn new(name: impl Into<String>, company: impl Into<String>, value: f64, stage: DealStage) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            contact_id: None,
            contact_name: String::new(),
            value,
            stage,
            probability: 0,
            close_date: None,
            description: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("name", &self.name)?;
        require_text("company", &self.company)?;
        require_positive("value", self.value)?;
        require_probability(self.probability)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    #[serde(deserialize_with = "clearable")]
    pub contact_id: Option<Option<ContactId>>,
    pub contact_name: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    #[serde(deserialize_with = "clearable")]
    pub close_date: Option<Option<DateTime<Utc>>>,
    pub description: Option<String>,
}

impl DealPatch {
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(company) = &self.company {
            require_text("company", company)?;
        }
        if let Some(value) = self.value {
            require_positive("value", value)?;
        }
        if let Some(probability) = self.probability {
            require_probability(probability)?;
        }
        Ok(())
    }
}

impl Record for Deal {
    type Draft = NewDeal;
    type Patch = DealPatch;

    const KIND: &'static str = "deal";
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewDeal, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            company: draft.company,
            contact_id: draft.contact_id,
            contact_name: draft.contact_name,
            value: draft.value,
            stage: draft.stage,
            probability: draft.probability,
            close_date: draft.close_date,
            description: draft.description,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: DealPatch) {
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.company, patch.company);
        merge_field(&mut self.contact_id, patch.contact_id);
        merge_field(&mut self.contact_name, patch.contact_name);
        merge_field(&mut self.value, patch.value);
        merge_field(&mut self.stage, patch.stage);
        merge_field(&mut self.probability, patch.probability);
        merge_field(&mut self.close_date, patch.close_date);
        merge_field(&mut self.description, patch.description);
    }
}

impl ContactLinked for Deal {
    fn contact_id(&self) -> Option<ContactId> {
        self.contact_id
    }
}
