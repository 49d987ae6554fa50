//! Lead domain model.

use crate::model::validation::{
    require_non_negative, require_probability, ModelValidationError,
};
use crate::model::{merge_field, ContactId, ContactLinked, InsertPosition, Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualification stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
}

impl LeadStatus {
    /// Every status in funnel order.
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Converted => "converted",
        }
    }
}

/// A sales opportunity attached to a contact before it becomes a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: RecordId,
    pub contact_id: ContactId,
    pub status: LeadStatus,
    /// Currency amount, non-negative.
    pub value: f64,
    /// Percentage in `0..=100`.
    pub probability: u8,
    #[serde(default)]
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub contact_id: ContactId,
    pub status: LeadStatus,
    pub value: f64,
    pub probability: u8,
    #[serde(default)]
    pub source: String,
}

impl NewLead {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_non_negative("value", self.value)?;
        require_probability(self.probability)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    pub contact_id: Option<ContactId>,
    pub status: Option<LeadStatus>,
    pub value: Option<f64>,
    pub probability: Option<u8>,
    pub source: Option<String>,
}

impl LeadPatch {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if let Some(value) = self.value {
            require_non_negative("value", value)?;
        }
        if let Some(probability) = self.probability {
            require_probability(probability)?;
        }
        Ok(())
    }
}

impl Record for Lead {
    type Draft = NewLead;
    type Patch = LeadPatch;

    const KIND: &'static str = "lead";
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewLead, now: DateTime<Utc>) -> Self {
        Self {
            id,
            contact_id: draft.contact_id,
            status: draft.status,
            value: draft.value,
            probability: draft.probability,
            source: draft.source,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: LeadPatch) {
        merge_field(&mut self.contact_id, patch.contact_id);
        merge_field(&mut self.status, patch.status);
        merge_field(&mut self.value, patch.value);
        merge_field(&mut self.probability, patch.probability);
        merge_field(&mut self.source, patch.source);
    }
}

impl ContactLinked for Lead {
    fn contact_id(&self) -> Option<ContactId> {
        Some(self.contact_id)
    }
}
