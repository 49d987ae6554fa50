//! Activity timeline entries.
//!
//! Activities are append-only: there is no patch type and the recorder
//! exposes no update or delete.

use crate::model::validation::{require_text, ModelValidationError};
use crate::model::{ContactId, ContactLinked, InsertPosition, Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Email,
    Call,
    Meeting,
    Note,
    Task,
}

/// Optional free-form details shown under a timeline entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: RecordId,
    pub contact_id: ContactId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActivityMetadata>,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    /// Newest first; ties broken by id so the order is total.
    pub fn newest_first(a: &Activity, b: &Activity) -> Ordering {
        b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub contact_id: ContactId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    #[serde(default)]
    pub metadata: Option<ActivityMetadata>,
}

impl NewActivity {
    pub fn new(contact_id: ContactId, kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            contact_id,
            kind,
            description: description.into(),
            metadata: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("description", &self.description)
    }
}

/// Activities cannot be patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPatch {}

impl Record for Activity {
    type Draft = NewActivity;
    type Patch = NoPatch;

    const KIND: &'static str = "activity";
    const INSERT_AT: InsertPosition = InsertPosition::Front;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewActivity, now: DateTime<Utc>) -> Self {
        Self {
            id,
            contact_id: draft.contact_id,
            kind: draft.kind,
            description: draft.description,
            metadata: draft.metadata,
            timestamp: now,
        }
    }

    fn apply_patch(&mut self, patch: NoPatch) {
        match patch {}
    }
}

impl ContactLinked for Activity {
    fn contact_id(&self) -> Option<ContactId> {
        Some(self.contact_id)
    }
}
