//! Contact domain model.
//!
//! # Invariants
//! - `created_at` and `last_contact` are equal at creation time.
//! - `status` stays `None` unless the caller supplies one.

use crate::model::validation::{require_email, require_text, ModelValidationError};
use crate::model::{clearable, merge_field, ContactId, InsertPosition, Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship stage of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Prospect,
    Qualified,
    Active,
    Inactive,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prospect => "prospect",
            Self::Qualified => "qualified",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A person the team is in touch with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    pub created_at: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
}

impl Contact {
    /// Case-insensitive substring match over name, email and company.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.company.to_lowercase().contains(needle)
    }
}

/// Caller-supplied fields for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub status: Option<ContactStatus>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Mirrors the contact form rules: name, email and company are required
    /// and email must look like an address.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)?;
        require_text("company", &self.company)
    }
}

/// Partial contact update.
///
/// `status: Some(None)` clears the status; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    #[serde(deserialize_with = "clearable")]
    pub status: Option<Option<ContactStatus>>,
    pub last_contact: Option<DateTime<Utc>>,
}

impl ContactPatch {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        if let Some(company) = &self.company {
            require_text("company", company)?;
        }
        Ok(())
    }
}

impl Record for Contact {
    type Draft = NewContact;
    type Patch = ContactPatch;

    const KIND: &'static str = "contact";
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewContact, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            position: draft.position,
            status: draft.status,
            created_at: now,
            last_contact: now,
        }
    }

    fn apply_patch(&mut self, patch: ContactPatch) {
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.email, patch.email);
        merge_field(&mut self.phone, patch.phone);
        merge_field(&mut self.company, patch.company);
        merge_field(&mut self.position, patch.position);
        merge_field(&mut self.status, patch.status);
        merge_field(&mut self.last_contact, patch.last_contact);
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPatch, ContactStatus, NewContact};
    use crate::model::Record;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> Contact {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        Contact::from_draft(
            Uuid::new_v4(),
            NewContact::new("Jane Doe", "jane@acme.com").with_company("Acme"),
            now,
        )
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut contact = sample();
        let before = contact.clone();
        contact.apply_patch(ContactPatch {
            phone: Some("555-0100".to_string()),
            ..ContactPatch::default()
        });

        assert_eq!(contact.phone, "555-0100");
        assert_eq!(contact.name, before.name);
        assert_eq!(contact.email, before.email);
        assert_eq!(contact.last_contact, before.last_contact);
    }

    #[test]
    fn patch_can_set_and_clear_status() {
        let mut contact = sample();
        contact.apply_patch(ContactPatch {
            status: Some(Some(ContactStatus::Active)),
            ..ContactPatch::default()
        });
        assert_eq!(contact.status, Some(ContactStatus::Active));

        contact.apply_patch(ContactPatch {
            status: Some(None),
            ..ContactPatch::default()
        });
        assert_eq!(contact.status, None);
    }

    #[test]
    fn json_null_clears_status_and_missing_key_keeps_it() {
        let clear: ContactPatch = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(clear.status, Some(None));

        let keep: ContactPatch = serde_json::from_str(r#"{"phone": "555-0100"}"#).unwrap();
        assert_eq!(keep.status, None);

        let set: ContactPatch = serde_json::from_str(r#"{"status": "active"}"#).unwrap();
        assert_eq!(set.status, Some(Some(ContactStatus::Active)));

        let mut contact = sample();
        contact.apply_patch(set);
        contact.apply_patch(keep);
        assert_eq!(contact.status, Some(ContactStatus::Active));
        contact.apply_patch(clear);
        assert_eq!(contact.status, None);
    }

    #[test]
    fn serialization_uses_camel_case_and_omits_missing_status() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastContact").is_some());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn draft_validation_requires_company() {
        let draft = NewContact::new("Jane Doe", "jane@acme.com");
        assert!(draft.validate().is_err());
        assert!(draft.with_company("Acme").validate().is_ok());
    }
}
