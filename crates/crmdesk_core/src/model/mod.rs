//! Domain model for CRM records.
//!
//! # Responsibility
//! - Define the canonical record shapes owned by the entity stores.
//! - Define caller-side inputs (`New*` drafts, `*Patch` partial updates).
//! - Define the `Record` contract the generic store is built on.
//!
//! # Invariants
//! - Every record is identified by a UUID generated at create time.
//! - A record id never changes after creation; patches cannot touch it.
//! - Contact references (`contact_id`) are loose: nothing enforces that the
//!   referenced contact exists.

pub mod activity;
pub mod contact;
pub mod deal;
pub mod lead;
pub mod task;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Stable identifier shared by every record type.
pub type RecordId = Uuid;

/// Identifier of a `Contact`, also used by loose back-references.
pub type ContactId = Uuid;

/// Where a store places a freshly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Prepend; collection reads newest first.
    Front,
    /// Append; collection keeps insertion order.
    Back,
}

/// Contract between a record type and the generic in-memory store.
///
/// Implementors describe how a caller draft becomes a record and how a
/// partial patch merges into an existing record.
pub trait Record: Clone + Send + Sync + 'static {
    /// Caller-supplied fields for `create`.
    type Draft: Send;
    /// Partial update; absent fields are left untouched.
    type Patch: Send;

    /// Lowercase entity name used in errors and log events.
    const KIND: &'static str;
    /// Placement of new records inside the collection.
    const INSERT_AT: InsertPosition;

    fn id(&self) -> RecordId;

    /// Builds a record from a draft, stamping id and creation-time fields.
    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Shallow-merges present patch fields over `self`.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Records that carry a loose back-reference to a contact.
pub trait ContactLinked {
    fn contact_id(&self) -> Option<ContactId>;
}

/// Assigns `value` to `slot` when the patch field is present.
pub(crate) fn merge_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Deserializes a clearable patch field.
///
/// A missing key stays `None` through the container default; an explicit
/// `null` becomes `Some(None)`.
pub(crate) fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
