//! Initial dataset loading.
//!
//! # Responsibility
//! - Parse the seed layout: one ordered JSON array per record type.
//! - Reject datasets that would break store invariants.
//!
//! # Invariants
//! - Seeds are read once at startup and never written back.
//! - Record ids are unique within each record type.
//! - Array order becomes collection order.

use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::lead::Lead;
use crate::model::task::Task;
use crate::model::{Record, RecordId};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_SEED: &str = include_str!("../../data/seed.json");

/// Error raised while loading a seed dataset.
#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    DuplicateId {
        kind: &'static str,
        id: RecordId,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed dataset: {err}"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id in seed: {id}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// One ordered sequence of records per type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub contacts: Vec<Contact>,
    pub leads: Vec<Lead>,
    pub deals: Vec<Deal>,
    pub tasks: Vec<Task>,
    pub activities: Vec<Activity>,
}

impl SeedData {
    /// Dataset compiled into the crate.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seed: SeedData = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = Self::from_json(&json)?;
        info!(
            "event=seed_load module=seed status=ok path={} contacts={} deals={}",
            path.display(),
            seed.contacts.len(),
            seed.deals.len()
        );
        Ok(seed)
    }

    /// Loads `path` when given, otherwise the builtin dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        ensure_unique_ids(&self.contacts)?;
        ensure_unique_ids(&self.leads)?;
        ensure_unique_ids(&self.deals)?;
        ensure_unique_ids(&self.tasks)?;
        ensure_unique_ids(&self.activities)
    }
}

fn ensure_unique_ids<T: Record>(records: &[T]) -> Result<(), SeedError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(SeedError::DuplicateId {
                kind: T::KIND,
                id: record.id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SeedData, SeedError};

    #[test]
    fn builtin_seed_parses_every_collection() {
        let seed = SeedData::builtin().expect("builtin seed should parse");
        assert!(!seed.contacts.is_empty());
        assert!(!seed.leads.is_empty());
        assert!(!seed.deals.is_empty());
        assert!(!seed.tasks.is_empty());
        assert!(!seed.activities.is_empty());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let seed = SeedData::from_json("{}").unwrap();
        assert_eq!(seed, SeedData::default());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{
            "tasks": [
                {"id": "7a000000-0000-4000-8000-000000000001", "title": "a",
                 "contactId": "1c000000-0000-4000-8000-000000000001",
                 "dueDate": "2024-03-12T17:00:00Z", "priority": "high", "status": "pending"},
                {"id": "7a000000-0000-4000-8000-000000000001", "title": "b",
                 "contactId": "1c000000-0000-4000-8000-000000000001",
                 "dueDate": "2024-03-13T17:00:00Z", "priority": "low", "status": "pending"}
            ]
        }"#;
        let err = SeedData::from_json(json).unwrap_err();
        assert!(matches!(err, SeedError::DuplicateId { kind: "task", .. }));
    }
}
