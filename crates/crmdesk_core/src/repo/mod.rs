//! Repository layer: in-memory record stores.
//!
//! # Responsibility
//! - Own one ordered collection per record type.
//! - Provide CRUD APIs that hand out copies, never references into state.
//! - Simulate network latency through an injectable `Latency` value.
//!
//! # Invariants
//! - Every mutation runs inside one non-suspending critical section.
//! - Repository APIs return `NotFound` for update/delete of absent ids and
//!   leave the collection untouched in that case.

pub mod clock;
pub mod entity_store;
pub mod latency;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity_store::{EntityStore, RepoError, RepoResult};
pub use latency::{Latency, OperationClass};
