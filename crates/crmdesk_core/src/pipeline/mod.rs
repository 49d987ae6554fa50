//! Deal pipeline: stage grouping, stage totals and stage moves.
//!
//! # Responsibility
//! - Group deals into board columns and roll up their values.
//! - Move a deal between stages on behalf of drag-and-drop style callers.
//!
//! # Invariants
//! - Stage moves are unrestricted; any stage is reachable from any other.
//! - Moving a deal to its current stage is a no-op and writes nothing.
//! - The sum of every stage total equals the total pipeline value.

pub mod board;
pub mod currency;
pub mod stage_machine;

pub use board::{group_by_stage, stage_total, PipelineBoard, StageColumn};
pub use currency::format_currency;
pub use stage_machine::{PipelineService, StageMove};
