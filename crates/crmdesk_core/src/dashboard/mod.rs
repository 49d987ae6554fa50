//! Cross-entity dashboard metrics.
//!
//! # Responsibility
//! - Reduce contact, lead, deal and task snapshots into one metrics record.
//!
//! # Invariants
//! - `compute_metrics` is pure: same snapshots and `now` give the same result.
//! - Conversion rate is 0 when there are no deals.

pub mod aggregator;
pub mod metrics;

pub use aggregator::DashboardAggregator;
pub use metrics::{compute_metrics, format_percent, DashboardMetrics};
