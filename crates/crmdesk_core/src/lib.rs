//! Core domain logic for crmdesk.
//! This crate owns every CRM record and the invariants around them.

pub mod config;
pub mod crm;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{ConfigError, CrmConfig, LatencyConfig};
pub use crm::Crm;
pub use dashboard::{compute_metrics, format_percent, DashboardAggregator, DashboardMetrics};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LogTarget};
pub use model::activity::{Activity, ActivityKind, ActivityMetadata, NewActivity};
pub use model::contact::{Contact, ContactPatch, ContactStatus, NewContact};
pub use model::deal::{Deal, DealPatch, DealStage, NewDeal, UnknownStage};
pub use model::lead::{Lead, LeadPatch, LeadStatus, NewLead};
pub use model::task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use model::validation::ModelValidationError;
pub use model::{ContactId, Record, RecordId};
pub use pipeline::{
    format_currency, group_by_stage, stage_total, PipelineBoard, PipelineService, StageColumn,
    StageMove,
};
pub use repo::{Clock, EntityStore, Latency, ManualClock, RepoError, RepoResult, SystemClock};
pub use seed::{SeedData, SeedError};
pub use service::activity_service::{ActivityRecorder, DEFAULT_RECENT_LIMIT};
pub use service::contact_service::ContactService;
pub use service::deal_service::DealService;
pub use service::lead_service::{LeadService, LeadStatusCounts};
pub use service::task_service::{TaskBucket, TaskBucketCounts, TaskService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
