//! Application root that owns every store.
//!
//! # Responsibility
//! - Construct the five record stores once, with one latency and clock.
//! - Hand out services that share those stores.
//!
//! # Invariants
//! - Each `Crm` value has its own stores; two instances never share state.

use crate::config::CrmConfig;
use crate::dashboard::DashboardAggregator;
use crate::pipeline::PipelineService;
use crate::repo::{Clock, EntityStore, Latency, SystemClock};
use crate::seed::{SeedData, SeedError};
use crate::service::activity_service::ActivityRecorder;
use crate::service::contact_service::ContactService;
use crate::service::deal_service::DealService;
use crate::service::lead_service::LeadService;
use crate::service::task_service::TaskService;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

pub struct Crm {
    clock: Arc<dyn Clock>,
    contacts: ContactService,
    leads: LeadService,
    deals: DealService,
    tasks: TaskService,
    activities: ActivityRecorder,
    pipeline: PipelineService,
    dashboard: DashboardAggregator,
}

impl Crm {
    /// Empty stores.
    pub fn new(latency: Latency, clock: Arc<dyn Clock>) -> Self {
        Self::from_seed(SeedData::default(), latency, clock)
    }

    /// Stores pre-filled from `seed`, keeping its record order.
    pub fn from_seed(seed: SeedData, latency: Latency, clock: Arc<dyn Clock>) -> Self {
        let contacts = Arc::new(EntityStore::with_records(seed.contacts, latency, clock.clone()));
        let leads = Arc::new(EntityStore::with_records(seed.leads, latency, clock.clone()));
        let deals = Arc::new(EntityStore::with_records(seed.deals, latency, clock.clone()));
        let tasks = Arc::new(EntityStore::with_records(seed.tasks, latency, clock.clone()));
        let activities = Arc::new(EntityStore::with_records(
            seed.activities,
            latency,
            clock.clone(),
        ));

        info!(
            "event=crm_init module=core status=ok contacts={} leads={} deals={} tasks={} activities={}",
            contacts.len(),
            leads.len(),
            deals.len(),
            tasks.len(),
            activities.len()
        );

        let deal_service = DealService::new(deals.clone());

        Self {
            clock,
            contacts: ContactService::new(contacts.clone()),
            leads: LeadService::new(leads.clone()),
            deals: deal_service.clone(),
            tasks: TaskService::new(tasks.clone()),
            activities: ActivityRecorder::new(activities),
            pipeline: PipelineService::new(deal_service),
            dashboard: DashboardAggregator::new(contacts, leads, deals, tasks),
        }
    }

    /// Builds stores from the configured seed and latency with the system
    /// clock.
    pub fn from_config(config: &CrmConfig) -> Result<Self, SeedError> {
        let seed = SeedData::load(config.seed_path.as_deref())?;
        Ok(Self::from_seed(seed, config.latency(), Arc::new(SystemClock)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn contacts(&self) -> &ContactService {
        &self.contacts
    }

    pub fn leads(&self) -> &LeadService {
        &self.leads
    }

    pub fn deals(&self) -> &DealService {
        &self.deals
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn activities(&self) -> &ActivityRecorder {
        &self.activities
    }

    pub fn pipeline(&self) -> &PipelineService {
        &self.pipeline
    }

    pub fn dashboard(&self) -> &DashboardAggregator {
        &self.dashboard
    }
}

