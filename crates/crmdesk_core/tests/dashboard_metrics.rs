use chrono::{DateTime, Duration, TimeZone, Utc};
use crmdesk_core::{
    compute_metrics, format_percent, stage_total, Crm, DealStage, Latency, ManualClock, NewDeal,
    NewTask, SeedData, TaskPriority,
};
use std::sync::Arc;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
}

fn seeded_crm() -> Crm {
    let clock = Arc::new(ManualClock::new(now()));
    Crm::from_seed(SeedData::builtin().unwrap(), Latency::none(), clock)
}

#[tokio::test]
async fn builtin_seed_snapshot() {
    let crm = seeded_crm();

    let metrics = crm.dashboard().snapshot(crm.now()).await;

    assert_eq!(metrics.total_pipeline_value, 180_500.0);
    assert_eq!(metrics.closed_value, 83_000.0);
    assert_eq!(format_percent(metrics.conversion_rate), "33.3%");
    assert_eq!(metrics.total_contacts, 5);
    assert_eq!(metrics.total_deals, 6);
    assert_eq!(metrics.total_leads, 4);
    assert_eq!(metrics.pending_tasks, 4);
    assert_eq!(metrics.overdue_tasks_count, 1);
}

#[tokio::test]
async fn stage_totals_sum_to_pipeline_value() {
    let crm = seeded_crm();
    let deals = crm.deals().list().await;

    let by_stage: f64 = DealStage::ALL
        .iter()
        .map(|stage| stage_total(&deals, *stage))
        .sum();
    let metrics = crm.dashboard().snapshot(crm.now()).await;

    assert_eq!(by_stage, metrics.total_pipeline_value);
}

#[tokio::test]
async fn snapshot_reflects_writes_and_clock() {
    let clock = Arc::new(ManualClock::new(now()));
    let crm = Crm::new(Latency::none(), clock.clone());

    let empty = crm.dashboard().snapshot(crm.now()).await;
    assert_eq!(empty.conversion_rate, 0.0);
    assert_eq!(empty.total_pipeline_value, 0.0);

    crm.deals()
        .create(NewDeal::new("Won", "Acme", 300.0, DealStage::Closed))
        .await
        .unwrap();
    crm.deals()
        .create(NewDeal::new("Open", "Acme", 100.0, DealStage::Proposal))
        .await
        .unwrap();
    crm.tasks()
        .create(NewTask {
            title: "Follow up".to_string(),
            description: String::new(),
            contact_id: Uuid::new_v4(),
            due_date: now() + Duration::hours(2),
            priority: TaskPriority::High,
        })
        .await
        .unwrap();

    let metrics = crm.dashboard().snapshot(crm.now()).await;
    assert_eq!(metrics.total_pipeline_value, 400.0);
    assert_eq!(metrics.closed_value, 300.0);
    assert_eq!(metrics.conversion_rate, 50.0);
    assert_eq!(metrics.pending_tasks, 1);
    assert_eq!(metrics.overdue_tasks_count, 0);

    clock.advance(Duration::hours(3));
    let later = crm.dashboard().snapshot(crm.now()).await;
    assert_eq!(later.overdue_tasks_count, 1);
}

#[test]
fn metrics_serialize_with_camel_case_keys() {
    let seed = SeedData::builtin().unwrap();
    let metrics = compute_metrics(&seed.contacts, &seed.leads, &seed.deals, &seed.tasks, now());

    let json = serde_json::to_value(metrics).unwrap();
    assert_eq!(json["totalPipelineValue"], 180_500.0);
    assert_eq!(json["overdueTasksCount"], 1);
    assert_eq!(json["totalContacts"], 5);
}
