use chrono::{DateTime, Duration, TimeZone, Utc};
use crmdesk_core::{
    ActivityKind, ActivityMetadata, Crm, Latency, ManualClock, ModelValidationError, NewActivity,
    SeedData, ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

fn t1() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
}

fn crm_at(clock: Arc<ManualClock>) -> Crm {
    Crm::new(Latency::none(), clock)
}

#[tokio::test]
async fn recent_returns_newest_entries_first() {
    let clock = Arc::new(ManualClock::new(t1()));
    let crm = crm_at(clock.clone());
    let contact = Uuid::new_v4();

    for (kind, text) in [
        (ActivityKind::Email, "first"),
        (ActivityKind::Call, "second"),
        (ActivityKind::Meeting, "third"),
    ] {
        crm.activities()
            .record(NewActivity::new(contact, kind, text))
            .await
            .unwrap();
        clock.advance(Duration::minutes(5));
    }

    let recent = crm.activities().recent(2).await;
    let descriptions: Vec<_> = recent.iter().map(|a| a.description.as_str()).collect();
    assert_eq!(descriptions, vec!["third", "second"]);
    assert_eq!(recent[0].timestamp, t1() + Duration::minutes(10));

    assert_eq!(crm.activities().recent(10).await.len(), 3);
    assert!(crm.activities().recent(0).await.is_empty());
}

#[tokio::test]
async fn recorded_entry_keeps_metadata_and_stamps_fields() {
    let clock = Arc::new(ManualClock::new(t1()));
    let crm = crm_at(clock);
    let contact = Uuid::new_v4();

    let mut entry = NewActivity::new(contact, ActivityKind::Call, "Discovery call");
    entry.metadata = Some(ActivityMetadata {
        subject: None,
        duration: Some("30 min".to_string()),
        outcome: Some("Positive".to_string()),
    });
    let recorded = crm.activities().record(entry).await.unwrap();

    assert!(!recorded.id.is_nil());
    assert_eq!(recorded.timestamp, t1());
    assert_eq!(
        crm.activities().get(recorded.id).await.unwrap(),
        recorded
    );
    let json = serde_json::to_value(&recorded).unwrap();
    assert_eq!(json["type"], "call");
    assert_eq!(json["metadata"]["duration"], "30 min");
}

#[tokio::test]
async fn blank_description_is_rejected() {
    let crm = crm_at(Arc::new(ManualClock::new(t1())));

    let err = crm
        .activities()
        .record(NewActivity::new(Uuid::new_v4(), ActivityKind::Note, "   "))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Validation(ModelValidationError::EmptyField("description"))
    );
    assert!(crm.activities().list().await.is_empty());
}

#[tokio::test]
async fn equal_timestamps_have_a_stable_order() {
    let crm = crm_at(Arc::new(ManualClock::new(t1())));
    let contact = Uuid::new_v4();
    for text in ["a", "b", "c"] {
        crm.activities()
            .record(NewActivity::new(contact, ActivityKind::Note, text))
            .await
            .unwrap();
    }

    let first = crm.activities().recent(3).await;
    let second = crm.activities().recent(3).await;
    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn for_contact_filters_and_sorts_seeded_timeline() {
    let clock = Arc::new(ManualClock::new(t1()));
    let crm = Crm::from_seed(SeedData::builtin().unwrap(), Latency::none(), clock);
    let sarah = Uuid::parse_str("1c000000-0000-4000-8000-000000000001").unwrap();

    let timeline = crm.activities().for_contact(sarah).await;

    assert_eq!(timeline.len(), 2);
    assert!(timeline.iter().all(|a| a.contact_id == sarah));
    assert!(timeline[0].timestamp > timeline[1].timestamp);
    assert!(crm.activities().for_contact(Uuid::new_v4()).await.is_empty());
}

#[tokio::test]
async fn for_contact_sorts_even_when_stored_oldest_first() {
    let mut seed = SeedData::builtin().unwrap();
    seed.activities.reverse();
    let sarah = Uuid::parse_str("1c000000-0000-4000-8000-000000000001").unwrap();
    let stored: Vec<_> = seed
        .activities
        .iter()
        .filter(|a| a.contact_id == sarah)
        .map(|a| a.id)
        .collect();
    let crm = Crm::from_seed(seed, Latency::none(), Arc::new(ManualClock::new(t1())));

    let timeline: Vec<_> = crm
        .activities()
        .for_contact(sarah)
        .await
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline, stored.into_iter().rev().collect::<Vec<_>>());
}
