use crmdesk_core::{Crm, CrmConfig, DealStage, Latency, SeedData, SeedError};
use std::io::Write;
use tempfile::NamedTempFile;

const SMALL_SEED: &str = r#"{
  "contacts": [
    {
      "id": "5e000000-0000-4000-8000-000000000001",
      "name": "Jane Doe",
      "email": "jane@acme.com",
      "phone": "",
      "company": "Acme",
      "position": "",
      "createdAt": "2024-03-01T08:00:00Z",
      "lastContact": "2024-03-01T08:00:00Z"
    }
  ],
  "deals": [
    {
      "id": "5e000000-0000-4000-8000-0000000000d1",
      "name": "Pilot",
      "company": "Acme",
      "contactName": "Jane Doe",
      "value": 2500,
      "stage": "proposal",
      "probability": 40,
      "description": "",
      "createdAt": "2024-03-02T08:00:00Z"
    }
  ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn seed_file_fills_missing_sections_with_empty_lists() {
    let file = write_temp(SMALL_SEED);

    let seed = SeedData::from_path(file.path()).unwrap();

    assert_eq!(seed.contacts.len(), 1);
    assert_eq!(seed.deals.len(), 1);
    assert!(seed.leads.is_empty());
    assert!(seed.tasks.is_empty());
    assert!(seed.activities.is_empty());
}

#[test]
fn missing_or_malformed_seed_is_an_error() {
    let missing = std::env::temp_dir().join("crmdesk-seed-does-not-exist.json");
    assert!(matches!(
        SeedData::from_path(&missing),
        Err(SeedError::Io { .. })
    ));

    let broken = write_temp("{ not json");
    assert!(matches!(
        SeedData::from_path(broken.path()),
        Err(SeedError::Parse(_))
    ));
}

#[tokio::test]
async fn crm_from_config_uses_configured_seed() {
    let seed_file = write_temp(SMALL_SEED);
    let config_json = format!(
        r#"{{ "latency_scale": 0.0, "seed_path": {} }}"#,
        serde_json::to_string(seed_file.path()).unwrap()
    );
    let config_file = write_temp(&config_json);

    let config = CrmConfig::from_file(config_file.path()).unwrap();
    assert_eq!(config.latency(), Latency::none());

    let crm = Crm::from_config(&config).unwrap();
    let contacts = crm.contacts().list().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Jane Doe");
    assert_eq!(crm.pipeline().board(&DealStage::ALL).await.total(), 2500.0);
}

#[test]
fn crm_from_config_reports_missing_seed() {
    let config = CrmConfig {
        latency_scale: 0.0,
        seed_path: Some(std::env::temp_dir().join("crmdesk-no-seed-here.json")),
        ..CrmConfig::default()
    };

    assert!(matches!(
        Crm::from_config(&config),
        Err(SeedError::Io { .. })
    ));
}
