use chrono::{NaiveDate, TimeZone, Utc};
use contract_buyout::adapters::{JsonDraftIntake, PlaceholderIntake, UnavailableIntake};
use contract_buyout::domain::model::{Document, ProcessingStatus};
use contract_buyout::domain::ports::FixedClock;
use contract_buyout::{ContractError, ContractStore, IntakeService};
use std::time::Duration;

#[tokio::test]
async fn test_json_draft_upload_is_priced() {
    let draft = serde_json::json!({
        "name": "Fleet telematics",
        "startDate": "2024-01-01",
        "endDate": "2025-01-01",
        "lineItems": [
            {"productName": "Vehicle Gateway", "quantity": 2, "unitPrice": 500}
        ]
    });

    let mut store = ContractStore::new();
    let mut service = IntakeService::new(JsonDraftIntake);
    let document = Document::new("telematics.pdf", serde_json::to_vec(&draft).unwrap());

    let id = service.ingest(&mut store, &document).await.unwrap();
    assert_eq!(service.status(), ProcessingStatus::Success);

    let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let metrics = store.metrics(now);
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].0, id);
    assert_eq!(metrics[0].1.total_buyout, 6000.0);
}

#[tokio::test]
async fn test_failed_upload_keeps_existing_contracts() {
    let mut store = ContractStore::new();
    store.create_empty(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    let before = store.contracts().to_vec();

    let mut service = IntakeService::new(UnavailableIntake);
    let err = service
        .ingest(&mut store, &Document::new("scan.png", vec![0; 16]))
        .await
        .unwrap_err();

    assert!(matches!(err, ContractError::IntakeFailed { .. }));
    assert_eq!(service.status(), ProcessingStatus::Error);
    assert_eq!(service.last_error(), Some("Could not extract data."));
    assert_eq!(store.contracts(), before.as_slice());
}

#[tokio::test]
async fn test_placeholder_draft_has_no_remaining_term() {
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let clock = FixedClock::at_date(today);
    let adapter = PlaceholderIntake::with_clock(Duration::from_millis(5), clock);

    let mut store = ContractStore::new();
    let mut service = IntakeService::new(adapter);
    service
        .ingest(&mut store, &Document::new("acme-msa.docx", Vec::new()))
        .await
        .unwrap();

    let contract = &store.contracts()[0];
    assert_eq!(contract.name, "acme-msa.docx");
    assert_eq!(contract.line_items[0].product_name, "Sample Product");

    let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    assert_eq!(store.grand_total(now), 0.0);
}

#[tokio::test]
async fn test_service_recovers_after_failure() {
    let mut store = ContractStore::new();
    let mut service = IntakeService::new(JsonDraftIntake);

    assert!(service
        .ingest(&mut store, &Document::new("broken.pdf", b"not json".to_vec()))
        .await
        .is_err());
    assert!(service.last_error().is_some());
    service.reset();
    assert_eq!(service.status(), ProcessingStatus::Idle);

    let body = br#"{"name":"Retry","startDate":"2024-01-01","endDate":"2024-12-31"}"#;
    service
        .ingest(&mut store, &Document::new("fixed.pdf", body.to_vec()))
        .await
        .unwrap();
    assert_eq!(service.last_error(), None);
    assert_eq!(store.len(), 1);
    assert!(store.contracts()[0].line_items.is_empty());
}

#[tokio::test]
async fn test_json_draft_with_float_quantities() {
    let body = br#"{
        "name": "Extracted MSA",
        "startDate": "2024-01-01",
        "endDate": "2025-01-01",
        "lineItems": [
            {"productName": "Vehicle Gateway", "quantity": 2.0, "unitPrice": 500.0},
            {"productName": "Dash Cam", "quantity": 0.5, "unitPrice": 40.0}
        ]
    }"#;

    let mut store = ContractStore::new();
    let mut service = IntakeService::new(JsonDraftIntake);
    let err = service
        .ingest(&mut store, &Document::new("msa.pdf", body.to_vec()))
        .await
        .unwrap_err();

    // Half a dash cam is not a quantity; the whole upload is refused.
    assert!(matches!(err, ContractError::IntakeFailed { .. }));
    assert!(service.last_error().unwrap().contains("whole-number quantity"));
    assert!(store.is_empty());

    let whole = br#"{
        "name": "Extracted MSA",
        "startDate": "2024-01-01",
        "endDate": "2025-01-01",
        "lineItems": [{"productName": "Vehicle Gateway", "quantity": 2.0, "unitPrice": 500.0}]
    }"#;
    service
        .ingest(&mut store, &Document::new("msa.pdf", whole.to_vec()))
        .await
        .unwrap();

    assert_eq!(store.contracts()[0].line_items[0].quantity, 2);
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    assert_eq!(store.grand_total(now), 6000.0);
}
