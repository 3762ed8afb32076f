use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use contract_buyout::domain::ports::{Clock, FixedClock};
use contract_buyout::utils::format::format_currency;
use contract_buyout::{
    calculate_contract_metrics, ContractCalculations, ContractStore, LineItem, PortfolioConfig,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn evaluation_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_portfolio_file_to_grand_total() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[settings]
as_of = "2024-07-01"

[[contracts]]
name = "Fleet telematics"
start_date = "2024-01-01"
end_date = "2025-01-01"

[[contracts.line_items]]
product_name = "Vehicle Gateway"
quantity = 2
unit_price = 500.0

[[contracts]]
name = "Expired pilot"
start_date = "2022-01-01"
end_date = "2023-01-01"

[[contracts.line_items]]
product_name = "Asset Tracker"
quantity = 40
unit_price = 15.0

[[contracts]]
name = "Unsigned"
start_date = "TBD"
end_date = "2026-01-01"

[[contracts.line_items]]
product_name = "Vehicle Gateway"
quantity = 10
unit_price = 30.0
"#,
    )
    .unwrap();

    let config = PortfolioConfig::from_file(file.path()).unwrap();
    let clock = FixedClock::at_date(config.as_of().unwrap().unwrap());
    let store = config.into_store();

    let summary = store.summary(clock.now());
    assert_eq!(summary.contracts.len(), 3);

    let telematics = &summary.contracts[0].metrics;
    assert_eq!(telematics.monthly_total, 1000.0);
    assert_eq!(telematics.remaining_months, 6.0);
    assert_eq!(telematics.total_buyout, 6000.0);

    let expired = &summary.contracts[1].metrics;
    assert_eq!(expired.total_contract_length_months, 12.0);
    assert_eq!(expired.remaining_months, 0.0);
    assert_eq!(expired.total_buyout, 0.0);

    assert_eq!(summary.contracts[2].metrics, ContractCalculations::ZERO);

    assert_eq!(summary.grand_total, 6000.0);
    assert_eq!(format_currency(summary.grand_total), "$6,000.00");
}

#[test]
fn test_editing_session() {
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let now = evaluation_instant();
    let mut store = ContractStore::new();

    let first = store.create_empty(today);
    let second = store.create_empty(today);
    assert_eq!(store.grand_total(now), 0.0);

    // Fill in the first contract the way an editor would: copy, edit, replace.
    let mut edited = store.contracts()[0].clone();
    let original_item_id = edited.line_items[0].id;
    edited.start_date = "2024-01-01".to_string();
    edited.end_date = "2025-01-01".to_string();
    edited.line_items[0] = LineItem {
        product_name: "Vehicle Gateway".to_string(),
        quantity: 2,
        unit_price: 500.0,
        ..edited.line_items[0].clone()
    };
    edited.line_items.push(LineItem::new("Dash Cam", 1, 250.0));
    store.update_at(0, edited).unwrap();

    let metrics = calculate_contract_metrics(store.get(first).unwrap(), now);
    assert_eq!(metrics.monthly_total, 1250.0);
    assert_eq!(metrics.total_buyout, 7500.0);
    assert_eq!(store.grand_total(now), 7500.0);

    // Line item identity is stable across edits.
    let stored = store.get(first).unwrap();
    assert_eq!(stored.line_items.len(), 2);
    assert_eq!(stored.line_items[0].id, original_item_id);
    assert_eq!(stored.line_items[0].product_name, "Vehicle Gateway");
    assert_ne!(stored.line_items[1].id, original_item_id);

    store.delete(second).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.grand_total(now), 7500.0);

    let third = store.create_empty(today);
    assert_eq!(store.get(third).unwrap().name, "Contract 3");
    assert_eq!(store.grand_total(now), 7500.0);
}

#[test]
fn test_remaining_term_tracks_evaluation_instant() {
    let mut store = ContractStore::new();
    store.insert(contract_buyout::Contract::new(
        "Term",
        "2024-01-01",
        "2025-01-01",
        vec![LineItem::new("Seat", 1, 100.0)],
    ));

    let early = store.grand_total(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let mid = store.grand_total(evaluation_instant());
    let late = store.grand_total(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());

    assert_eq!(early, 1200.0);
    assert_eq!(mid, 600.0);
    assert_eq!(late, 0.0);
}

#[test]
fn test_summary_json_uses_camel_case() {
    let mut store = ContractStore::new();
    store.create_empty(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

    let value = serde_json::to_value(store.summary(evaluation_instant())).unwrap();
    assert_eq!(value["grandTotal"], 0.0);
    assert_eq!(value["contracts"][0]["name"], "Contract 1");
    assert_eq!(value["contracts"][0]["metrics"]["remainingMonths"], 0.0);
}
