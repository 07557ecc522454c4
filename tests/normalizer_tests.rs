//! Attribute normalization tests for the batch service-creation path.

use serde_json::json;
use wayfinder::models::ServiceStatus;
use wayfinder::services::normalize::{normalize, normalize_batch, ServiceInput};
use wayfinder::Error;

fn input(value: serde_json::Value) -> ServiceInput {
    serde_json::from_value(value).expect("payload should deserialize")
}

#[test]
fn category_references_become_an_ordered_unique_id_list() {
    let record = normalize(
        input(json!({
            "name": "Hot Meals",
            "categories": [{ "id": 5 }, { "id": 7 }, { "id": 5 }],
            "eligibilities": [{ "id": 2 }]
        })),
        10,
    )
    .unwrap();

    assert_eq!(record.category_ids, vec![5, 7]);
    assert_eq!(record.eligibility_ids, vec![2]);
}

#[test]
fn resource_id_is_injected_and_client_value_ignored() {
    // The payload's resource_id is not an accepted field; the path parameter
    // governs ownership.
    let record = normalize(
        input(json!({
            "name": "Shelter Beds",
            "resource_id": 999
        })),
        42,
    )
    .unwrap();

    assert_eq!(record.resource_id, 42);
}

#[test]
fn disallowed_fields_are_silently_dropped() {
    let record = normalize(
        input(json!({
            "name": "Job Coaching",
            "id": 123,
            "status": "pending",
            "certified": true,
            "unexpected": "value"
        })),
        1,
    )
    .unwrap();

    // The batch path always initializes services as approved.
    assert_eq!(record.status, ServiceStatus::Approved);
    assert_eq!(record.name, "Job Coaching");
}

#[test]
fn nested_shapes_are_preserved_in_order() {
    let record = normalize(
        input(json!({
            "name": "Legal Aid",
            "schedule": {
                "schedule_days": [
                    { "day": "Monday", "opens_at": 900, "closes_at": 1700 },
                    { "day": "Tuesday" }
                ]
            },
            "notes": [{ "note": "walk-ins welcome" }, { "note": "bring ID" }],
            "addresses": [
                { "id": 7 },
                { "address_1": "123 Main St", "city": "Springfield",
                  "state_province": "CA", "postal_code": "94100" }
            ]
        })),
        3,
    )
    .unwrap();

    let schedule = record.schedule.unwrap();
    assert_eq!(schedule.schedule_days.len(), 2);
    assert_eq!(schedule.schedule_days[0].day.as_deref(), Some("Monday"));
    assert_eq!(schedule.schedule_days[0].opens_at, Some(900));

    assert_eq!(record.notes, vec!["walk-ins welcome", "bring ID"]);
    assert_eq!(record.addresses.len(), 2);
    assert_eq!(record.addresses[0].id, Some(7));
    assert_eq!(record.addresses[1].address_1.as_deref(), Some("123 Main St"));
}

#[test]
fn new_address_needs_only_a_street_line() {
    // city/state_province/postal_code are optional on intake; a bare street
    // line is a complete new address.
    let record = normalize(
        input(json!({
            "name": "Mobile Pantry",
            "addresses": [{ "address_1": "500 Pine St" }]
        })),
        2,
    )
    .unwrap();

    let address = &record.addresses[0];
    assert_eq!(address.address_1.as_deref(), Some("500 Pine St"));
    assert!(address.city.is_none());
    assert!(address.state_province.is_none());
    assert!(address.postal_code.is_none());
}

#[test]
fn missing_name_is_a_validation_error() {
    let errors = normalize(input(json!({ "fee": "none" })), 1).unwrap_err();
    assert!(errors.iter().any(|e| e.field == "name"));

    let errors = normalize(input(json!({ "name": "   " })), 1).unwrap_err();
    assert!(errors.iter().any(|e| e.field == "name"));
}

#[test]
fn batch_reports_every_invalid_record_together() {
    let inputs = vec![
        input(json!({ "name": "Valid One" })),
        input(json!({ "fee": "none" })),
        input(json!({ "name": "Valid Two" })),
        input(json!({ "addresses": [{}] })),
    ];

    let err = normalize_batch(inputs, 1).unwrap_err();
    match err {
        Error::Validation(records) => {
            let indexes: Vec<usize> = records.iter().map(|r| r.index).collect();
            assert_eq!(indexes, vec![1, 3]);
            // Record 3 is missing both a name and a usable address.
            assert!(records[1].errors.len() >= 2);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn valid_batch_normalizes_every_record() {
    let inputs = vec![
        input(json!({ "name": "A" })),
        input(json!({ "name": "B", "categories": [{ "id": 1 }] })),
    ];

    let records = normalize_batch(inputs, 5).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.resource_id == 5));
    assert!(records.iter().all(|r| r.status == ServiceStatus::Approved));
}
