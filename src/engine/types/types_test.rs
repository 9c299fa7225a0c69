use super::{FieldValue, Record, format_number};
use crate::engine::errors::RecordError;
use crate::engine::schema::ReportSchema;
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn decodes_sales_row() {
    let schema = ReportSchema::sales_demo();
    let row = json!({
        "id": 7,
        "state": "Texas",
        "category": "Home",
        "totalSales": 1250.5,
        "orders": "42",
        "lastOrderDate": "2024-03-01",
        "ignored": true
    });

    let record = Record::from_json(&schema, &row).unwrap();
    assert_eq!(record.id, "7");
    assert_eq!(record.text("state"), Some("Texas"));
    assert_eq!(record.number("totalSales"), Some(1250.5));
    assert_eq!(record.number("orders"), Some(42.0));
    assert_eq!(
        record.date("lastOrderDate"),
        NaiveDate::from_ymd_opt(2024, 3, 1)
    );
    assert!(record.get("ignored").is_none());
}

#[test]
fn rfc3339_dates_keep_their_calendar_day() {
    let schema = ReportSchema::sales_demo();
    let row = json!({ "lastOrderDate": "2024-03-01T18:30:00Z" });
    let record = Record::from_json(&schema, &row).unwrap();
    assert_eq!(
        record.date("lastOrderDate"),
        NaiveDate::from_ymd_opt(2024, 3, 1)
    );
}

#[test]
fn null_leaves_field_missing() {
    let schema = ReportSchema::sales_demo();
    let record = Record::from_json(&schema, &json!({ "id": "a", "state": null })).unwrap();
    assert!(record.get("state").is_none());
}

#[test]
fn rejects_bad_measure() {
    let schema = ReportSchema::sales_demo();
    let err = Record::from_json(&schema, &json!({ "orders": "lots" })).unwrap_err();
    match err {
        RecordError::InvalidField { field, .. } => assert_eq!(field, "orders"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn list_numbers_rows_without_id() {
    let schema = ReportSchema::sales_demo();
    let rows = json!([{ "state": "Texas" }, { "id": "x", "state": "Florida" }]);
    let records = Record::list_from_json(&schema, &rows).unwrap();
    assert_eq!(records[0].id, "1");
    assert_eq!(records[1].id, "x");

    assert!(matches!(
        Record::list_from_json(&schema, &json!({})),
        Err(RecordError::NotAnArray)
    ));
}

#[test]
fn display_and_json_of_values() {
    assert_eq!(format_number(60.0), "60");
    assert_eq!(format_number(20.5), "20.5");
    assert_eq!(FieldValue::from(3_i64).to_json(), json!(3));
    assert_eq!(
        FieldValue::Date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()).to_string(),
        "2025-05-01"
    );

    let record = Record::new("r1").with("state", "Ohio").with("orders", 5_i64);
    assert_eq!(record.to_json(), json!({ "id": "r1", "state": "Ohio", "orders": 5 }));
}
