use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use indoc::indoc;
use report_engine::engine::aggregate::{AggOp, AggValue};
use report_engine::engine::chips::ChipKind;
use report_engine::engine::filter::{DateRange, FieldFilter, NumberRange};
use report_engine::engine::schema::ReportSchema;
use report_engine::engine::state::{ReportStore, StateFile};
use report_engine::engine::types::Record;
use report_engine::engine::view::{GroupedRow, SortSpec, ViewOptions};
use report_engine::shared::datetime::DatePreset;
use tempfile::tempdir;

const RECORDS: &str = indoc! {r#"
    [
        {"id": "a", "state": "Texas", "category": "Home", "totalSales": 1200, "orders": 12, "lastOrderDate": "2024-03-01"},
        {"id": "b", "state": "California", "category": "Apparel", "totalSales": 800, "orders": 8, "lastOrderDate": "2024-03-10"},
        {"id": "c", "state": "Texas", "category": "Apparel", "totalSales": 450, "orders": 5, "lastOrderDate": "2024-02-20"},
        {"id": "d", "state": "Florida", "category": "Home", "totalSales": 3000, "orders": 30, "lastOrderDate": "2024-01-05"},
        {"id": "e", "state": "California", "category": "Home", "totalSales": "150", "orders": 2, "lastOrderDate": "2024-03-15T18:20:00Z"},
        {"id": "f", "state": "Texas", "category": "Home", "totalSales": 600, "orders": null, "lastOrderDate": "2024-03-14"}
    ]
"#};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap()
}

fn records(schema: &ReportSchema) -> Vec<Record> {
    let json: serde_json::Value = serde_json::from_str(RECORDS).unwrap();
    Record::list_from_json(schema, &json).unwrap()
}

#[test]
fn grouped_report_with_date_preset() {
    let schema = Arc::new(ReportSchema::sales_demo());
    let rows = records(&schema);
    let store = ReportStore::new(Arc::clone(&schema));

    store
        .set_filter(
            "lastOrderDate",
            Some(FieldFilter::Date(DateRange::from_preset(
                DatePreset::Past30,
                now(),
                Weekday::Sun,
            ))),
        )
        .unwrap();
    store.set_group_by(&["category"]).unwrap();
    store.set_aggregation("orders", AggOp::Avg).unwrap();
    store.set_aggregation("totalSales", AggOp::Sum).unwrap();

    let view = store.view(&rows, &ViewOptions::default(), now());
    assert_eq!(view.matched_records, 5);
    assert!(view.totals.is_none());

    let GroupedRow::Header(home) = &view.rows[1] else {
        panic!("expected a group header");
    };
    assert_eq!(home.label, "category: Home");
    let ids: Vec<&str> = home.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "e", "f"]);
    assert_eq!(
        home.aggregates.get("orders"),
        Some(&AggValue::Number(14.0 / 3.0))
    );
    assert_eq!(home.aggregates.get("totalSales"), Some(&AggValue::Number(1950.0)));

    let kinds: Vec<ChipKind> = view.chips.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChipKind::Filter, ChipKind::Group, ChipKind::Agg, ChipKind::Agg]
    );
    assert_eq!(view.chips[0].value, "Past 30 Days");
}

#[test]
fn ungrouped_totals_and_sorting() {
    let schema = Arc::new(ReportSchema::sales_demo());
    let rows = records(&schema);
    let store = ReportStore::new(Arc::clone(&schema));

    store
        .set_filter("totalSales", Some(FieldFilter::Number(NumberRange::at_most(1000.0))))
        .unwrap();
    store.set_aggregation("orders", AggOp::Max).unwrap();

    let options = ViewOptions::default().with_sort(Some(SortSpec::descend("orders")));
    let view = store.view(&rows, &options, now());
    let ids: Vec<&str> = view
        .rows
        .iter()
        .filter_map(|r| match r {
            GroupedRow::Leaf(rec) => Some(rec.id.as_str()),
            GroupedRow::Header(_) => None,
        })
        .collect();
    assert_eq!(ids, vec!["b", "c", "e", "f"]);
    assert_eq!(
        view.totals.and_then(|t| t.get("orders").cloned()),
        Some(AggValue::Number(8.0))
    );
}

#[test]
fn state_survives_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report_state.json");
    let schema = Arc::new(ReportSchema::sales_demo());

    let store = ReportStore::new(Arc::clone(&schema));
    store
        .set_filter("state", Some(FieldFilter::values(["Texas"])))
        .unwrap();
    store.toggle_group_field("category").unwrap();
    StateFile::new(&path).save(&store.snapshot()).unwrap();

    let restored = ReportStore::with_state(Arc::clone(&schema), StateFile::new(&path).load(&schema));
    assert_eq!(*restored.snapshot(), *store.snapshot());

    let chip = restored.chips().into_iter().find(|c| c.kind == ChipKind::Filter).unwrap();
    restored.remove_chip(&chip);
    assert!(restored.snapshot().filters.is_empty());
    assert_eq!(restored.snapshot().group_by.len(), 1);
}
