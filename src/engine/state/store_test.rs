use std::sync::Arc;

use chrono::Weekday;

use super::store::ReportStore;
use crate::engine::aggregate::AggOp;
use crate::engine::chips::ChipKind;
use crate::engine::errors::StateError;
use crate::engine::filter::{DateRange, FieldFilter, NumberRange};
use crate::engine::schema::ReportSchema;
use crate::shared::datetime::DatePreset;
use crate::test_helpers::factories::record_factory::date;

fn store() -> ReportStore {
    ReportStore::new(Arc::new(ReportSchema::sales_demo()))
}

#[test]
fn named_operations_update_snapshot() {
    let store = store();
    store
        .set_filter("state", Some(FieldFilter::values(["CA", "TX"])))
        .unwrap();
    store.set_group_by(&["state", "category"]).unwrap();
    store.set_aggregation("orders", AggOp::Sum).unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.filters.len(), 1);
    assert_eq!(snap.group_by.len(), 2);
    assert_eq!(snap.aggregations.op("orders"), AggOp::Sum);

    store.set_aggregation("orders", AggOp::None).unwrap();
    assert!(store.snapshot().aggregations.is_empty());
}

#[test]
fn earlier_snapshots_are_immutable() {
    let store = store();
    let before = store.snapshot();
    store.set_group_by(&["state"]).unwrap();
    assert!(before.group_by.is_empty());
    assert_eq!(store.snapshot().group_by.len(), 1);
}

#[test]
fn rejects_updates_that_do_not_fit_schema() {
    let store = store();
    assert_eq!(
        store.set_filter("ghost", Some(FieldFilter::values(["x"]))),
        Err(StateError::UnknownField("ghost".into()))
    );
    assert_eq!(
        store.set_filter("orders", Some(FieldFilter::values(["x"]))),
        Err(StateError::FilterKindMismatch("orders".into()))
    );
    assert_eq!(
        store.set_group_by(&["totalSales"]),
        Err(StateError::NotGroupable("totalSales".into()))
    );
    assert_eq!(
        store.set_group_by(&["state", "state"]),
        Err(StateError::DuplicateGroupField("state".into()))
    );
    assert_eq!(
        store.set_aggregation("category", AggOp::Count),
        Err(StateError::NotMeasure("category".into()))
    );
    assert!(store.snapshot().is_empty());
}

#[test]
fn toggle_group_field_adds_then_removes() {
    let store = store();
    assert_eq!(store.toggle_group_field("category"), Ok(true));
    assert_eq!(store.toggle_group_field("state"), Ok(true));
    assert_eq!(store.toggle_group_field("category"), Ok(false));
    assert_eq!(store.snapshot().group_by.fields(), ["state".to_string()]);
}

#[test]
fn clearing() {
    let store = store();
    store
        .set_filter("orders", Some(FieldFilter::Number(NumberRange::at_least(5.0))))
        .unwrap();
    store.set_group_by(&["state"]).unwrap();

    store.clear_filters();
    let snap = store.snapshot();
    assert!(snap.filters.is_empty());
    assert_eq!(snap.group_by.len(), 1);

    store.clear_all();
    assert!(store.snapshot().is_empty());
}

#[test]
fn chip_removal_through_store() {
    let store = store();
    store
        .set_filter(
            "lastOrderDate",
            Some(FieldFilter::Date(DateRange::from_preset(
                DatePreset::ThisMonth,
                date(2024, 3, 15).and_hms_opt(0, 0, 0).unwrap(),
                Weekday::Sun,
            ))),
        )
        .unwrap();
    store.set_aggregation("totalSales", AggOp::Max).unwrap();

    let chips = store.chips();
    assert_eq!(chips[0].value, "This Month");
    let date_chip = chips.iter().find(|c| c.kind == ChipKind::Filter).unwrap();
    store.remove_chip(date_chip);

    let snap = store.snapshot();
    assert!(snap.filters.is_empty());
    assert_eq!(snap.aggregations.op("totalSales"), AggOp::Max);
}

#[tokio::test]
async fn subscribers_see_each_update() {
    let store = store();
    let mut rx = store.subscribe();

    store.set_group_by(&["state"]).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().group_by.len(), 1);

    store.clear_all();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[test]
fn view_reflects_latest_snapshot() {
    use crate::engine::view::ViewOptions;
    use crate::test_helpers::factories::RecordFactory;

    let store = store();
    let rows = RecordFactory::sales_fixture();
    let now = date(2024, 3, 15).and_hms_opt(12, 0, 0).unwrap();

    assert_eq!(store.view(&rows, &ViewOptions::default(), now).matched_records, 8);
    store
        .set_filter("category", Some(FieldFilter::values(["Home"])))
        .unwrap();
    let view = store.view(&rows, &ViewOptions::default(), now);
    assert_eq!(view.matched_records, 4);
    assert_eq!(view.chips.len(), 1);
}
