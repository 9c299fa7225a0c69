use crate::test_helpers::factories::record_factory::{CATEGORIES, STATES, date};
use crate::test_helpers::factory::Factory;
use crate::test_helpers::factories::RecordFactory;

#[test]
fn test_record_factory() {
    let record = Factory::record()
        .with_id("r9")
        .with("state", "Ohio")
        .without("orders")
        .create();

    assert_eq!(record.id, "r9");
    assert_eq!(record.text("state"), Some("Ohio"));
    assert_eq!(record.text("category"), Some("Home"));
    assert!(record.get("orders").is_none());
}

#[test]
fn test_create_list_cycles_dimensions() {
    let anchor = date(2024, 3, 15);
    let rows = Factory::record().create_list(12, anchor);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].text("state"), Some(STATES[0]));
    assert_eq!(rows[7].text("category"), Some(CATEGORIES[1]));
    for r in &rows {
        let d = r.date("lastOrderDate").unwrap();
        assert!(d <= anchor && d > anchor - chrono::Duration::days(120));
    }
}

#[test]
fn test_sales_fixture_is_stable() {
    assert_eq!(RecordFactory::sales_fixture(), RecordFactory::sales_fixture());
    assert_eq!(RecordFactory::sales_fixture().len(), 8);
}
