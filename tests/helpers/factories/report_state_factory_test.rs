use crate::engine::aggregate::AggOp;
use crate::engine::filter::FieldFilter;
use crate::test_helpers::factory::Factory;

#[test]
fn test_report_state_factory() {
    let state = Factory::report_state()
        .with_filter("state", FieldFilter::values(["CA", "TX"]))
        .with_group_by(&["category"])
        .with_agg("orders", AggOp::Sum)
        .with_agg("totalSales", AggOp::None)
        .create();

    assert_eq!(state.filters.len(), 1);
    assert_eq!(state.group_by.fields(), ["category".to_string()]);
    assert_eq!(state.aggregations.op("orders"), AggOp::Sum);
    assert_eq!(state.aggregations.active().count(), 1);
}
