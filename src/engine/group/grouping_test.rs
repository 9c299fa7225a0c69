use std::collections::HashSet;

use super::group_key::GroupValue;
use super::grouping::{Grouping, group_by};
use super::spec::GroupSpec;
use crate::test_helpers::factories::RecordFactory;
use crate::test_helpers::factories::record_factory::date;
use crate::test_helpers::factory::Factory;

#[test]
fn empty_spec_passes_input_through() {
    let rows = RecordFactory::sales_fixture();
    assert_eq!(
        group_by(&rows, &GroupSpec::default()),
        Grouping::Passthrough(rows.clone())
    );
}

#[test]
fn groups_in_key_order_with_leaves_in_input_order() {
    let rows = RecordFactory::sales_fixture();
    let Grouping::Groups(groups) = group_by(&rows, &GroupSpec::new(["state", "category"])) else {
        panic!("expected groups");
    };

    let labels: Vec<String> = groups.iter().map(|g| g.label()).collect();
    assert_eq!(
        labels,
        vec![
            "state: California · category: Apparel",
            "state: California · category: Home",
            "state: Florida · category: Beauty",
            "state: Florida · category: Home",
            "state: Texas · category: Apparel",
            "state: Texas · category: Home",
        ]
    );

    let texas_home = &groups[5];
    let ids: Vec<&str> = texas_home.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "6"]);
}

#[test]
fn grouping_partitions_the_input() {
    let rows = Factory::record().create_list(150, date(2024, 3, 15));
    let grouping = group_by(&rows, &GroupSpec::new(["category", "state"]));
    assert_eq!(grouping.row_count(), rows.len());

    let Grouping::Groups(groups) = grouping else {
        panic!("expected groups");
    };
    let keys: HashSet<String> = groups.iter().map(|g| g.label()).collect();
    assert_eq!(keys.len(), groups.len());

    let mut seen: Vec<String> = groups
        .iter()
        .flat_map(|g| g.rows.iter().map(|r| r.id.clone()))
        .collect();
    seen.sort();
    let mut expected: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);

    for g in &groups {
        assert!(!g.rows.is_empty());
        for r in &g.rows {
            assert_eq!(
                g.key.get("category"),
                Some(&GroupValue::Text(r.text("category").unwrap().to_string()))
            );
        }
    }
}

#[test]
fn records_without_the_field_share_a_group() {
    let rows = vec![
        Factory::record().with_id("1").without("category").create(),
        Factory::record().with_id("2").with("category", "Home").create(),
        Factory::record().with_id("3").without("category").create(),
    ];
    let Grouping::Groups(groups) = group_by(&rows, &GroupSpec::new(["category"])) else {
        panic!("expected groups");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key.get("category"), Some(&GroupValue::Missing));
    assert_eq!(groups[0].rows.len(), 2);
    assert_eq!(groups[0].label(), "category: (none)");
}

#[test]
fn groups_by_date_field() {
    let rows = vec![
        Factory::record().with_id("1").with("lastOrderDate", date(2024, 3, 2)).create(),
        Factory::record().with_id("2").with("lastOrderDate", date(2024, 3, 1)).create(),
    ];
    let Grouping::Groups(groups) = group_by(&rows, &GroupSpec::new(["lastOrderDate"])) else {
        panic!("expected groups");
    };
    assert_eq!(groups[0].label(), "lastOrderDate: 2024-03-01");
}
