use std::collections::BTreeMap;

use tracing::debug;

use crate::engine::types::Record;

use super::group_key::GroupKey;
use super::spec::GroupSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub rows: Vec<Record>,
}

impl Group {
    pub fn label(&self) -> String {
        self.key.label()
    }
}

/// Result of grouping: the untouched input when no grouping is active, or
/// groups in ascending key order.
#[derive(Debug, Clone, PartialEq)]
pub enum Grouping {
    Passthrough(Vec<Record>),
    Groups(Vec<Group>),
}

impl Grouping {
    pub fn row_count(&self) -> usize {
        match self {
            Grouping::Passthrough(rows) => rows.len(),
            Grouping::Groups(groups) => groups.iter().map(|g| g.rows.len()).sum(),
        }
    }
}

/// Partitions `records` by the composite key of `spec`'s fields. Within a
/// group, leaves keep their input order.
pub fn group_by(records: &[Record], spec: &GroupSpec) -> Grouping {
    if spec.is_empty() {
        return Grouping::Passthrough(records.to_vec());
    }

    let mut buckets: BTreeMap<GroupKey, Vec<Record>> = BTreeMap::new();
    for record in records {
        let key = GroupKey::from_record(record, spec.fields());
        buckets.entry(key).or_default().push(record.clone());
    }

    debug!(
        target: "report_engine::group",
        "Grouped {} records into {} groups by {:?}",
        records.len(),
        buckets.len(),
        spec.fields()
    );

    Grouping::Groups(
        buckets
            .into_iter()
            .map(|(key, rows)| Group { key, rows })
            .collect(),
    )
}
