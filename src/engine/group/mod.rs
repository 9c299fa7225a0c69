pub mod group_key;
pub mod grouping;
pub mod spec;

pub use group_key::{GroupKey, GroupValue};
pub use grouping::{Group, Grouping, group_by};
pub use spec::GroupSpec;

#[cfg(test)]
mod grouping_test;
