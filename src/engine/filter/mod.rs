pub mod apply;
pub mod predicate;
pub mod spec;

pub use apply::{apply_filters, matches_all};
pub use predicate::{in_date_range, in_numeric_range, matches_categorical};
pub use spec::{DateRange, FieldFilter, FilterSpec, NumberRange};
