pub mod aggregate;
pub mod ops;
pub mod spec;

pub use aggregate::{AggregateResult, aggregate};
pub use ops::{AggValue, AggregatorImpl};
pub use spec::{AggOp, AggregationSpec};
