pub mod errors;
pub mod report_schema;
pub mod types;

pub use errors::SchemaError;
pub use report_schema::ReportSchema;
pub use types::{FieldDef, FieldKind};
