pub mod catalog;
pub mod definition;

pub use catalog::{MAX_TAGS, SavedReport, SavedReportCatalog};
pub use definition::{ReportDefinition, ReportGroup, ReportMeta, SaveMode};
