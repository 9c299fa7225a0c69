pub mod builder;
pub mod page;
pub mod sort;

pub use builder::{GroupHeader, GroupedRow, ReportView, ViewOptions, build_view};
pub use page::Page;
pub use sort::{SortOrder, SortSpec};
