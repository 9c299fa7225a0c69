pub mod persist;
pub mod report_state;
pub mod store;

pub use persist::StateFile;
pub use report_state::ReportState;
pub use store::ReportStore;

#[cfg(test)]
mod store_test;
