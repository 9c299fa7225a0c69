pub mod record_factory;
pub mod report_state_factory;

pub use record_factory::RecordFactory;
pub use report_state_factory::ReportStateFactory;

#[cfg(test)]
mod record_factory_test;
#[cfg(test)]
mod report_state_factory_test;
