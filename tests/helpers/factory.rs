pub use super::factories::{RecordFactory, ReportStateFactory};

pub struct Factory;

impl Factory {
    pub fn record() -> RecordFactory {
        RecordFactory::new()
    }

    pub fn report_state() -> ReportStateFactory {
        ReportStateFactory::new()
    }
}
