pub mod preset;
pub mod time;

pub use preset::{DatePreset, ResolvedRange, resolve_preset};
pub use time::TimeConfig;
