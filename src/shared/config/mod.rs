pub mod global;
pub mod model;

pub use global::CONFIG;

#[cfg(test)]
mod model_test;
