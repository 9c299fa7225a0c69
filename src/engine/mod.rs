pub mod aggregate;
pub mod chips;
pub mod errors;
pub mod filter;
pub mod group;
pub mod report;
pub mod schema;
pub mod state;
pub mod types;
pub mod view;

pub use errors::*;
