pub mod error;
pub mod extractor;
pub mod models;
pub mod prelude;

/// Version of this crate, reported next to the extractor version in logs
pub static LIB_VERSION: &str = env!("CARGO_PKG_VERSION");
