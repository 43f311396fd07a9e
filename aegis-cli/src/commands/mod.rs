//! Headless command implementations for the aegis CLI

pub mod ask;
pub mod modules;
pub mod search;

// Re-export dispatcher functions for flat access from main.rs
pub use ask::run_ask;
pub use modules::run_modules;
pub use search::run_search;
