// Netpulse Library - Public API

// Re-export error types
pub mod error;
pub use error::{NetpulseError, Result};

// Module declarations
pub mod core;
pub mod probes;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::TrackerConfig;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
