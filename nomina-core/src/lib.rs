//! Core utilities and types shared across all nomina crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, Config};
pub use error::{NominaError, NominaResult};
pub use logging::init_logging;

// Re-export core types
pub use types::{ChangeType, DatasetKind};

/// Version information for the nomina project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
