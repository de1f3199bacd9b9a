//! Test utilities for the nomina workspace
//!
//! Shared fixtures, assertions and an isolated environment for config files,
//! used by the integration tests of the other crates.
//!
//! # Features
//!
//! - **Fixtures**: the six-dataset synonymy history and smaller chains
//! - **Assertions**: checks over recognized names, clusters and concepts
//! - **Test Environment**: temporary directories holding config files
//! - **Logging**: `tracing` output routed through the test harness or captured

pub mod assertions;
pub mod environment;
pub mod fixtures;
pub mod logging;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::{concept_fixture, name, synonymy_fixture, year, SynonymyFixture};
pub use logging::{capture_logs, init_test_logging};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;
