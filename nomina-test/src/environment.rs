//! Isolated test environment with automatic cleanup
//!
//! Config files written here disappear when the environment is dropped.

use anyhow::{Context, Result};
use nomina_core::{save_config, Config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("nomina-test")
            .context("Failed to create temporary directory")?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.root().join(file)
    }

    /// Save `config` as `nomina.toml` and return its path
    pub fn write_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.path("nomina.toml");
        save_config(&path, config).context("Failed to save test config")?;
        Ok(path)
    }

    /// Write raw text, for configs that should fail to parse
    pub fn write_file(&self, file: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(file);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
