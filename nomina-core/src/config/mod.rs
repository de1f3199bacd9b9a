//! Configuration types for nomina

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::ChangeType;
use crate::NominaError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which changes the project ignores when propagating names and clustering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_exclude_types")]
    pub exclude_types: Vec<ChangeType>,
    /// Property keys that drop a change when set to a truthy value
    #[serde(default = "default_exclude_flags")]
    pub exclude_flags: Vec<String>,
    #[serde(default)]
    pub min_year: Option<i32>,
    #[serde(default)]
    pub max_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Cross-check checklist recognition against the checklist's rows
    #[serde(default = "default_check_checklists")]
    pub check_checklists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

// Default value functions
fn default_exclude_types() -> Vec<ChangeType> { vec![ChangeType::Error] }
fn default_exclude_flags() -> Vec<String> {
    vec!["ignore".to_string(), "erroneous".to_string(), "out_of_scope".to_string()]
}
fn default_check_checklists() -> bool { true }
fn default_level() -> String { "warn".to_string() }
fn default_json() -> bool { false }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_types: default_exclude_types(),
            exclude_flags: default_exclude_flags(),
            min_year: None,
            max_year: None,
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            check_checklists: default_check_checklists(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: default_json(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, NominaError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    if let (Some(min), Some(max)) = (config.filter.min_year, config.filter.max_year) {
        if min > max {
            return Err(NominaError::Configuration(format!(
                "filter.min_year ({}) is after filter.max_year ({})",
                min, max
            )));
        }
    }
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), NominaError> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.filter.exclude_types, vec![ChangeType::Error]);
        assert_eq!(
            config.filter.exclude_flags,
            vec!["ignore", "erroneous", "out_of_scope"]
        );
        assert_eq!(config.filter.min_year, None);
        assert_eq!(config.filter.max_year, None);
        assert!(config.recognition.check_checklists);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_valid_config() {
        let toml_content = r#"
[filter]
exclude_types = ["error", "complex"]
exclude_flags = ["skip"]
min_year = 1900
max_year = 1999

[recognition]
check_checklists = false

[logging]
level = "debug"
json = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(
            config.filter.exclude_types,
            vec![ChangeType::Error, ChangeType::Complex]
        );
        assert_eq!(config.filter.exclude_flags, vec!["skip"]);
        assert_eq!(config.filter.min_year, Some(1900));
        assert_eq!(config.filter.max_year, Some(1999));
        assert!(!config.recognition.check_checklists);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[filter]
min_year = 1850
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.filter.min_year, Some(1850));
        assert_eq!(config.filter.exclude_types, vec![ChangeType::Error]);
        assert!(config.recognition.check_checklists);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            NominaError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_unknown_change_type() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[filter]\nexclude_types = [\"merge\"]\n").unwrap();

        assert!(matches!(
            load_config(temp_file.path()),
            Err(NominaError::Configuration(_))
        ));
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[filter]\nmin_year = 2000\nmax_year = 1900\n").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            NominaError::Configuration(msg) => assert!(msg.contains("min_year")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/nomina.toml").unwrap_err() {
            NominaError::Io(_) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.filter.exclude_flags.push("disputed".to_string());
        config.filter.max_year = Some(1960);
        config.logging.level = "trace".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config.filter.exclude_flags, loaded.filter.exclude_flags);
        assert_eq!(config.filter.max_year, loaded.filter.max_year);
        assert_eq!(config.logging.level, loaded.logging.level);
    }
}
