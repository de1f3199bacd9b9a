/// Change filter applied to every recognition, clustering and reversion query
///
/// Drops:
/// - changes of an excluded type ("error" by default)
/// - changes flagged with a truthy property such as `ignore = yes`
/// - changes from datasets outside the configured year window
use chrono::Datelike;
use nomina_core::config::FilterConfig;
use nomina_core::ChangeType;
use std::collections::BTreeSet;

use crate::change::Change;
use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeFilter {
    exclude_types: BTreeSet<ChangeType>,
    exclude_flags: Vec<String>,
    min_year: Option<i32>,
    max_year: Option<i32>,
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl ChangeFilter {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            exclude_types: config.exclude_types.iter().copied().collect(),
            exclude_flags: config.exclude_flags.clone(),
            min_year: config.min_year,
            max_year: config.max_year,
        }
    }

    /// Accept every change, including those typed as errors
    pub fn allow_all() -> Self {
        Self {
            exclude_types: BTreeSet::new(),
            exclude_flags: Vec::new(),
            min_year: None,
            max_year: None,
        }
    }

    pub fn excluding_type(mut self, kind: ChangeType) -> Self {
        self.exclude_types.insert(kind);
        self
    }

    pub fn excluding_flag(mut self, flag: impl Into<String>) -> Self {
        self.exclude_flags.push(flag.into());
        self
    }

    pub fn within_years(mut self, min_year: Option<i32>, max_year: Option<i32>) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    /// True when `change` (owned by `dataset`) takes part in queries
    pub fn accepts(&self, change: &Change, dataset: &Dataset) -> bool {
        if self.exclude_types.contains(&change.kind()) {
            return false;
        }

        if self
            .exclude_flags
            .iter()
            .any(|flag| change.property(flag).is_some_and(is_truthy))
        {
            return false;
        }

        let year = dataset.date().year();
        if self.min_year.is_some_and(|min| year < min) || self.max_year.is_some_and(|max| year > max)
        {
            return false;
        }

        true
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}
