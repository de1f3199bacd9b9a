/// Change and dataset tags used throughout nomina
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::NominaError;

/// Kind of taxonomic event a change records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Addition,
    Deletion,
    Rename,
    Lump,
    Split,
    Complex,
    Error,
}

impl ChangeType {
    pub const ALL: [ChangeType; 7] = [
        ChangeType::Addition,
        ChangeType::Deletion,
        ChangeType::Rename,
        ChangeType::Lump,
        ChangeType::Split,
        ChangeType::Complex,
        ChangeType::Error,
    ];

    /// The change type that undoes this one
    pub fn invert(self) -> Self {
        match self {
            Self::Addition => Self::Deletion,
            Self::Deletion => Self::Addition,
            Self::Lump => Self::Split,
            Self::Split => Self::Lump,
            Self::Rename => Self::Rename,
            Self::Complex => Self::Complex,
            Self::Error => Self::Error,
        }
    }

    /// Lumps and splits delimit taxon concepts
    pub fn is_lump_or_split(self) -> bool {
        matches!(self, Self::Lump | Self::Split)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Deletion => "deletion",
            Self::Rename => "rename",
            Self::Lump => "lump",
            Self::Split => "split",
            Self::Complex => "complex",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = NominaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| NominaError::InvalidInput(format!("Unknown change type: {}", s)))
    }
}

/// Whether a dataset lists every recognized name or only records changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Rows enumerate the complete set of recognized names
    Checklist,
    /// Rows mention names; only explicit changes alter recognition
    Revision,
}

impl DatasetKind {
    pub fn is_checklist(self) -> bool {
        matches!(self, Self::Checklist)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checklist => write!(f, "checklist"),
            Self::Revision => write!(f, "revision"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ChangeType::Addition, ChangeType::Deletion)]
    #[case(ChangeType::Lump, ChangeType::Split)]
    #[case(ChangeType::Rename, ChangeType::Rename)]
    #[case(ChangeType::Complex, ChangeType::Complex)]
    #[case(ChangeType::Error, ChangeType::Error)]
    fn test_invert_is_symmetric(#[case] kind: ChangeType, #[case] inverse: ChangeType) {
        assert_eq!(kind.invert(), inverse);
        assert_eq!(inverse.invert(), kind);
    }

    #[test]
    fn test_parse_change_type() {
        assert_eq!("lump".parse::<ChangeType>().unwrap(), ChangeType::Lump);
        assert_eq!(" SPLIT ".parse::<ChangeType>().unwrap(), ChangeType::Split);
        assert!("merge".parse::<ChangeType>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for kind in ChangeType::ALL {
            assert_eq!(kind.to_string().parse::<ChangeType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_lump_or_split() {
        assert!(ChangeType::Lump.is_lump_or_split());
        assert!(ChangeType::Split.is_lump_or_split());
        assert!(!ChangeType::Rename.is_lump_or_split());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ChangeType::Addition).unwrap();
        assert_eq!(json, "\"addition\"");
        let kind: DatasetKind = serde_json::from_str("\"checklist\"").unwrap();
        assert!(kind.is_checklist());
    }
}
