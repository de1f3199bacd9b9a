//! Identifiers shared across the herald modules

use serde::Serialize;
use std::fmt;

/// Position of a dataset in its project's chronological chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DatasetId(pub usize);

impl DatasetId {
    pub fn index(self) -> usize {
        self.0
    }

    /// The dataset immediately before this one, if any
    pub fn previous(self) -> Option<DatasetId> {
        self.0.checked_sub(1).map(DatasetId)
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dataset#{}", self.0)
    }
}

/// Project-unique change identifier, assigned when the change is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChangeId(pub u64);

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "change#{}", self.0)
    }
}

/// Identifier of a live cluster inside one `NameClusterManager`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClusterId(pub u64);

impl ClusterId {
    /// Carried by candidate clusters until a manager registers them
    pub const PENDING: Self = Self(0);

    pub fn is_pending(self) -> bool {
        self == Self::PENDING
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster#{}", self.0)
    }
}

/// Whether a change was asserted by the dataset's author or inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    Explicit,
    Implicit,
}
