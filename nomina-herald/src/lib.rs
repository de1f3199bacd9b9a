//! Temporal synonymy resolution across a chain of checklists and revisions
//!
//! A [`Project`] holds datasets in chronological order. From their explicit
//! and implicit changes it derives the names recognized at each point in
//! time, groups names into [`NameCluster`]s, cuts clusters into
//! [`TaxonConcept`]s and finds lumps and splits that reverse one another.

pub mod change;
pub mod cluster;
pub mod dataset;
pub mod discrepancy;
pub mod filter;
pub mod project;
pub mod report;
pub mod reversion;
pub mod types;

pub use change::{Change, ChangeDraft};
pub use cluster::{NameCluster, NameClusterManager, TaxonConcept};
pub use dataset::{Dataset, DatasetDraft, Recognition};
pub use discrepancy::ChecklistDiscrepancy;
pub use filter::ChangeFilter;
pub use project::Project;
pub use report::{ClusterSummary, ConceptSummary, DatasetSummary};
pub use types::{ChangeId, ChangeOrigin, ClusterId, DatasetId};
