//! Custom assertions for testing
//!
//! Assertions over projects, comparing names by their canonical strings.

use nomina_herald::{ChangeId, DatasetId, Project};
use std::collections::BTreeSet;

/// Assert that the names recognized at `dataset` are exactly `expected`
pub fn assert_recognized(project: &Project, dataset: DatasetId, expected: &[&str]) {
    let recognized: BTreeSet<String> = project
        .recognized_names(dataset)
        .unwrap_or_else(|e| panic!("recognized names of {dataset}: {e}"))
        .iter()
        .map(ToString::to_string)
        .collect();
    let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(recognized, expected, "Recognized names differ at {}", dataset);
}

/// Assert that all `names` share one cluster
pub fn assert_same_cluster(project: &Project, names: &[&str]) {
    let ids: BTreeSet<_> = names
        .iter()
        .map(|canonical| {
            let name = crate::fixtures::name(canonical);
            project
                .clusters()
                .cluster_id(&name)
                .unwrap_or_else(|| panic!("{} is not clustered", canonical))
        })
        .collect();
    assert_eq!(ids.len(), 1, "Names {:?} span {} clusters", names, ids.len());
}

/// Assert that the clusters are pairwise disjoint and every name is covered
pub fn assert_partition(project: &Project) {
    let partition = project.clusters().partition();
    let total: usize = partition.iter().map(BTreeSet::len).sum();
    assert_eq!(
        total,
        project.clusters().name_count(),
        "Clusters overlap or leave registered names out"
    );
}

/// Assert the ids returned by a change query, in order
pub fn assert_change_ids(found: &[&nomina_herald::Change], expected: &[ChangeId]) {
    let found: Vec<ChangeId> = found.iter().map(|change| change.id()).collect();
    assert_eq!(found, expected);
}
