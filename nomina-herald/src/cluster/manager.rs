/// Registry of the live cluster partition
///
/// Every registered name maps to exactly one cluster and clusters never share
/// a name. Registering a candidate that overlaps existing clusters merges all
/// of them into one; the merged cluster is assembled before any bookkeeping
/// changes, so a merge is never observable half-done.
use nomina_bio::Name;
use nomina_core::{NominaError, NominaResult};
use std::collections::{BTreeSet, HashMap};

use super::NameCluster;
use crate::types::ClusterId;

#[derive(Debug, Clone, Default)]
pub struct NameClusterManager {
    clusters: HashMap<ClusterId, NameCluster>,
    by_name: HashMap<Name, ClusterId>,
    last_id: u64,
}

impl NameClusterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `candidate`, merging it with every cluster it overlaps.
    /// Returns the id of the cluster that now holds the candidate's names,
    /// or `ClusterId::PENDING` for an empty candidate, which is not registered.
    pub fn add_cluster(&mut self, candidate: NameCluster) -> ClusterId {
        if candidate.is_empty() {
            return ClusterId::PENDING;
        }
        let overlapping: BTreeSet<ClusterId> = candidate
            .names()
            .iter()
            .filter_map(|name| self.by_name.get(name).copied())
            .collect();

        if overlapping.is_empty() {
            return self.register(candidate);
        }
        if overlapping.len() == 1 {
            if let Some(&id) = overlapping.first() {
                return self.absorb_into(id, candidate);
            }
        }
        self.merge(overlapping, candidate)
    }

    /// Single overlap: grow the existing cluster and keep its id
    fn absorb_into(&mut self, id: ClusterId, candidate: NameCluster) -> ClusterId {
        let Some(existing) = self.clusters.get_mut(&id) else {
            return self.register(candidate);
        };
        for name in candidate.names() {
            self.by_name.entry(name.clone()).or_insert(id);
        }
        existing.absorb(candidate);
        id
    }

    fn register(&mut self, mut cluster: NameCluster) -> ClusterId {
        let id = self.next_id();
        cluster.set_id(id);
        for name in cluster.names() {
            self.by_name.insert(name.clone(), id);
        }
        self.clusters.insert(id, cluster);
        id
    }

    fn merge(&mut self, absorbed: BTreeSet<ClusterId>, candidate: NameCluster) -> ClusterId {
        let mut merged = NameCluster::new();
        for id in &absorbed {
            if let Some(existing) = self.clusters.get(id) {
                merged.absorb(existing.clone());
            }
        }
        merged.absorb(candidate);

        tracing::debug!(
            absorbed = absorbed.len(),
            names = merged.len(),
            "Merging overlapping name clusters"
        );

        for id in &absorbed {
            self.clusters.remove(id);
        }
        self.register(merged)
    }

    fn next_id(&mut self) -> ClusterId {
        self.last_id += 1;
        ClusterId(self.last_id)
    }

    pub fn cluster(&self, name: &Name) -> Option<&NameCluster> {
        self.by_name.get(name).and_then(|id| self.clusters.get(id))
    }

    pub fn cluster_id(&self, name: &Name) -> Option<ClusterId> {
        self.by_name.get(name).copied()
    }

    pub fn cluster_by_id(&self, id: ClusterId) -> Option<&NameCluster> {
        self.clusters.get(&id)
    }

    /// Lookups in input order; `None` marks a name nobody registered
    pub fn clusters<'a, I>(&self, names: I) -> Vec<Option<&NameCluster>>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        names.into_iter().map(|name| self.cluster(name)).collect()
    }

    /// Distinct clusters holding `names`; an unregistered name is a broken
    /// invariant and is reported as an error
    pub fn cluster_ids<'a, I>(&self, names: I) -> NominaResult<BTreeSet<ClusterId>>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        names
            .into_iter()
            .map(|name| {
                self.cluster_id(name)
                    .ok_or_else(|| NominaError::UnregisteredName(name.to_string()))
            })
            .collect()
    }

    /// Clusters without any genus-only name, ordered by first member
    pub fn species_clusters(&self) -> Vec<&NameCluster> {
        self.iter()
            .filter(|cluster| !cluster.has_genus_only_name())
            .collect()
    }

    /// All clusters, ordered by their alphabetically first member
    pub fn iter(&self) -> impl Iterator<Item = &NameCluster> {
        let mut clusters: Vec<&NameCluster> = self.clusters.values().collect();
        clusters.sort_by(|a, b| a.names().iter().next().cmp(&b.names().iter().next()));
        clusters.into_iter()
    }

    /// The partition as plain name sets, independent of cluster ids
    pub fn partition(&self) -> BTreeSet<BTreeSet<Name>> {
        self.clusters
            .values()
            .map(|cluster| cluster.names().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}
