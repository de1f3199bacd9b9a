//! Name clusters: groups of names that denote one underlying taxon
//!
//! Clusters only ever grow by absorbing each other. A `NameClusterManager`
//! keeps the live partition; `TaxonConcept`s are time-bounded slices of one
//! cluster cut at lump and split boundaries.

pub mod concept;
pub mod manager;

use nomina_bio::Name;
use nomina_core::{ChangeType, NominaResult};
use std::collections::{BTreeMap, BTreeSet};

use crate::project::Project;
use crate::types::{ClusterId, DatasetId};

pub use concept::TaxonConcept;
pub use manager::NameClusterManager;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NameCluster {
    id: ClusterId,
    names: BTreeSet<Name>,
    found_in: BTreeSet<DatasetId>,
    /// Representative binomial per dataset; last write wins
    binomials: BTreeMap<DatasetId, Name>,
}

impl NameCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: Name, dataset: DatasetId) -> Self {
        let mut cluster = Self::new();
        cluster.add_name(name, dataset);
        cluster
    }

    /// A candidate asserting that all `names` are synonyms
    pub fn from_names<I: IntoIterator<Item = Name>>(names: I, dataset: DatasetId) -> Self {
        let mut cluster = Self::new();
        for name in names {
            cluster.add_name(name, dataset);
        }
        cluster
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ClusterId) {
        self.id = id;
    }

    /// Record `name` as seen in `dataset`, together with its binomial
    pub fn add_name(&mut self, name: Name, dataset: DatasetId) {
        let binomial = name.to_binomial();
        self.add_name_with_binomial(name, binomial, dataset);
    }

    /// Like `add_name`, with the binomial reduction supplied by the caller
    /// (normally the project's interned copy)
    pub(crate) fn add_name_with_binomial(
        &mut self,
        name: Name,
        binomial: Option<Name>,
        dataset: DatasetId,
    ) {
        self.found_in.insert(dataset);
        if let Some(binomial) = binomial {
            self.names.insert(binomial.clone());
            self.binomials.insert(dataset, binomial);
        }
        self.names.insert(name);
    }

    /// Take over every name, dataset and binomial of `other`
    pub fn absorb(&mut self, other: NameCluster) {
        self.names.extend(other.names);
        self.found_in.extend(other.found_in);
        self.binomials.extend(other.binomials);
    }

    pub fn names(&self) -> &BTreeSet<Name> {
        &self.names
    }

    pub fn found_in(&self) -> &BTreeSet<DatasetId> {
        &self.found_in
    }

    pub fn representative_binomial(&self, dataset: DatasetId) -> Option<&Name> {
        self.binomials.get(&dataset)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.names.contains(name)
    }

    pub fn contains_any<'a, I: IntoIterator<Item = &'a Name>>(&self, names: I) -> bool {
        names.into_iter().any(|name| self.contains(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Genus-only names mark a cluster that is not a species cluster
    pub fn has_genus_only_name(&self) -> bool {
        self.names.iter().any(Name::is_genus_only)
    }

    /// True when a member carries an infraspecific epithet or any accepted
    /// lump touches a member
    pub fn is_polytypic(&self, project: &Project) -> bool {
        if self.names.iter().any(Name::has_infraspecific) {
            return true;
        }
        project
            .filtered_changes()
            .filter(|change| change.kind() == ChangeType::Lump)
            .any(|change| self.contains_any(change.all_names()))
    }

    /// Segment this cluster's timeline into taxon concepts
    pub fn taxon_concepts(&self, project: &Project) -> NominaResult<Vec<TaxonConcept>> {
        concept::segment(self, project)
    }
}
