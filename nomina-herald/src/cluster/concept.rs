/// Taxon concepts: slices of one cluster's history between lumps and splits
use nomina_bio::Name;
use nomina_core::{ChangeType, NominaResult};
use std::collections::BTreeSet;

use super::NameCluster;
use crate::change::Change;
use crate::project::Project;
use crate::types::{ClusterId, DatasetId};

#[derive(Debug, Clone, PartialEq)]
pub struct TaxonConcept {
    cluster: ClusterId,
    names: BTreeSet<Name>,
    datasets: BTreeSet<DatasetId>,
    starts_with: Option<Vec<Change>>,
    ends_with: Option<Vec<Change>>,
}

impl TaxonConcept {
    pub(crate) fn new(cluster: ClusterId, starts_with: Vec<Change>) -> Self {
        Self {
            cluster,
            names: BTreeSet::new(),
            datasets: BTreeSet::new(),
            starts_with: Some(starts_with),
            ends_with: None,
        }
    }

    /// The cluster this concept was cut from
    pub fn cluster(&self) -> ClusterId {
        self.cluster
    }

    pub fn names(&self) -> &BTreeSet<Name> {
        &self.names
    }

    pub fn datasets(&self) -> &BTreeSet<DatasetId> {
        &self.datasets
    }

    pub fn first_dataset(&self) -> Option<DatasetId> {
        self.datasets.first().copied()
    }

    pub fn last_dataset(&self) -> Option<DatasetId> {
        self.datasets.last().copied()
    }

    /// Changes that opened this concept
    pub fn starts_with(&self) -> Option<&[Change]> {
        self.starts_with.as_deref()
    }

    /// Lumps or splits that closed this concept
    pub fn ends_with(&self) -> Option<&[Change]> {
        self.ends_with.as_deref()
    }

    pub(crate) fn add_name(&mut self, name: Name, dataset: DatasetId) {
        self.names.insert(name);
        self.datasets.insert(dataset);
    }

    /// Still current: never closed, and some member is recognized in the
    /// project's latest dataset
    pub fn is_ongoing(&self, project: &Project) -> NominaResult<bool> {
        if self.ends_with.is_some() {
            return Ok(false);
        }
        let Some(latest) = project.last_dataset_id() else {
            return Ok(false);
        };
        let recognized = project.recognized_names(latest)?;
        Ok(self.names.iter().any(|name| recognized.contains(name)))
    }

    /// Infraspecific members, or an accepted lump inside the concept's
    /// datasets touching its names
    pub fn is_polytypic(&self, project: &Project) -> NominaResult<bool> {
        if self.names.iter().any(Name::has_infraspecific) {
            return Ok(true);
        }
        for &dataset_id in &self.datasets {
            let dataset = project.dataset(dataset_id)?;
            let lumped = project
                .filtered_changes_in(dataset)
                .filter(|change| change.kind() == ChangeType::Lump)
                .any(|change| change.all_names().any(|name| self.names.contains(name)));
            if lumped {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Walk the cluster's datasets in order. A concept opens on the first
/// accepted change that brings a member name in; every lump or split touching
/// the cluster after that closes the current concept and opens the next one
/// with the same changes as its boundary. Datasets before the first
/// introducing change produce no concept.
pub(crate) fn segment(cluster: &NameCluster, project: &Project) -> NominaResult<Vec<TaxonConcept>> {
    let mut concepts = Vec::new();
    let mut current: Option<TaxonConcept> = None;

    for &dataset_id in cluster.found_in() {
        let dataset = project.dataset(dataset_id)?;
        let touching: Vec<&Change> = project
            .filtered_changes_in(dataset)
            .filter(|change| cluster.contains_any(change.all_names()))
            .collect();

        let members: Vec<Name> = project
            .referenced_names(dataset_id)?
            .into_iter()
            .filter(|name| cluster.contains(name))
            .collect();

        let (mut concept, opened_here) = match current.take() {
            Some(concept) => (concept, false),
            None => {
                let introducing: Vec<Change> = touching
                    .iter()
                    .filter(|change| cluster.contains_any(change.to()))
                    .map(|change| (*change).clone())
                    .collect();
                if introducing.is_empty() {
                    tracing::trace!(
                        cluster = %cluster.id(),
                        dataset = dataset.citation(),
                        "No introducing change; concept not opened yet"
                    );
                    continue;
                }
                (TaxonConcept::new(cluster.id(), introducing), true)
            }
        };

        for name in &members {
            concept.add_name(name.clone(), dataset_id);
        }

        let boundary: Vec<Change> = touching
            .iter()
            .filter(|change| change.kind().is_lump_or_split())
            .map(|change| (*change).clone())
            .collect();

        if opened_here || boundary.is_empty() {
            current = Some(concept);
            continue;
        }

        concept.ends_with = Some(boundary.clone());
        concepts.push(concept);

        let mut next = TaxonConcept::new(cluster.id(), boundary);
        for name in members {
            next.add_name(name, dataset_id);
        }
        current = Some(next);
    }

    if let Some(concept) = current {
        concepts.push(concept);
    }
    Ok(concepts)
}
