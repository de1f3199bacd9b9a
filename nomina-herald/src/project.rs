/// The project: an ordered chain of datasets plus everything derived from it
///
/// Datasets are appended in chronological order. Each append stores the
/// dataset's explicit changes, derives implicit changes for checklists and
/// folds the dataset's names into the cluster partition. Any later edit to a
/// change, a row set or the filter invalidates the recognized-name cache,
/// recomputes implicit changes from the edited dataset onward and rebuilds the
/// clusters from scratch.
use nomina_bio::{Name, NameTable};
use nomina_core::{ChangeType, Config, NominaError, NominaResult};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::change::{Change, ChangeDraft};
use crate::cluster::{NameCluster, NameClusterManager};
use crate::dataset::recognition::{implicit_drafts, recognize};
use crate::dataset::{Dataset, DatasetDraft, Recognition};
use crate::discrepancy::ChecklistDiscrepancy;
use crate::filter::ChangeFilter;
use crate::types::{ChangeId, ChangeOrigin, DatasetId};

pub struct Project {
    name: String,
    datasets: Vec<Dataset>,
    names: NameTable,
    clusters: NameClusterManager,
    filter: ChangeFilter,
    check_checklists: bool,
    last_change_id: u64,
    /// Bumped on every modification
    generation: u64,
    recognized: Mutex<HashMap<DatasetId, Arc<BTreeSet<Name>>>>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &Config::default())
    }

    pub fn with_config(name: impl Into<String>, config: &Config) -> Self {
        Self {
            name: name.into(),
            datasets: Vec::new(),
            names: NameTable::new(),
            clusters: NameClusterManager::new(),
            filter: ChangeFilter::from_config(&config.filter),
            check_checklists: config.recognition.check_checklists,
            last_change_id: 0,
            generation: 0,
            recognized: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Intern a canonical name string in the project's name table
    pub fn intern(&mut self, canonical: &str) -> NominaResult<Name> {
        self.names.intern(canonical)
    }

    pub fn filter(&self) -> &ChangeFilter {
        &self.filter
    }

    pub fn clusters(&self) -> &NameClusterManager {
        &self.clusters
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, id: DatasetId) -> NominaResult<&Dataset> {
        self.datasets
            .get(id.index())
            .ok_or(NominaError::UnknownDataset(id.index()))
    }

    fn dataset_mut(&mut self, id: DatasetId) -> NominaResult<&mut Dataset> {
        self.datasets
            .get_mut(id.index())
            .ok_or(NominaError::UnknownDataset(id.index()))
    }

    pub fn last_dataset(&self) -> Option<&Dataset> {
        self.datasets.last()
    }

    pub fn last_dataset_id(&self) -> Option<DatasetId> {
        self.datasets.last().map(Dataset::id)
    }

    /// Look a change up by id, explicit or implicit
    pub fn change(&self, id: ChangeId) -> NominaResult<&Change> {
        self.datasets
            .iter()
            .find_map(|dataset| dataset.change(id))
            .ok_or(NominaError::UnknownChange(id.0))
    }

    /// Changes of `dataset` that pass the project's filter
    pub fn filtered_changes_in<'a>(
        &'a self,
        dataset: &'a Dataset,
    ) -> impl Iterator<Item = &'a Change> + 'a {
        dataset
            .all_changes()
            .filter(move |change| self.filter.accepts(change, dataset))
    }

    /// Every change in the project that passes the filter, in chain order
    pub fn filtered_changes(&self) -> impl Iterator<Item = &Change> + '_ {
        self.datasets
            .iter()
            .flat_map(move |dataset| self.filtered_changes_in(dataset))
    }

    /// Append a dataset at the end of the chain
    pub fn append_dataset(&mut self, draft: DatasetDraft) -> NominaResult<DatasetId> {
        if let Some(last) = self.datasets.last() {
            if draft.date < last.date() {
                return Err(NominaError::InvalidInput(format!(
                    "dataset '{}' ({}) predates '{}' ({})",
                    draft.citation,
                    draft.date,
                    last.citation(),
                    last.date()
                )));
            }
        }
        for change in &draft.changes {
            change.validate()?;
        }

        let id = DatasetId(self.datasets.len());
        let rows = draft
            .rows
            .into_iter()
            .map(|name| self.names.intern_name(name))
            .collect();
        let mut dataset = Dataset::new(id, draft.citation, draft.date, draft.kind, id.previous(), rows);
        for change in draft.changes {
            dataset.push_explicit(self.store_change(id, ChangeOrigin::Explicit, change));
        }
        self.datasets.push(dataset);

        self.refresh_implicit(id)?;
        self.cluster_dataset(id)?;

        let dataset = self.dataset(id)?;
        tracing::info!(
            project = %self.name,
            dataset = %id,
            citation = dataset.citation(),
            kind = %dataset.kind(),
            explicit = dataset.explicit_changes().len(),
            implicit = dataset.implicit_changes().len(),
            "Appended dataset"
        );
        Ok(id)
    }

    /// Add an explicit change to an existing dataset
    pub fn add_change(&mut self, dataset: DatasetId, draft: ChangeDraft) -> NominaResult<ChangeId> {
        draft.validate()?;
        self.dataset(dataset)?;

        let change = self.store_change(dataset, ChangeOrigin::Explicit, draft);
        let id = change.id();
        self.dataset_mut(dataset)?.push_explicit(change);
        self.mark_modified(dataset)?;
        Ok(id)
    }

    /// Edit an explicit change in place. Implicit changes are derived and
    /// cannot be edited. An edit that leaves the change invalid is rolled
    /// back and nothing is recomputed.
    pub fn edit_change<F>(&mut self, id: ChangeId, edit: F) -> NominaResult<()>
    where
        F: FnOnce(&mut Change),
    {
        let dataset = self.explicit_owner(id)?;

        let names = &mut self.names;
        let change = self
            .datasets
            .get_mut(dataset.index())
            .and_then(|ds| ds.explicit_change_mut(id))
            .ok_or(NominaError::UnknownChange(id.0))?;
        let original = change.clone();
        edit(change);
        if let Err(err) = change.validate() {
            *change = original;
            return Err(err);
        }

        let (from, to) = change.names_mut();
        *from = std::mem::take(from)
            .into_iter()
            .map(|name| names.intern_name(name))
            .collect();
        *to = std::mem::take(to)
            .into_iter()
            .map(|name| names.intern_name(name))
            .collect();

        self.mark_modified(dataset)
    }

    /// Remove an explicit change and return it
    pub fn remove_change(&mut self, id: ChangeId) -> NominaResult<Change> {
        let dataset = self.explicit_owner(id)?;
        let removed = self
            .dataset_mut(dataset)?
            .remove_explicit(id)
            .ok_or(NominaError::UnknownChange(id.0))?;
        self.mark_modified(dataset)?;
        Ok(removed)
    }

    /// Replace a dataset's rows
    pub fn set_rows<I>(&mut self, dataset: DatasetId, rows: I) -> NominaResult<()>
    where
        I: IntoIterator<Item = Name>,
    {
        let rows: Vec<Name> = rows
            .into_iter()
            .map(|name| self.names.intern_name(name))
            .collect();
        self.dataset_mut(dataset)?.set_rows(rows);
        self.mark_modified(dataset)
    }

    /// Swap the change filter; everything derived is recomputed
    pub fn set_change_filter(&mut self, filter: ChangeFilter) -> NominaResult<()> {
        self.filter = filter;
        self.mark_modified(DatasetId(0))
    }

    fn explicit_owner(&self, id: ChangeId) -> NominaResult<DatasetId> {
        let change = self.change(id)?;
        if !change.is_explicit() {
            return Err(NominaError::InvalidInput(format!(
                "{} is implicit and derived from checklist rows",
                id
            )));
        }
        Ok(change.dataset())
    }

    fn store_change(&mut self, dataset: DatasetId, origin: ChangeOrigin, draft: ChangeDraft) -> Change {
        self.last_change_id += 1;
        let names = &mut self.names;
        let draft = ChangeDraft {
            from: draft.from.into_iter().map(|n| names.intern_name(n)).collect(),
            to: draft.to.into_iter().map(|n| names.intern_name(n)).collect(),
            ..draft
        };
        Change::from_draft(ChangeId(self.last_change_id), dataset, origin, draft)
    }

    /// Drop caches and recompute everything derived from `from` onward
    fn mark_modified(&mut self, from: DatasetId) -> NominaResult<()> {
        self.generation += 1;
        self.recognized.get_mut().clear();

        tracing::debug!(
            project = %self.name,
            from = %from,
            generation = self.generation,
            "Recomputing implicit changes and clusters"
        );

        for index in from.index()..self.datasets.len() {
            self.refresh_implicit(DatasetId(index))?;
        }
        self.rebuild_clusters()
    }

    /// Rederive a checklist's implicit additions and deletions from the
    /// previous dataset's recognized names
    fn refresh_implicit(&mut self, id: DatasetId) -> NominaResult<()> {
        let previous = match self.dataset(id)?.previous() {
            Some(previous) => self.recognized_names(previous)?,
            None => Arc::new(BTreeSet::new()),
        };

        let dataset = self.dataset(id)?;
        let drafts = if dataset.is_checklist() {
            let explicit = dataset
                .explicit_changes()
                .iter()
                .filter(|change| self.filter.accepts(change, dataset));
            implicit_drafts(dataset.names_in_rows(), &previous, explicit)
        } else {
            Vec::new()
        };

        let implicit: Vec<Change> = drafts
            .into_iter()
            .map(|draft| self.store_change(id, ChangeOrigin::Implicit, draft))
            .collect();
        self.dataset_mut(id)?.set_implicit(implicit);
        Ok(())
    }

    fn rebuild_clusters(&mut self) -> NominaResult<()> {
        self.clusters = NameClusterManager::new();
        for index in 0..self.datasets.len() {
            self.cluster_dataset(DatasetId(index))?;
        }
        tracing::debug!(
            project = %self.name,
            clusters = self.clusters.len(),
            "Rebuilt name clusters"
        );
        Ok(())
    }

    /// Register every name the dataset references, then merge the names of
    /// each accepted explicit rename
    fn cluster_dataset(&mut self, id: DatasetId) -> NominaResult<()> {
        let referenced = self.referenced_names(id)?;
        let dataset = self.dataset(id)?;
        let renames: Vec<Vec<Name>> = self
            .filtered_changes_in(dataset)
            .filter(|change| change.is_explicit() && change.kind() == ChangeType::Rename)
            .map(|change| change.all_names().cloned().collect())
            .collect();

        for name in referenced {
            let candidate = self.candidate([name], id);
            self.clusters.add_cluster(candidate);
        }
        for names in renames {
            let candidate = self.candidate(names, id);
            self.clusters.add_cluster(candidate);
        }
        Ok(())
    }

    /// Cluster candidate whose binomial reductions come from the name table
    fn candidate<I>(&mut self, names: I, dataset: DatasetId) -> NameCluster
    where
        I: IntoIterator<Item = Name>,
    {
        let mut cluster = NameCluster::new();
        for name in names {
            let binomial = self.names.binomial_of(&name);
            cluster.add_name_with_binomial(name, binomial, dataset);
        }
        cluster
    }

    /// Names in the dataset's rows, in any of its changes, or recognized at it
    pub fn referenced_names(&self, id: DatasetId) -> NominaResult<BTreeSet<Name>> {
        let mut names = self.dataset(id)?.referenced_names();
        names.extend(self.recognized_names(id)?.iter().cloned());
        Ok(names)
    }

    /// Names recognized as of `id`, propagated along the chain
    pub fn recognized_names(&self, id: DatasetId) -> NominaResult<Arc<BTreeSet<Name>>> {
        self.dataset(id)?;

        // Walk back to the nearest cached ancestor, then fill forward
        let mut pending = Vec::new();
        let mut base = Arc::new(BTreeSet::new());
        {
            let cache = self.recognized.lock();
            let mut cursor = Some(id);
            while let Some(current) = cursor {
                if let Some(hit) = cache.get(&current) {
                    base = Arc::clone(hit);
                    break;
                }
                pending.push(current);
                cursor = self.dataset(current)?.previous();
            }
        }

        for current in pending.into_iter().rev() {
            let dataset = self.dataset(current)?;
            let recognition = recognize(&base, self.filtered_changes_in(dataset));
            if self.check_checklists && dataset.is_checklist() {
                if let Some(discrepancy) = ChecklistDiscrepancy::detect(dataset, &recognition) {
                    discrepancy.log();
                }
            }
            base = Arc::new(recognition.names);
            self.recognized.lock().insert(current, Arc::clone(&base));
        }
        Ok(base)
    }

    /// Full accounting of how `id`'s recognized names follow from the
    /// previous dataset's
    pub fn recognition(&self, id: DatasetId) -> NominaResult<Recognition> {
        let dataset = self.dataset(id)?;
        let previous = match dataset.previous() {
            Some(previous) => self.recognized_names(previous)?,
            None => Arc::new(BTreeSet::new()),
        };
        Ok(recognize(&previous, self.filtered_changes_in(dataset)))
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("datasets", &self.datasets.len())
            .field("names", &self.names.len())
            .field("clusters", &self.clusters.len())
            .field("generation", &self.generation)
            .finish()
    }
}
