/// Taxonomic change records
///
/// A change belongs to exactly one dataset and maps a from-set of names to a
/// to-set. Explicit changes are authored; implicit ones are derived by the
/// project from checklist differences and rebuilt whenever anything upstream
/// is edited.
use itertools::Itertools;
use nomina_bio::Name;
use nomina_core::{ChangeType, NominaError, NominaResult};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{ChangeId, ChangeOrigin, DatasetId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    id: ChangeId,
    kind: ChangeType,
    dataset: DatasetId,
    origin: ChangeOrigin,
    from: BTreeSet<Name>,
    to: BTreeSet<Name>,
    properties: BTreeMap<String, String>,
    note: Option<String>,
    /// Bumped on every edit
    revision: u64,
}

impl Change {
    pub(crate) fn from_draft(
        id: ChangeId,
        dataset: DatasetId,
        origin: ChangeOrigin,
        draft: ChangeDraft,
    ) -> Self {
        Self {
            id,
            kind: draft.kind,
            dataset,
            origin,
            from: draft.from,
            to: draft.to,
            properties: draft.properties,
            note: draft.note,
            revision: 0,
        }
    }

    pub fn id(&self) -> ChangeId {
        self.id
    }

    pub fn kind(&self) -> ChangeType {
        self.kind
    }

    pub fn dataset(&self) -> DatasetId {
        self.dataset
    }

    pub fn origin(&self) -> ChangeOrigin {
        self.origin
    }

    pub fn is_explicit(&self) -> bool {
        self.origin == ChangeOrigin::Explicit
    }

    pub fn from(&self) -> &BTreeSet<Name> {
        &self.from
    }

    pub fn to(&self) -> &BTreeSet<Name> {
        &self.to
    }

    /// From-names followed by to-names; a name in both appears twice
    pub fn all_names(&self) -> impl Iterator<Item = &Name> {
        self.from.iter().chain(self.to.iter())
    }

    pub fn mentions(&self, name: &Name) -> bool {
        self.from.contains(name) || self.to.contains(name)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_kind(&mut self, kind: ChangeType) {
        self.kind = kind;
        self.touch();
    }

    pub fn set_from<I: IntoIterator<Item = Name>>(&mut self, names: I) {
        self.from = names.into_iter().collect();
        self.touch();
    }

    pub fn set_to<I: IntoIterator<Item = Name>>(&mut self, names: I) {
        self.to = names.into_iter().collect();
        self.touch();
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
        self.touch();
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        let removed = self.properties.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub(crate) fn validate(&self) -> NominaResult<()> {
        check_names(self.kind, &self.from, &self.to)
    }

    pub(crate) fn names_mut(&mut self) -> (&mut BTreeSet<Name>, &mut BTreeSet<Name>) {
        (&mut self.from, &mut self.to)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} → {}",
            self.kind,
            self.from.iter().join(", "),
            self.to.iter().join(", ")
        )
    }
}

/// An unstored change, as handed over by the authoring collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeDraft {
    pub kind: ChangeType,
    pub from: BTreeSet<Name>,
    pub to: BTreeSet<Name>,
    pub properties: BTreeMap<String, String>,
    pub note: Option<String>,
}

impl ChangeDraft {
    pub fn new<F, T>(kind: ChangeType, from: F, to: T) -> Self
    where
        F: IntoIterator<Item = Name>,
        T: IntoIterator<Item = Name>,
    {
        Self {
            kind,
            from: from.into_iter().collect(),
            to: to.into_iter().collect(),
            properties: BTreeMap::new(),
            note: None,
        }
    }

    pub fn addition(name: Name) -> Self {
        Self::new(ChangeType::Addition, None::<Name>, Some(name))
    }

    pub fn deletion(name: Name) -> Self {
        Self::new(ChangeType::Deletion, Some(name), None::<Name>)
    }

    pub fn rename(from: Name, to: Name) -> Self {
        Self::new(ChangeType::Rename, Some(from), Some(to))
    }

    pub fn lump<F: IntoIterator<Item = Name>>(from: F, into: Name) -> Self {
        Self::new(ChangeType::Lump, from, Some(into))
    }

    pub fn split<T: IntoIterator<Item = Name>>(from: Name, into: T) -> Self {
        Self::new(ChangeType::Split, Some(from), into)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub(crate) fn validate(&self) -> NominaResult<()> {
        check_names(self.kind, &self.from, &self.to)
    }
}

/// A change has to name at least one taxon on either side
fn check_names(kind: ChangeType, from: &BTreeSet<Name>, to: &BTreeSet<Name>) -> NominaResult<()> {
    if from.is_empty() && to.is_empty() {
        return Err(NominaError::InvalidInput(format!(
            "{} change names no taxa",
            kind
        )));
    }
    Ok(())
}
