//! Datasets: one node in a project's chronological chain

pub mod recognition;

use chrono::{Datelike, NaiveDate};
use nomina_bio::Name;
use nomina_core::DatasetKind;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

use crate::change::{Change, ChangeDraft};
use crate::types::{ChangeId, DatasetId};

pub use recognition::Recognition;

/// A checklist or revision, as stored in a project
#[derive(Debug)]
pub struct Dataset {
    id: DatasetId,
    citation: String,
    date: NaiveDate,
    kind: DatasetKind,
    previous: Option<DatasetId>,
    rows: Vec<Name>,
    row_names: OnceCell<BTreeSet<Name>>,
    explicit_changes: Vec<Change>,
    implicit_changes: Vec<Change>,
}

impl Dataset {
    pub(crate) fn new(
        id: DatasetId,
        citation: String,
        date: NaiveDate,
        kind: DatasetKind,
        previous: Option<DatasetId>,
        rows: Vec<Name>,
    ) -> Self {
        Self {
            id,
            citation,
            date,
            kind,
            previous,
            rows,
            row_names: OnceCell::new(),
            explicit_changes: Vec::new(),
            implicit_changes: Vec::new(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn is_checklist(&self) -> bool {
        self.kind.is_checklist()
    }

    pub fn previous(&self) -> Option<DatasetId> {
        self.previous
    }

    pub fn rows(&self) -> &[Name] {
        &self.rows
    }

    /// Distinct names across all rows
    pub fn names_in_rows(&self) -> &BTreeSet<Name> {
        self.row_names
            .get_or_init(|| self.rows.iter().cloned().collect())
    }

    pub fn explicit_changes(&self) -> &[Change] {
        &self.explicit_changes
    }

    pub fn implicit_changes(&self) -> &[Change] {
        &self.implicit_changes
    }

    /// Explicit changes first, then implicit ones
    pub fn all_changes(&self) -> impl Iterator<Item = &Change> {
        self.explicit_changes
            .iter()
            .chain(self.implicit_changes.iter())
    }

    pub fn change(&self, id: ChangeId) -> Option<&Change> {
        self.all_changes().find(|change| change.id() == id)
    }

    /// Names in rows or in any change, filtered or not
    pub fn referenced_names(&self) -> BTreeSet<Name> {
        let mut names = self.names_in_rows().clone();
        names.extend(self.all_changes().flat_map(|c| c.all_names().cloned()));
        names
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Name>) {
        self.rows = rows;
        self.row_names.take();
    }

    pub(crate) fn push_explicit(&mut self, change: Change) {
        self.explicit_changes.push(change);
    }

    pub(crate) fn explicit_change_mut(&mut self, id: ChangeId) -> Option<&mut Change> {
        self.explicit_changes.iter_mut().find(|c| c.id() == id)
    }

    pub(crate) fn remove_explicit(&mut self, id: ChangeId) -> Option<Change> {
        let position = self.explicit_changes.iter().position(|c| c.id() == id)?;
        Some(self.explicit_changes.remove(position))
    }

    pub(crate) fn set_implicit(&mut self, changes: Vec<Change>) {
        self.implicit_changes = changes;
    }
}

/// An unstored dataset, as handed over by the import collaborator
#[derive(Debug, Clone)]
pub struct DatasetDraft {
    pub citation: String,
    pub date: NaiveDate,
    pub kind: DatasetKind,
    pub rows: Vec<Name>,
    pub changes: Vec<ChangeDraft>,
}

impl DatasetDraft {
    pub fn new(kind: DatasetKind, citation: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            citation: citation.into(),
            date,
            kind,
            rows: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn checklist(citation: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(DatasetKind::Checklist, citation, date)
    }

    pub fn revision(citation: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(DatasetKind::Revision, citation, date)
    }

    pub fn with_rows<I: IntoIterator<Item = Name>>(mut self, rows: I) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_change(mut self, change: ChangeDraft) -> Self {
        self.changes.push(change);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeOrigin;

    fn name(s: &str) -> Name {
        Name::from_canonical(s).unwrap()
    }

    fn checklist(rows: &[&str]) -> Dataset {
        Dataset::new(
            DatasetId(0),
            "AOU 1910".to_string(),
            NaiveDate::from_ymd_opt(1910, 1, 1).unwrap(),
            DatasetKind::Checklist,
            None,
            rows.iter().map(|s| name(s)).collect(),
        )
    }

    #[test]
    fn test_row_names_are_deduplicated() {
        let ds = checklist(&["Buteo jamaicensis", "Buteo borealis", "Buteo jamaicensis"]);
        assert_eq!(ds.rows().len(), 3);
        assert_eq!(ds.names_in_rows().len(), 2);
        assert_eq!(ds.year(), 1910);
    }

    #[test]
    fn test_set_rows_invalidates_memo() {
        let mut ds = checklist(&["Buteo jamaicensis"]);
        assert_eq!(ds.names_in_rows().len(), 1);

        ds.set_rows(vec![name("Buteo jamaicensis"), name("Buteo harlani")]);
        assert_eq!(ds.names_in_rows().len(), 2);
    }

    #[test]
    fn test_referenced_names_include_changes() {
        let mut ds = checklist(&["Ornithorhynchus anatinus"]);
        ds.push_explicit(Change::from_draft(
            ChangeId(7),
            DatasetId(0),
            ChangeOrigin::Explicit,
            ChangeDraft::rename(name("Ornithorhynchus paradoxus"), name("Ornithorhynchus anatinus")),
        ));

        let referenced = ds.referenced_names();
        assert!(referenced.contains(&name("Ornithorhynchus paradoxus")));
        assert_eq!(referenced.len(), 2);
        assert!(ds.change(ChangeId(7)).is_some());
        assert!(ds.change(ChangeId(8)).is_none());
    }

    #[test]
    fn test_remove_explicit() {
        let mut ds = checklist(&[]);
        ds.push_explicit(Change::from_draft(
            ChangeId(3),
            DatasetId(0),
            ChangeOrigin::Explicit,
            ChangeDraft::addition(name("Branta hutchinsii")),
        ));
        assert!(ds.remove_explicit(ChangeId(3)).is_some());
        assert!(ds.remove_explicit(ChangeId(3)).is_none());
        assert!(ds.explicit_changes().is_empty());
    }
}
