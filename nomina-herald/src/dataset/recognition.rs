/// Recognized-name propagation along the dataset chain
///
/// `recognized(d) = recognized(prev) ∪ added(d) − (deleted(d) − added(d))`:
/// a name that a dataset both adds and deletes (the surviving name of a lump
/// or split) stays recognized.
use nomina_bio::Name;
use std::collections::BTreeSet;

use crate::change::{Change, ChangeDraft};

/// Outcome of applying one dataset's changes to the previous recognized set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    pub previous_count: usize,
    pub added: BTreeSet<Name>,
    pub deleted: BTreeSet<Name>,
    pub names: BTreeSet<Name>,
}

pub fn recognize<'a, I>(previous: &BTreeSet<Name>, changes: I) -> Recognition
where
    I: IntoIterator<Item = &'a Change>,
{
    let mut added = BTreeSet::new();
    let mut deleted = BTreeSet::new();
    for change in changes {
        added.extend(change.to().iter().cloned());
        deleted.extend(change.from().iter().cloned());
    }

    let mut names = previous.clone();
    names.extend(added.iter().cloned());
    for name in deleted.difference(&added) {
        names.remove(name);
    }

    Recognition {
        previous_count: previous.len(),
        added,
        deleted,
        names,
    }
}

/// Additions and deletions a checklist implies relative to the previous
/// recognized set, skipping names its explicit changes already account for
pub fn implicit_drafts<'a, I>(
    rows: &BTreeSet<Name>,
    previous: &BTreeSet<Name>,
    explicit: I,
) -> Vec<ChangeDraft>
where
    I: IntoIterator<Item = &'a Change>,
{
    let mut explained_additions = BTreeSet::new();
    let mut explained_deletions = BTreeSet::new();
    for change in explicit {
        explained_additions.extend(change.to().iter());
        explained_deletions.extend(change.from().iter());
    }

    let additions = rows
        .difference(previous)
        .filter(|name| !explained_additions.contains(name))
        .map(|name| ChangeDraft::addition(name.clone()));

    let deletions = previous
        .difference(rows)
        .filter(|name| !explained_deletions.contains(name))
        .map(|name| ChangeDraft::deletion(name.clone()));

    additions.chain(deletions).collect()
}
