/// Checklist discrepancy detection
///
/// A checklist lists every name it recognizes, so the names recognized by
/// propagating changes along the chain must equal its rows. A mismatch means
/// the dataset's changes do not explain the checklist; it is reported, never
/// treated as fatal.
use itertools::Itertools;
use nomina_bio::Name;
use nomina_core::NominaResult;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::dataset::{Dataset, Recognition};
use crate::project::Project;
use crate::types::DatasetId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistDiscrepancy {
    pub dataset: DatasetId,
    pub citation: String,
    pub previous_count: usize,
    pub added_count: usize,
    pub deleted_count: usize,
    pub recognized_count: usize,
    pub checklist_count: usize,
    /// Recognized but absent from the checklist
    pub extra: BTreeSet<Name>,
    /// Listed by the checklist but not recognized
    pub missing: BTreeSet<Name>,
}

impl ChecklistDiscrepancy {
    /// Compare a checklist's rows with the names its changes leave recognized
    pub fn detect(dataset: &Dataset, recognition: &Recognition) -> Option<Self> {
        let rows = dataset.names_in_rows();
        if &recognition.names == rows {
            return None;
        }

        Some(Self {
            dataset: dataset.id(),
            citation: dataset.citation().to_string(),
            previous_count: recognition.previous_count,
            added_count: recognition.added.len(),
            deleted_count: recognition.deleted.len(),
            recognized_count: recognition.names.len(),
            checklist_count: rows.len(),
            extra: recognition.names.difference(rows).cloned().collect(),
            missing: rows.difference(&recognition.names).cloned().collect(),
        })
    }

    /// How the recognized count came about, for log lines
    pub fn arithmetic(&self) -> String {
        format!(
            "{} previous + {} added - {} deleted = {} recognized, checklist lists {}",
            self.previous_count,
            self.added_count,
            self.deleted_count,
            self.recognized_count,
            self.checklist_count
        )
    }

    pub(crate) fn log(&self) {
        tracing::warn!(
            dataset = %self.dataset,
            citation = %self.citation,
            extra = %self.extra.iter().join("; "),
            missing = %self.missing.iter().join("; "),
            "Checklist disagrees with recognized names: {}",
            self.arithmetic()
        );
    }
}

impl Project {
    /// Every checklist whose rows disagree with its recognized names, in
    /// chain order. Computed regardless of the `check_checklists` setting.
    pub fn checklist_discrepancies(&self) -> NominaResult<Vec<ChecklistDiscrepancy>> {
        let mut found = Vec::new();
        for dataset in self.datasets().iter().filter(|ds| ds.is_checklist()) {
            let recognition = self.recognition(dataset.id())?;
            if let Some(discrepancy) = ChecklistDiscrepancy::detect(dataset, &recognition) {
                found.push(discrepancy);
            }
        }
        Ok(found)
    }
}
