//! Reversion detection
//!
//! A lump or split is compared with every other accepted lump or split after
//! mapping both changes' names onto their clusters. Sharing at least two
//! clusters with the inverse kind (or the same kind) counts as a reversal;
//! exact equality of the mapped from- and to-sets is a perfect one.

use itertools::Itertools;
use nomina_core::NominaResult;
use std::collections::BTreeSet;

use crate::change::Change;
use crate::project::Project;
use crate::types::{ChangeId, ClusterId};

/// Cluster ids of a change's from-set and to-set
struct ClusterMapping {
    from: BTreeSet<ClusterId>,
    to: BTreeSet<ClusterId>,
}

impl ClusterMapping {
    fn all(&self) -> BTreeSet<ClusterId> {
        self.from.union(&self.to).copied().collect()
    }
}

impl Project {
    fn cluster_mapping(&self, change: &Change) -> NominaResult<ClusterMapping> {
        Ok(ClusterMapping {
            from: self.clusters().cluster_ids(change.from())?,
            to: self.clusters().cluster_ids(change.to())?,
        })
    }

    /// Accepted lumps and splits that partially or wholly undo (or repeat)
    /// the change `id`, in chronological order. Anything other than a lump or
    /// split has no reversals.
    pub fn changes_reversing(&self, id: ChangeId) -> NominaResult<Vec<&Change>> {
        let change = self.change(id)?;
        let kind = change.kind();
        if !kind.is_lump_or_split() {
            return Ok(Vec::new());
        }

        let mapped = self.cluster_mapping(change)?.all();
        let inverse = kind.invert();

        let mut reversing = Vec::new();
        for candidate in self.filtered_changes() {
            if candidate.id() == id || (candidate.kind() != inverse && candidate.kind() != kind) {
                continue;
            }
            let shared = self
                .cluster_mapping(candidate)?
                .all()
                .intersection(&mapped)
                .count();
            if shared >= 2 {
                reversing.push(candidate);
            }
        }

        reversing.sort_by_key(|change| (change.dataset(), change.id()));
        tracing::debug!(change = %id, found = reversing.len(), "Reversing changes");
        Ok(reversing)
    }

    /// The subset of `changes_reversing` that maps onto exactly the same
    /// clusters: a perfect undo, or an identical repeat
    pub fn changes_perfectly_reversing(&self, id: ChangeId) -> NominaResult<Vec<&Change>> {
        let change = self.change(id)?;
        let target = self.cluster_mapping(change)?;

        let mut perfect = Vec::new();
        for candidate in self.changes_reversing(id)? {
            let mapping = self.cluster_mapping(candidate)?;
            let undo = mapping.from == target.to && mapping.to == target.from;
            let repeat = mapping.from == target.from && mapping.to == target.to;
            if undo || repeat {
                perfect.push(candidate);
            }
        }
        Ok(perfect)
    }

    /// `change` and its perfect reversals as a trajectory string such as
    /// `split(1935) → lump(1960)`
    pub fn perfectly_reversing_summary(&self, id: ChangeId) -> NominaResult<String> {
        let mut timeline = self.changes_perfectly_reversing(id)?;
        timeline.push(self.change(id)?);
        timeline.sort_by_key(|change| (change.dataset(), change.id()));

        let steps = timeline
            .iter()
            .map(|change| -> NominaResult<String> {
                let year = self.dataset(change.dataset())?.year();
                Ok(format!("{}({})", change.kind(), year))
            })
            .collect::<NominaResult<Vec<_>>>()?;
        Ok(steps.iter().join(" → "))
    }
}
