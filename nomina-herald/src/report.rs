//! Serializable summaries of a project's datasets, clusters and concepts

use chrono::NaiveDate;
use indexmap::IndexMap;
use nomina_core::{DatasetKind, NominaResult};
use serde::Serialize;

use crate::cluster::{NameCluster, TaxonConcept};
use crate::project::Project;
use crate::types::{ClusterId, DatasetId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub citation: String,
    pub date: NaiveDate,
    pub kind: DatasetKind,
    pub rows: usize,
    pub explicit_changes: usize,
    pub implicit_changes: usize,
    pub added: usize,
    pub deleted: usize,
    pub recognized: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub id: ClusterId,
    pub names: Vec<String>,
    pub found_in: Vec<String>,
    /// Citation to representative binomial, in chain order
    pub binomials: IndexMap<String, String>,
    pub concepts: usize,
    pub polytypic: bool,
    pub ongoing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptSummary {
    pub cluster: ClusterId,
    pub names: Vec<String>,
    pub first_citation: Option<String>,
    pub last_citation: Option<String>,
    pub starts_with: Vec<String>,
    pub ends_with: Vec<String>,
    pub ongoing: bool,
    pub polytypic: bool,
}

impl Project {
    pub fn dataset_summaries(&self) -> NominaResult<Vec<DatasetSummary>> {
        self.datasets()
            .iter()
            .map(|dataset| {
                let recognition = self.recognition(dataset.id())?;
                Ok(DatasetSummary {
                    id: dataset.id(),
                    citation: dataset.citation().to_string(),
                    date: dataset.date(),
                    kind: dataset.kind(),
                    rows: dataset.names_in_rows().len(),
                    explicit_changes: dataset.explicit_changes().len(),
                    implicit_changes: dataset.implicit_changes().len(),
                    added: recognition.added.len(),
                    deleted: recognition.deleted.len(),
                    recognized: recognition.names.len(),
                })
            })
            .collect()
    }

    pub fn cluster_summaries(&self) -> NominaResult<Vec<ClusterSummary>> {
        self.clusters()
            .iter()
            .map(|cluster| self.summarize_cluster(cluster))
            .collect()
    }

    fn summarize_cluster(&self, cluster: &NameCluster) -> NominaResult<ClusterSummary> {
        let concepts = cluster.taxon_concepts(self)?;

        let mut found_in = Vec::new();
        let mut binomials = IndexMap::new();
        for &dataset_id in cluster.found_in() {
            let citation = self.dataset(dataset_id)?.citation().to_string();
            if let Some(binomial) = cluster.representative_binomial(dataset_id) {
                binomials.insert(citation.clone(), binomial.to_string());
            }
            found_in.push(citation);
        }

        let mut ongoing = false;
        for concept in &concepts {
            if concept.is_ongoing(self)? {
                ongoing = true;
                break;
            }
        }

        Ok(ClusterSummary {
            id: cluster.id(),
            names: cluster.names().iter().map(ToString::to_string).collect(),
            found_in,
            binomials,
            concepts: concepts.len(),
            polytypic: cluster.is_polytypic(self),
            ongoing,
        })
    }

    /// Concepts of every cluster, clusters ordered by first member
    pub fn concept_summaries(&self) -> NominaResult<Vec<ConceptSummary>> {
        let mut summaries = Vec::new();
        for cluster in self.clusters().iter() {
            for concept in cluster.taxon_concepts(self)? {
                summaries.push(self.summarize_concept(&concept)?);
            }
        }
        Ok(summaries)
    }

    fn summarize_concept(&self, concept: &TaxonConcept) -> NominaResult<ConceptSummary> {
        let citation = |id: Option<DatasetId>| -> NominaResult<Option<String>> {
            id.map(|id| self.dataset(id).map(|ds| ds.citation().to_string()))
                .transpose()
        };

        Ok(ConceptSummary {
            cluster: concept.cluster(),
            names: concept.names().iter().map(ToString::to_string).collect(),
            first_citation: citation(concept.first_dataset())?,
            last_citation: citation(concept.last_dataset())?,
            starts_with: concept
                .starts_with()
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect(),
            ends_with: concept
                .ends_with()
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect(),
            ongoing: concept.is_ongoing(self)?,
            polytypic: concept.is_polytypic(self)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeDraft;
    use crate::dataset::DatasetDraft;
    use nomina_bio::Name;
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> Name {
        Name::from_canonical(s).unwrap()
    }

    fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn project() -> Project {
        let mut project = Project::new("Platypus");
        project
            .append_dataset(
                DatasetDraft::checklist("Checklist 1900", year(1900))
                    .with_rows([name("Ornithorhynchus paradoxus")]),
            )
            .unwrap();
        project
            .append_dataset(
                DatasetDraft::checklist("Checklist 1931", year(1931))
                    .with_rows([name("Ornithorhynchus anatinus")])
                    .with_change(ChangeDraft::rename(
                        name("Ornithorhynchus paradoxus"),
                        name("Ornithorhynchus anatinus"),
                    )),
            )
            .unwrap();
        project
    }

    #[test]
    fn test_dataset_summaries() {
        let summaries = project().dataset_summaries().unwrap();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].implicit_changes, 1);
        assert_eq!(summaries[0].recognized, 1);
        assert_eq!(summaries[1].explicit_changes, 1);
        assert_eq!(summaries[1].implicit_changes, 0);
        assert_eq!(summaries[1].added, 1);
        assert_eq!(summaries[1].deleted, 1);
        assert_eq!(summaries[1].kind, DatasetKind::Checklist);
    }

    #[test]
    fn test_cluster_summary() {
        let summaries = project().cluster_summaries().unwrap();
        assert_eq!(summaries.len(), 1);

        let summary = &summaries[0];
        assert_eq!(
            summary.names,
            vec!["Ornithorhynchus anatinus", "Ornithorhynchus paradoxus"]
        );
        assert_eq!(summary.found_in, vec!["Checklist 1900", "Checklist 1931"]);
        assert_eq!(
            summary.binomials.get("Checklist 1900").map(String::as_str),
            Some("Ornithorhynchus paradoxus")
        );
        assert_eq!(summary.concepts, 1);
        assert!(summary.ongoing);
        assert!(!summary.polytypic);
    }

    #[test]
    fn test_concept_summary_serializes() {
        let summaries = project().concept_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].first_citation.as_deref(), Some("Checklist 1900"));
        assert_eq!(summaries[0].last_citation.as_deref(), Some("Checklist 1931"));
        assert!(summaries[0].ends_with.is_empty());

        let json = serde_json::to_value(&summaries[0]).unwrap();
        assert_eq!(json["ongoing"], serde_json::Value::Bool(true));
        assert_eq!(json["cluster"], serde_json::json!(summaries[0].cluster.0));
    }
}
