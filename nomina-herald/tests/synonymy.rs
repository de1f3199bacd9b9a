//! End-to-end checks over the six-dataset synonymy fixture

use nomina_herald::DatasetId;
use nomina_test::assertions::{
    assert_change_ids, assert_partition, assert_recognized, assert_same_cluster,
};
use nomina_test::fixtures::{
    BOREALIS, BRANTA_CANADENSIS, BRANTA_HUTCHINSII, HARLANI, PLATYPUS, PLATYPUS_OLD, RED_TAIL,
};
use nomina_test::{init_test_logging, name, synonymy_fixture};
use pretty_assertions::assert_eq;

#[test]
fn test_recognized_names_follow_the_chain() -> anyhow::Result<()> {
    init_test_logging();
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;

    assert_recognized(
        project,
        DatasetId(0),
        &[BRANTA_CANADENSIS, BRANTA_HUTCHINSII, PLATYPUS_OLD, RED_TAIL, BOREALIS],
    );
    assert_recognized(project, DatasetId(1), &[BRANTA_CANADENSIS, PLATYPUS, RED_TAIL, BOREALIS]);
    assert_recognized(
        project,
        DatasetId(2),
        &[BRANTA_CANADENSIS, PLATYPUS, RED_TAIL, BOREALIS, HARLANI],
    );
    assert_recognized(project, DatasetId(3), &[BRANTA_CANADENSIS, PLATYPUS, RED_TAIL]);
    assert_recognized(
        project,
        DatasetId(5),
        &[BRANTA_CANADENSIS, BRANTA_HUTCHINSII, PLATYPUS, RED_TAIL],
    );
    Ok(())
}

#[test]
fn test_checklists_are_fully_explained() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    assert!(fixture.project.checklist_discrepancies()?.is_empty());

    // Explicit changes explain every difference, so only the first checklist
    // carries implicit changes
    let implicit: Vec<usize> = fixture
        .project
        .datasets()
        .iter()
        .map(|ds| ds.implicit_changes().len())
        .collect();
    assert_eq!(implicit, vec![5, 0, 0, 0, 0, 0]);
    Ok(())
}

#[test]
fn test_only_renames_merge_clusters() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let clusters = fixture.project.clusters();

    assert_same_cluster(&fixture.project, &[PLATYPUS_OLD, PLATYPUS]);
    assert_partition(&fixture.project);
    assert_eq!(clusters.len(), 6);
    assert_ne!(
        clusters.cluster_id(&name(RED_TAIL)),
        clusters.cluster_id(&name(HARLANI))
    );
    Ok(())
}

#[test]
fn test_split_is_reversed_by_two_lumps() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;

    let reversing = project.changes_reversing(fixture.harlani_split_1935)?;
    assert_change_ids(&reversing, &[fixture.pair_lump_1935, fixture.harlani_lump_1960]);

    let perfect = project.changes_perfectly_reversing(fixture.harlani_split_1935)?;
    assert_change_ids(&perfect, &[fixture.harlani_lump_1960]);

    assert_eq!(
        project.perfectly_reversing_summary(fixture.harlani_split_1935)?,
        "split(1935) → lump(1960)"
    );
    Ok(())
}

#[test]
fn test_reversion_is_mutual() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;

    let perfect = project.changes_perfectly_reversing(fixture.harlani_lump_1960)?;
    assert_change_ids(&perfect, &[fixture.harlani_split_1935]);

    let perfect = project.changes_perfectly_reversing(fixture.branta_lump_1931)?;
    assert_change_ids(&perfect, &[fixture.branta_split_1944]);

    let perfect = project.changes_perfectly_reversing(fixture.borealis_split_1944)?;
    assert_change_ids(&perfect, &[fixture.borealis_lump_1960]);
    Ok(())
}

#[test]
fn test_rename_has_no_reversals() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;

    assert!(project.changes_reversing(fixture.platypus_rename_1931)?.is_empty());
    assert_eq!(
        project.perfectly_reversing_summary(fixture.platypus_rename_1931)?,
        "rename(1931)"
    );
    Ok(())
}

#[test]
fn test_red_tail_concepts() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;
    let cluster = project
        .clusters()
        .cluster(&name(RED_TAIL))
        .ok_or_else(|| anyhow::anyhow!("red-tail not clustered"))?;

    let concepts = cluster.taxon_concepts(project)?;
    assert_eq!(concepts.len(), 5);

    let first = &concepts[0];
    assert_eq!(first.first_dataset(), Some(DatasetId(0)));
    assert_eq!(first.last_dataset(), Some(DatasetId(2)));
    let closing: Vec<_> = first.ends_with().unwrap_or_default().iter().map(|c| c.id()).collect();
    assert_eq!(closing, vec![fixture.harlani_split_1935]);
    assert!(!first.is_polytypic(project)?);
    assert!(!first.is_ongoing(project)?);

    assert!(concepts[1].is_polytypic(project)?);

    let last = &concepts[4];
    assert!(last.ends_with().is_none());
    assert!(last.is_ongoing(project)?);

    assert!(cluster.is_polytypic(project));
    Ok(())
}

#[test]
fn test_summaries_cover_the_project() -> anyhow::Result<()> {
    let fixture = synonymy_fixture()?;
    let project = &fixture.project;

    let datasets = project.dataset_summaries()?;
    assert_eq!(datasets.len(), 6);
    assert_eq!(datasets[5].recognized, 4);

    let clusters = project.cluster_summaries()?;
    assert_eq!(clusters.len(), 6);
    let platypus = clusters
        .iter()
        .find(|summary| summary.names.contains(&PLATYPUS.to_string()))
        .ok_or_else(|| anyhow::anyhow!("no platypus cluster"))?;
    assert_eq!(platypus.names.len(), 2);
    assert!(platypus.ongoing);

    let json = serde_json::to_string(&clusters)?;
    assert!(json.contains("\"Ornithorhynchus paradoxus\""));
    Ok(())
}
