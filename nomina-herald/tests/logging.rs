//! Diagnostics reach a `tracing` subscriber installed by the tests

use nomina_herald::{ChangeDraft, DatasetDraft, Project};
use nomina_test::{capture_logs, name, year};
use pretty_assertions::assert_eq;

fn contradicted_checklists() -> anyhow::Result<Project> {
    let mut project = Project::new("Branta");
    project.append_dataset(
        DatasetDraft::checklist("AOU 1910", year(1910))
            .with_rows([name("Branta canadensis"), name("Branta hutchinsii")]),
    )?;
    project.append_dataset(
        DatasetDraft::checklist("AOU 1931", year(1931))
            .with_rows([name("Branta canadensis"), name("Branta hutchinsii")])
            .with_change(ChangeDraft::deletion(name("Branta hutchinsii"))),
    )?;
    Ok(project)
}

#[test]
fn test_checklist_discrepancy_is_logged() -> anyhow::Result<()> {
    let (discrepancies, logs) = capture_logs("warn", || -> anyhow::Result<usize> {
        let project = contradicted_checklists()?;
        Ok(project.checklist_discrepancies()?.len())
    });

    assert_eq!(discrepancies?, 1);
    assert!(logs.contains("Checklist disagrees with recognized names"));
    assert!(logs.contains("2 previous + 0 added - 1 deleted = 1 recognized, checklist lists 2"));
    assert!(logs.contains("Branta hutchinsii"));
    assert!(!logs.contains("Appended dataset"));
    Ok(())
}

#[test]
fn test_appends_are_logged_at_info() -> anyhow::Result<()> {
    let (project, logs) = capture_logs("nomina_herald=info", contradicted_checklists);

    assert_eq!(project?.datasets().len(), 2);
    assert_eq!(logs.matches("Appended dataset").count(), 2);
    assert!(logs.contains("AOU 1931"));
    Ok(())
}
