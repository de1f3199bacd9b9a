//! Test fixtures
//!
//! The main fixture follows three North American groups through six datasets:
//!
//! | dataset | kind | changes |
//! |---|---|---|
//! | AOU 1910 | checklist | first listing, implicit additions only |
//! | AOU 1931 | checklist | Branta lump, platypus rename |
//! | Taverner 1935a | revision | split of Buteo jamaicensis into harlani + jamaicensis |
//! | Taverner 1935b | revision | lump of harlani + borealis into jamaicensis |
//! | AOU 1944 | checklist | Branta re-split, borealis split out again |
//! | AOU 1960 | checklist | harlani and borealis lumped back into jamaicensis |

use anyhow::Result;
use chrono::NaiveDate;
use nomina_bio::Name;
use nomina_herald::{ChangeDraft, ChangeId, DatasetDraft, DatasetId, Project};

/// January 1st of `y`
pub fn year(y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, 1, 1).expect("year within chrono range")
}

/// Parse a canonical name
///
/// # Panics
/// On malformed input; fixtures only use well-formed names.
pub fn name(canonical: &str) -> Name {
    Name::from_canonical(canonical)
        .unwrap_or_else(|e| panic!("invalid fixture name {canonical:?}: {e}"))
}

pub const BRANTA_CANADENSIS: &str = "Branta canadensis";
pub const BRANTA_HUTCHINSII: &str = "Branta hutchinsii";
pub const PLATYPUS_OLD: &str = "Ornithorhynchus paradoxus";
pub const PLATYPUS: &str = "Ornithorhynchus anatinus";
pub const RED_TAIL: &str = "Buteo jamaicensis";
pub const BOREALIS: &str = "Buteo borealis";
pub const HARLANI: &str = "Buteo harlani";

/// The synonymy fixture and the ids of the changes tests ask about
pub struct SynonymyFixture {
    pub project: Project,
    pub branta_lump_1931: ChangeId,
    pub platypus_rename_1931: ChangeId,
    pub harlani_split_1935: ChangeId,
    pub pair_lump_1935: ChangeId,
    pub branta_split_1944: ChangeId,
    pub borealis_split_1944: ChangeId,
    pub harlani_lump_1960: ChangeId,
    pub borealis_lump_1960: ChangeId,
}

fn explicit(project: &Project, dataset: usize, index: usize) -> Result<ChangeId> {
    let dataset = project.dataset(DatasetId(dataset))?;
    dataset
        .explicit_changes()
        .get(index)
        .map(|change| change.id())
        .ok_or_else(|| anyhow::anyhow!("{} has no change #{}", dataset.citation(), index))
}

pub fn synonymy_fixture() -> Result<SynonymyFixture> {
    let mut project = Project::new("North American synonymy");

    project.append_dataset(DatasetDraft::checklist("AOU 1910", year(1910)).with_rows([
        name(BRANTA_CANADENSIS),
        name(BRANTA_HUTCHINSII),
        name(PLATYPUS_OLD),
        name(RED_TAIL),
        name(BOREALIS),
    ]))?;

    project.append_dataset(
        DatasetDraft::checklist("AOU 1931", year(1931))
            .with_rows([
                name(BRANTA_CANADENSIS),
                name(PLATYPUS),
                name(RED_TAIL),
                name(BOREALIS),
            ])
            .with_change(ChangeDraft::lump(
                [name(BRANTA_CANADENSIS), name(BRANTA_HUTCHINSII)],
                name(BRANTA_CANADENSIS),
            ))
            .with_change(ChangeDraft::rename(name(PLATYPUS_OLD), name(PLATYPUS))),
    )?;

    project.append_dataset(
        DatasetDraft::revision("Taverner 1935a", year(1935)).with_change(ChangeDraft::split(
            name(RED_TAIL),
            [name(HARLANI), name(RED_TAIL)],
        )),
    )?;

    project.append_dataset(
        DatasetDraft::revision("Taverner 1935b", year(1935)).with_change(ChangeDraft::lump(
            [name(HARLANI), name(BOREALIS)],
            name(RED_TAIL),
        )),
    )?;

    project.append_dataset(
        DatasetDraft::checklist("AOU 1944", year(1944))
            .with_rows([
                name(BRANTA_CANADENSIS),
                name(BRANTA_HUTCHINSII),
                name(PLATYPUS),
                name(RED_TAIL),
                name(BOREALIS),
            ])
            .with_change(ChangeDraft::split(
                name(BRANTA_CANADENSIS),
                [name(BRANTA_CANADENSIS), name(BRANTA_HUTCHINSII)],
            ))
            .with_change(ChangeDraft::split(
                name(RED_TAIL),
                [name(RED_TAIL), name(BOREALIS)],
            )),
    )?;

    project.append_dataset(
        DatasetDraft::checklist("AOU 1960", year(1960))
            .with_rows([
                name(BRANTA_CANADENSIS),
                name(BRANTA_HUTCHINSII),
                name(PLATYPUS),
                name(RED_TAIL),
            ])
            .with_change(ChangeDraft::lump(
                [name(HARLANI), name(RED_TAIL)],
                name(RED_TAIL),
            ))
            .with_change(ChangeDraft::lump(
                [name(BOREALIS), name(RED_TAIL)],
                name(RED_TAIL),
            )),
    )?;

    Ok(SynonymyFixture {
        branta_lump_1931: explicit(&project, 1, 0)?,
        platypus_rename_1931: explicit(&project, 1, 1)?,
        harlani_split_1935: explicit(&project, 2, 0)?,
        pair_lump_1935: explicit(&project, 3, 0)?,
        branta_split_1944: explicit(&project, 4, 0)?,
        borealis_split_1944: explicit(&project, 4, 1)?,
        harlani_lump_1960: explicit(&project, 5, 0)?,
        borealis_lump_1960: explicit(&project, 5, 1)?,
        project,
    })
}

/// Five datasets; `Aus bus` is split into itself and `Aus cus` in the third.
/// Returns the project and the split's id.
pub fn concept_fixture() -> Result<(Project, ChangeId)> {
    let mut project = Project::new("Aus");
    project.append_dataset(
        DatasetDraft::checklist("Checklist 1900", year(1900)).with_rows([name("Aus bus")]),
    )?;
    project.append_dataset(
        DatasetDraft::checklist("Checklist 1910", year(1910)).with_rows([name("Aus bus")]),
    )?;
    project.append_dataset(
        DatasetDraft::revision("Revision 1920", year(1920)).with_change(ChangeDraft::split(
            name("Aus bus"),
            [name("Aus bus"), name("Aus cus")],
        )),
    )?;
    project.append_dataset(
        DatasetDraft::checklist("Checklist 1930", year(1930))
            .with_rows([name("Aus bus"), name("Aus cus")]),
    )?;
    project.append_dataset(
        DatasetDraft::checklist("Checklist 1940", year(1940))
            .with_rows([name("Aus bus"), name("Aus cus")]),
    )?;

    let split = explicit(&project, 2, 0)?;
    Ok((project, split))
}
