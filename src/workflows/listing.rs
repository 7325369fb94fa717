use super::out_err;
use crate::api::{FaceService, PersonGroup};
use crate::error::Result;
use std::io::Write;

/// Print every person group visible to the key's account.
pub fn list_groups(service: &dyn FaceService, out: &mut impl Write) -> Result<Vec<PersonGroup>> {
    let groups = service.list_person_groups()?;
    for pg in &groups {
        writeln!(out, " - {} -> {}", pg.name, pg.person_group_id).map_err(out_err)?;
    }
    Ok(groups)
}

/// Print the persons of group `name`, either as readable lines or as a
/// JSON object mapping person id to person name.
///
/// The JSON form keeps one member per line but, unlike the historical
/// output, never emits a comma after the last member.
pub fn list_group(
    service: &dyn FaceService,
    name: &str,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let group = service.get_person_group(name)?;
    writeln!(
        out,
        "Getting info for group name={}, id={}",
        group.name, group.person_group_id
    )
    .map_err(out_err)?;
    let persons = service.list_persons(&group.person_group_id)?;
    if !as_json {
        for p in &persons {
            writeln!(out, " - person {}, id={}", p.name, p.person_id).map_err(out_err)?;
        }
        return Ok(());
    }

    writeln!(out, "{{").map_err(out_err)?;
    for (i, p) in persons.iter().enumerate() {
        let sep = if i + 1 < persons.len() { "," } else { "" };
        writeln!(
            out,
            "{}:{}{}",
            serde_json::to_string(&p.person_id)?,
            serde_json::to_string(&p.name)?,
            sep
        )
        .map_err(out_err)?;
    }
    writeln!(out, "}}").map_err(out_err)?;
    Ok(())
}
