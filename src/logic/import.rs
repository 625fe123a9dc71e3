//! Bulk team import from CSV text: `name[,flag[,kind]]` per line.

use crate::models::{Project, ProjectError, TeamId, TeamKind};

fn parse_kind(raw: &str) -> TeamKind {
    if raw.trim().eq_ignore_ascii_case("club") {
        TeamKind::Club
    } else {
        TeamKind::Country
    }
}

/// Add every row as a new pool team. A header row starting with `name` is
/// skipped, as are blank names. Returns the ids of the added teams.
pub fn import_teams_csv(project: &mut Project, data: &str) -> Result<Vec<TeamId>, ProjectError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut added = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ProjectError::Import(e.to_string()))?;
        let name = record.get(0).unwrap_or_default();
        if line == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        if name.is_empty() {
            continue;
        }
        let flag = record.get(1).unwrap_or_default();
        let kind = record.get(2).map(parse_kind).unwrap_or_default();
        added.push(project.add_team(name, flag, kind)?);
    }
    log::info!("Imported {} teams into project {}", added.len(), project.id);
    Ok(added)
}
