//! Explicit save/load of whole projects as JSON files (`<dir>/<id>.json`).

use crate::models::{Project, ProjectError, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the saved-projects list shows.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub groups_count: usize,
    pub teams_count: usize,
}

impl ProjectSummary {
    pub fn of(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            groups_count: project.groups.len(),
            teams_count: project.team_count(),
        }
    }
}

fn storage_err(e: impl std::fmt::Display) -> ProjectError {
    ProjectError::Storage(e.to_string())
}

pub fn to_json(project: &Project) -> Result<String, ProjectError> {
    serde_json::to_string_pretty(project).map_err(storage_err)
}

pub fn from_json(data: &str) -> Result<Project, ProjectError> {
    serde_json::from_str(data).map_err(storage_err)
}

pub fn project_path(dir: &Path, id: ProjectId) -> PathBuf {
    dir.join(format!("{id}.json"))
}

/// Write the project, replacing any earlier save of the same id.
pub async fn save_project(dir: &Path, project: &Project) -> Result<PathBuf, ProjectError> {
    tokio::fs::create_dir_all(dir).await.map_err(storage_err)?;
    let path = project_path(dir, project.id);
    tokio::fs::write(&path, to_json(project)?)
        .await
        .map_err(storage_err)?;
    log::info!("Saved project {} to {}", project.id, path.display());
    Ok(path)
}

fn io_err(id: ProjectId, e: std::io::Error) -> ProjectError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ProjectError::SavedProjectNotFound(id)
    } else {
        storage_err(e)
    }
}

/// Read a save back. The id stored in the file must match its file name.
pub async fn load_project(dir: &Path, id: ProjectId) -> Result<Project, ProjectError> {
    let path = project_path(dir, id);
    let data = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| io_err(id, e))?;
    let project = from_json(&data)?;
    if project.id != id {
        return Err(ProjectError::Storage(format!(
            "{} holds project {}",
            path.display(),
            project.id
        )));
    }
    log::info!("Loaded project {} from {}", id, path.display());
    Ok(project)
}

pub async fn delete_saved(dir: &Path, id: ProjectId) -> Result<(), ProjectError> {
    let path = project_path(dir, id);
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| io_err(id, e))?;
    log::info!("Deleted saved project {}", id);
    Ok(())
}

/// Summaries of every readable save in `dir`, most recently updated first.
/// A missing directory means nothing has been saved yet.
pub async fn list_saved(dir: &Path) -> Result<Vec<ProjectSummary>, ProjectError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_err(e)),
    };
    let mut summaries = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(storage_err)? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Skipping unreadable save {}: {}", path.display(), e);
                continue;
            }
        };
        match from_json(&data) {
            Ok(project) => summaries.push(ProjectSummary::of(&project)),
            Err(e) => log::warn!("Skipping invalid save {}: {}", path.display(), e),
        }
    }
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(summaries)
}
