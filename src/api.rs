//! REST API over in-memory projects.
//!
//! Every mutating endpoint answers with the full project (like the engine
//! functions, the whole state is the result). Engine errors become
//! `400 {"error": ...}`, unknown projects `404`.

use crate::config::ServerConfig;
use crate::logic::{
    apply_knockout_result, assign_from_group, assign_manual, assign_slot, change_match_teams,
    clear_match_score, create_match, delete_match, draw_team_for_group, draw_teams_into_groups,
    generate_all_matches, generate_group_matches, generate_knockout, group_standings,
    import_teams_csv, record_match_score, set_knockout_link, ScoreUpdate,
};
use crate::models::{
    GroupId, MatchId, MatchLink, Project, ProjectError, ProjectId, Side, TeamId, TeamKind,
    TournamentSettings,
};
use crate::store;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Project data + last activity time (for auto-cleanup).
pub struct ProjectEntry {
    pub project: Project,
    pub last_activity: Instant,
}

impl ProjectEntry {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            last_activity: Instant::now(),
        }
    }
}

/// In-memory projects by id.
pub type Projects = RwLock<HashMap<ProjectId, ProjectEntry>>;

type AppState = Data<Projects>;

/// Drop projects idle for `timeout` or longer. Returns how many were removed.
pub fn evict_inactive(projects: &Projects, timeout: Duration) -> usize {
    let mut g = match projects.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateProjectBody {
    #[serde(default = "default_project_name")]
    name: String,
}

fn default_project_name() -> String {
    "New tournament".to_string()
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    flag: String,
    #[serde(default)]
    kind: TeamKind,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveTeamBody {
    /// `null` moves the team back to the unassigned pool.
    group_id: Option<GroupId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawBody {
    team_ids: Vec<TeamId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchTeamsBody {
    team1_id: TeamId,
    team2_id: TeamId,
}

#[derive(Deserialize)]
struct MatchScoreBody {
    score1: u32,
    score2: u32,
    #[serde(default)]
    link: Option<MatchLink>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnockoutBody {
    team_count: u32,
}

#[derive(Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
enum SlotSource {
    Manual {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: GroupId,
        position: usize,
    },
    Clear,
}

#[derive(Deserialize)]
struct SlotBody {
    side: Side,
    #[serde(flatten)]
    source: SlotSource,
}

#[derive(Deserialize)]
struct LinkBody {
    #[serde(default)]
    link: Option<MatchLink>,
}

/// Path segment: project id (e.g. /api/projects/{id})
#[derive(Deserialize)]
struct ProjectPath {
    id: ProjectId,
}

#[derive(Deserialize)]
struct ProjectTeamPath {
    id: ProjectId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct ProjectGroupPath {
    id: ProjectId,
    group_id: GroupId,
}

#[derive(Deserialize)]
struct ProjectMatchPath {
    id: ProjectId,
    match_id: MatchId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No project" }))
}

fn bad_request(e: ProjectError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` on a project and answer with the updated project.
fn mutate<T, F>(state: &AppState, id: ProjectId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Project) -> Result<T, ProjectError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.project) {
        Ok(_) => HttpResponse::Ok().json(&entry.project),
        Err(e) => bad_request(e),
    }
}

/// Read-only projection of a project.
fn view<T, F>(state: &AppState, id: ProjectId, f: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&Project) -> Result<T, ProjectError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&entry.project) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-draw-web",
    })
}

/// Create a new project (returns it with id; client stores id for subsequent requests).
#[post("/api/projects")]
async fn api_create_project(state: AppState, body: Option<Json<CreateProjectBody>>) -> HttpResponse {
    let name = body
        .map(|b| b.into_inner().name.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(default_project_name);
    let project = Project::new(name);
    let id = project.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created project {}", id);
    let entry = g.entry(id).or_insert(ProjectEntry::new(project));
    HttpResponse::Ok().json(&entry.project)
}

/// Get a project by id. Touching it refreshes last_activity.
#[get("/api/projects/{id}")]
async fn api_get_project(state: AppState, path: Path<ProjectPath>) -> HttpResponse {
    view(&state, path.id, |p| Ok(p.clone()))
}

#[post("/api/projects/{id}/reset")]
async fn api_reset_project(state: AppState, path: Path<ProjectPath>) -> HttpResponse {
    mutate(&state, path.id, |p| {
        p.reset();
        Ok(())
    })
}

#[put("/api/projects/{id}/settings")]
async fn api_set_settings(
    state: AppState,
    path: Path<ProjectPath>,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    mutate(&state, path.id, |p| p.set_settings(body.into_inner()))
}

#[post("/api/projects/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<ProjectPath>, body: Json<AddTeamBody>) -> HttpResponse {
    mutate(&state, path.id, |p| p.add_team(&body.name, &body.flag, body.kind))
}

/// Import teams from CSV text (`name,flag,kind` per line).
#[post("/api/projects/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<ProjectPath>, body: String) -> HttpResponse {
    mutate(&state, path.id, |p| import_teams_csv(p, &body))
}

#[put("/api/projects/{id}/teams/{team_id}")]
async fn api_rename_team(
    state: AppState,
    path: Path<ProjectTeamPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| p.rename_team(path.team_id, &body.name))
}

#[delete("/api/projects/{id}/teams/{team_id}")]
async fn api_delete_team(state: AppState, path: Path<ProjectTeamPath>) -> HttpResponse {
    mutate(&state, path.id, |p| p.delete_team(path.team_id))
}

/// Move a team into a group, or back to the pool.
#[put("/api/projects/{id}/teams/{team_id}/group")]
async fn api_move_team(
    state: AppState,
    path: Path<ProjectTeamPath>,
    body: Json<MoveTeamBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| p.move_team(path.team_id, body.group_id))
}

#[post("/api/projects/{id}/groups")]
async fn api_add_group(state: AppState, path: Path<ProjectPath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, path.id, |p| p.add_group(&body.name))
}

#[put("/api/projects/{id}/groups/{group_id}")]
async fn api_rename_group(
    state: AppState,
    path: Path<ProjectGroupPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| p.rename_group(path.group_id, &body.name))
}

#[delete("/api/projects/{id}/groups/{group_id}")]
async fn api_delete_group(state: AppState, path: Path<ProjectGroupPath>) -> HttpResponse {
    mutate(&state, path.id, |p| p.delete_group(path.group_id))
}

/// Random draw of the selected pool teams into all groups.
#[post("/api/projects/{id}/draw")]
async fn api_draw_teams(state: AppState, path: Path<ProjectPath>, body: Json<DrawBody>) -> HttpResponse {
    mutate(&state, path.id, |p| {
        draw_teams_into_groups(p, &body.team_ids, &mut rand::thread_rng())
    })
}

/// Draw one pool team into this group.
#[post("/api/projects/{id}/groups/{group_id}/draw")]
async fn api_draw_for_group(state: AppState, path: Path<ProjectGroupPath>) -> HttpResponse {
    mutate(&state, path.id, |p| {
        draw_team_for_group(p, path.group_id, &mut rand::thread_rng())
    })
}

#[post("/api/projects/{id}/groups/{group_id}/matches/generate")]
async fn api_generate_group_matches(state: AppState, path: Path<ProjectGroupPath>) -> HttpResponse {
    mutate(&state, path.id, |p| generate_group_matches(p, path.group_id))
}

#[post("/api/projects/{id}/matches/generate")]
async fn api_generate_all_matches(state: AppState, path: Path<ProjectPath>) -> HttpResponse {
    mutate(&state, path.id, generate_all_matches)
}

#[post("/api/projects/{id}/groups/{group_id}/matches")]
async fn api_create_match(
    state: AppState,
    path: Path<ProjectGroupPath>,
    body: Json<MatchTeamsBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| {
        create_match(p, path.group_id, body.team1_id, body.team2_id)
    })
}

#[put("/api/projects/{id}/matches/{match_id}/teams")]
async fn api_change_match_teams(
    state: AppState,
    path: Path<ProjectMatchPath>,
    body: Json<MatchTeamsBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| {
        change_match_teams(p, path.match_id, body.team1_id, body.team2_id)
    })
}

#[put("/api/projects/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<ProjectMatchPath>,
    body: Json<MatchScoreBody>,
) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, |p| {
        record_match_score(p, path.match_id, body.score1, body.score2, body.link)
    })
}

#[delete("/api/projects/{id}/matches/{match_id}/score")]
async fn api_clear_score(state: AppState, path: Path<ProjectMatchPath>) -> HttpResponse {
    mutate(&state, path.id, |p| clear_match_score(p, path.match_id))
}

#[delete("/api/projects/{id}/matches/{match_id}")]
async fn api_delete_match(state: AppState, path: Path<ProjectMatchPath>) -> HttpResponse {
    mutate(&state, path.id, |p| delete_match(p, path.match_id))
}

#[get("/api/projects/{id}/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<ProjectGroupPath>) -> HttpResponse {
    view(&state, path.id, |p| group_standings(p, path.group_id))
}

/// Generate (or regenerate) the knockout bracket; replaces any existing one.
#[post("/api/projects/{id}/knockout")]
async fn api_generate_knockout(
    state: AppState,
    path: Path<ProjectPath>,
    body: Json<KnockoutBody>,
) -> HttpResponse {
    mutate(&state, path.id, |p| generate_knockout(p, body.team_count))
}

#[put("/api/projects/{id}/knockout/{match_id}/result")]
async fn api_knockout_result(
    state: AppState,
    path: Path<ProjectMatchPath>,
    body: Json<ScoreUpdate>,
) -> HttpResponse {
    mutate(&state, path.id, |p| {
        apply_knockout_result(p, path.match_id, body.into_inner())
    })
}

#[put("/api/projects/{id}/knockout/{match_id}/slot")]
async fn api_knockout_slot(
    state: AppState,
    path: Path<ProjectMatchPath>,
    body: Json<SlotBody>,
) -> HttpResponse {
    let SlotBody { side, source } = body.into_inner();
    mutate(&state, path.id, |p| match source {
        SlotSource::Manual { name } => assign_manual(p, path.match_id, side, &name),
        SlotSource::Group { group_id, position } => {
            assign_from_group(p, path.match_id, side, group_id, position)
        }
        SlotSource::Clear => {
            assign_slot(&mut p.knockout_matches, path.match_id, side, None, None)?;
            p.touch();
            Ok(())
        }
    })
}

#[put("/api/projects/{id}/knockout/{match_id}/link")]
async fn api_knockout_link(
    state: AppState,
    path: Path<ProjectMatchPath>,
    body: Json<LinkBody>,
) -> HttpResponse {
    let link = body.into_inner().link;
    mutate(&state, path.id, |p| set_knockout_link(p, path.match_id, link))
}

/// Save a project to the data directory.
#[post("/api/projects/{id}/save")]
async fn api_save_project(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<ProjectPath>,
) -> HttpResponse {
    let project = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.get_mut(&path.id) {
            Some(entry) => {
                entry.last_activity = Instant::now();
                entry.project.clone()
            }
            None => return not_found(),
        }
    };
    match store::save_project(&config.data_dir, &project).await {
        Ok(_) => HttpResponse::Ok().json(store::ProjectSummary::of(&project)),
        Err(e) => {
            log::warn!("Saving project {} failed: {}", project.id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/saved")]
async fn api_list_saved(config: Data<ServerConfig>) -> HttpResponse {
    match store::list_saved(&config.data_dir).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Load a saved project into memory (replacing the in-memory copy, if any).
#[post("/api/saved/{id}/load")]
async fn api_load_saved(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<ProjectPath>,
) -> HttpResponse {
    let project = match store::load_project(&config.data_dir, path.id).await {
        Ok(project) => project,
        Err(e) => return storage_error(path.id, e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = project.id;
    g.insert(id, ProjectEntry::new(project));
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.project),
        None => not_found(),
    }
}

#[delete("/api/saved/{id}")]
async fn api_delete_saved(config: Data<ServerConfig>, path: Path<ProjectPath>) -> HttpResponse {
    match store::delete_saved(&config.data_dir, path.id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": path.id })),
        Err(e) => storage_error(path.id, e),
    }
}

/// Missing saves are 404; unreadable or corrupt ones are server errors.
fn storage_error(id: ProjectId, e: ProjectError) -> HttpResponse {
    match e {
        ProjectError::SavedProjectNotFound(_) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        e => {
            log::warn!("Saved project {} unusable: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_project)
        .service(api_get_project)
        .service(api_reset_project)
        .service(api_set_settings)
        .service(api_import_teams)
        .service(api_add_team)
        .service(api_move_team)
        .service(api_rename_team)
        .service(api_delete_team)
        .service(api_add_group)
        .service(api_rename_group)
        .service(api_delete_group)
        .service(api_draw_teams)
        .service(api_draw_for_group)
        .service(api_generate_group_matches)
        .service(api_generate_all_matches)
        .service(api_create_match)
        .service(api_change_match_teams)
        .service(api_record_score)
        .service(api_clear_score)
        .service(api_delete_match)
        .service(api_group_standings)
        .service(api_generate_knockout)
        .service(api_knockout_result)
        .service(api_knockout_slot)
        .service(api_knockout_link)
        .service(api_save_project)
        .service(api_list_saved)
        .service(api_load_saved)
        .service(api_delete_saved);
}
