//! Random draw: deal unassigned teams into groups.

use crate::models::{GroupId, Project, ProjectError, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle the selected pool teams and deal them into groups.
///
/// Each team goes to one of the currently smallest groups (ties broken at
/// random), so group sizes never differ by more than they did before plus
/// one. Ids that are not in the pool are ignored. Returns the `(team, group)`
/// assignments in draw order.
pub fn draw_teams_into_groups<R: Rng + ?Sized>(
    project: &mut Project,
    team_ids: &[TeamId],
    rng: &mut R,
) -> Result<Vec<(TeamId, GroupId)>, ProjectError> {
    if project.groups.is_empty() {
        return Err(ProjectError::NoGroups);
    }
    let mut queue: Vec<TeamId> = project
        .unassigned
        .iter()
        .map(|t| t.id)
        .filter(|id| team_ids.contains(id))
        .collect();
    if queue.is_empty() {
        return Err(ProjectError::NoTeamsToDraw);
    }
    queue.shuffle(rng);

    let mut assignments = Vec::with_capacity(queue.len());
    for team_id in queue {
        let smallest = project
            .groups
            .iter()
            .map(|g| g.teams.len())
            .min()
            .unwrap_or_default();
        let candidates: Vec<GroupId> = project
            .groups
            .iter()
            .filter(|g| g.teams.len() == smallest)
            .map(|g| g.id)
            .collect();
        let Some(&group_id) = candidates.choose(rng) else {
            break;
        };
        project.move_team(team_id, Some(group_id))?;
        assignments.push((team_id, group_id));
    }
    log::info!("Drew {} teams into {} groups", assignments.len(), project.groups.len());
    Ok(assignments)
}

/// Move one random pool team into `group_id`. Returns the drawn team.
pub fn draw_team_for_group<R: Rng + ?Sized>(
    project: &mut Project,
    group_id: GroupId,
    rng: &mut R,
) -> Result<TeamId, ProjectError> {
    project.group(group_id)?;
    let team_id = project
        .unassigned
        .choose(rng)
        .map(|t| t.id)
        .ok_or(ProjectError::NoTeamsToDraw)?;
    project.move_team(team_id, Some(group_id))?;
    Ok(team_id)
}
