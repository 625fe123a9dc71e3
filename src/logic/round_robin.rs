//! Group stage: round-robin match generation and match bookkeeping.

use crate::models::{
    GameMatch, GroupId, MatchId, MatchLink, Project, ProjectError, Team, TeamId,
    TournamentSettings,
};

/// Every unordered pair of `teams` exactly once, in index order.
///
/// For `i < j` the match is `teams[i]` vs `teams[j]`, with `i` ascending then
/// `j` ascending. Fewer than two teams yields no matches.
pub fn generate_round_robin(group_id: GroupId, teams: &[Team]) -> Vec<GameMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            matches.push(GameMatch::new(group_id, home.id, away.id));
        }
    }
    matches
}

/// Round robin played `legs` times; even legs swap team1/team2 (return leg).
pub fn generate_round_robin_legs(
    group_id: GroupId,
    teams: &[Team],
    legs: u8,
) -> Result<Vec<GameMatch>, ProjectError> {
    if legs == 0 || legs > TournamentSettings::MAX_LEGS {
        return Err(ProjectError::InvalidLegs(legs));
    }
    let single = generate_round_robin(group_id, teams);
    let mut matches = Vec::with_capacity(single.len() * legs as usize);
    for leg in 1..=legs {
        let swap = leg % 2 == 0;
        matches.extend(single.iter().map(|m| {
            if swap {
                GameMatch::new(group_id, m.team2_id, m.team1_id)
            } else {
                GameMatch::new(group_id, m.team1_id, m.team2_id)
            }
        }));
    }
    Ok(matches)
}

/// Regenerate one group's matches using the project's leg setting.
///
/// Matches of other groups are untouched. A group with fewer than two teams
/// keeps whatever it had. Returns the number of generated matches.
pub fn generate_group_matches(
    project: &mut Project,
    group_id: GroupId,
) -> Result<usize, ProjectError> {
    let group = project.group(group_id)?;
    if !group.can_generate_matches() {
        log::debug!("Group {} has fewer than 2 teams, no matches generated", group.name);
        return Ok(0);
    }
    let generated = generate_round_robin_legs(group_id, &group.teams, project.settings.rounds)?;
    let count = generated.len();
    log::debug!("Generated {} matches for group {}", count, group.name);
    project.matches.retain(|m| m.group_id != group_id);
    project.matches.extend(generated);
    project.touch();
    Ok(count)
}

/// Replace every group's matches at once.
pub fn generate_all_matches(project: &mut Project) -> Result<usize, ProjectError> {
    let legs = project.settings.rounds;
    let mut all = Vec::new();
    for group in &project.groups {
        all.extend(generate_round_robin_legs(group.id, &group.teams, legs)?);
    }
    let count = all.len();
    log::info!("Generated {} matches across {} groups", count, project.groups.len());
    project.matches = all;
    project.touch();
    Ok(count)
}

fn check_pair(
    project: &Project,
    group_id: GroupId,
    team1: TeamId,
    team2: TeamId,
) -> Result<(), ProjectError> {
    if team1 == team2 {
        return Err(ProjectError::SameTeam);
    }
    let group = project.group(group_id)?;
    for team in [team1, team2] {
        if !group.contains(team) {
            return Err(ProjectError::TeamNotInGroup {
                team,
                group: group_id,
            });
        }
    }
    Ok(())
}

fn match_mut(project: &mut Project, id: MatchId) -> Result<&mut GameMatch, ProjectError> {
    project
        .matches
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(ProjectError::MatchNotFound(id))
}

/// Add a single unplayed match between two teams of a group.
pub fn create_match(
    project: &mut Project,
    group_id: GroupId,
    team1: TeamId,
    team2: TeamId,
) -> Result<MatchId, ProjectError> {
    check_pair(project, group_id, team1, team2)?;
    let m = GameMatch::new(group_id, team1, team2);
    let id = m.id;
    project.matches.push(m);
    project.touch();
    Ok(id)
}

/// Change who plays; the score is reset.
pub fn change_match_teams(
    project: &mut Project,
    match_id: MatchId,
    team1: TeamId,
    team2: TeamId,
) -> Result<(), ProjectError> {
    let group_id = project
        .matches
        .iter()
        .find(|m| m.id == match_id)
        .map(|m| m.group_id)
        .ok_or(ProjectError::MatchNotFound(match_id))?;
    check_pair(project, group_id, team1, team2)?;
    let m = match_mut(project, match_id)?;
    m.team1_id = team1;
    m.team2_id = team2;
    m.clear();
    project.touch();
    Ok(())
}

/// Record (or overwrite) a score. `link` replaces any previous link.
pub fn record_match_score(
    project: &mut Project,
    match_id: MatchId,
    score1: u32,
    score2: u32,
    link: Option<MatchLink>,
) -> Result<(), ProjectError> {
    let m = match_mut(project, match_id)?;
    m.record(score1, score2);
    m.link = link;
    project.touch();
    Ok(())
}

/// Back to unplayed.
pub fn clear_match_score(project: &mut Project, match_id: MatchId) -> Result<(), ProjectError> {
    match_mut(project, match_id)?.clear();
    project.touch();
    Ok(())
}

pub fn delete_match(project: &mut Project, match_id: MatchId) -> Result<(), ProjectError> {
    let before = project.matches.len();
    project.matches.retain(|m| m.id != match_id);
    if project.matches.len() == before {
        return Err(ProjectError::MatchNotFound(match_id));
    }
    project.touch();
    Ok(())
}
