//! Group standings: points table with tie-break ordering.

use crate::models::{GameMatch, GroupId, PointsScheme, Project, ProjectError, Team, TeamId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of a group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingRow {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn add_result(&mut self, scored: u32, conceded: u32, points: &PointsScheme) {
        // Scores and points are user input: totals saturate instead of overflowing.
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        let awarded = match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                points.win
            }
            Ordering::Less => {
                self.losses += 1;
                points.loss
            }
            Ordering::Equal => {
                self.draws += 1;
                points.draw
            }
        };
        self.points = self.points.saturating_add(awarded);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// Points, then goal difference, then goals scored (all descending), then name.
fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.name.cmp(&b.name))
}

/// Standings with the classic 3/1/0 points.
pub fn compute_standings(teams: &[Team], matches: &[GameMatch]) -> Vec<StandingRow> {
    compute_standings_with(teams, matches, &PointsScheme::default())
}

/// Ranked table, one row per team in `teams`.
///
/// Unplayed matches count for nothing; matches naming a team outside `teams`
/// are skipped.
pub fn compute_standings_with(
    teams: &[Team],
    matches: &[GameMatch],
    points: &PointsScheme,
) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = teams.iter().map(StandingRow::new).collect();
    let index: HashMap<TeamId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.team_id, i))
        .collect();

    for m in matches {
        let Some((s1, s2)) = m.scores() else {
            continue;
        };
        let (Some(&i1), Some(&i2)) = (index.get(&m.team1_id), index.get(&m.team2_id)) else {
            continue;
        };
        rows[i1].add_result(s1, s2, points);
        rows[i2].add_result(s2, s1, points);
    }

    rows.sort_by(compare_rows);
    rows
}

/// Table of one group using the project's points setting.
pub fn group_standings(
    project: &Project,
    group_id: GroupId,
) -> Result<Vec<StandingRow>, ProjectError> {
    let group = project.group(group_id)?;
    let matches: Vec<GameMatch> = project
        .matches
        .iter()
        .filter(|m| m.group_id == group_id)
        .cloned()
        .collect();
    Ok(compute_standings_with(
        &group.teams,
        &matches,
        &project.settings.points(),
    ))
}
