//! Project: every collection the organizer works on, and ProjectError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::group::{Group, GroupId};
use crate::models::knockout::KnockoutMatch;
use crate::models::settings::TournamentSettings;
use crate::models::team::{Glyph, Team, TeamId, TeamKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during project operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProjectError {
    #[error("Team not found")]
    TeamNotFound(TeamId),
    #[error("Group not found")]
    GroupNotFound(GroupId),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Knockout match not found")]
    KnockoutMatchNotFound(MatchId),
    #[error("Name must not be empty")]
    EmptyName,
    /// A match needs two distinct teams.
    #[error("A team cannot play against itself")]
    SameTeam,
    #[error("Team does not belong to this group")]
    TeamNotInGroup { team: TeamId, group: GroupId },
    /// No team at that position of the group table.
    #[error("Group has no team at position {position}")]
    PositionOutOfRange { position: usize },
    #[error("Unsupported bracket size {0} (use 2, 4, 8, 16, 32 or 64)")]
    UnsupportedBracketSize(u32),
    /// Knockout matches cannot end level without a tiebreak winner.
    #[error("Knockout match ended level; a tiebreak winner is required")]
    UnresolvedKnockoutDraw,
    #[error("Round-robin legs must be between 1 and 3 (got {0})")]
    InvalidLegs(u8),
    #[error("No groups created")]
    NoGroups,
    #[error("No teams to draw")]
    NoTeamsToDraw,
    #[error("Import failed: {0}")]
    Import(String),
    #[error("No saved project {0}")]
    SavedProjectNotFound(ProjectId),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Unique identifier for a project.
pub type ProjectId = Uuid;

/// Where a team currently lives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "group")]
pub enum TeamLocation {
    Unassigned,
    Group(GroupId),
}

/// Full organizer state: teams, groups, group matches, bracket and settings.
///
/// A team is owned by exactly one container: `unassigned` or one group.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Teams not assigned to any group.
    pub unassigned: Vec<Team>,
    pub groups: Vec<Group>,
    /// Group-stage matches of every group.
    pub matches: Vec<GameMatch>,
    pub knockout_matches: Vec<KnockoutMatch>,
    #[serde(default)]
    pub settings: TournamentSettings,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            unassigned: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            knockout_matches: Vec::new(),
            settings: TournamentSettings::default(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, ProjectError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(ProjectError::GroupNotFound(id))
    }

    pub fn group_mut(&mut self, id: GroupId) -> Result<&mut Group, ProjectError> {
        self.groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ProjectError::GroupNotFound(id))
    }

    /// Look up a team in the pool or any group.
    pub fn find_team(&self, id: TeamId) -> Option<&Team> {
        self.unassigned
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.teams.iter()))
            .find(|t| t.id == id)
    }

    pub fn team_location(&self, id: TeamId) -> Option<TeamLocation> {
        if self.unassigned.iter().any(|t| t.id == id) {
            return Some(TeamLocation::Unassigned);
        }
        self.groups
            .iter()
            .find(|g| g.contains(id))
            .map(|g| TeamLocation::Group(g.id))
    }

    /// All teams of every container.
    pub fn team_count(&self) -> usize {
        self.unassigned.len() + self.groups.iter().map(|g| g.teams.len()).sum::<usize>()
    }

    /// Add a team to the unassigned pool. Returns its id.
    pub fn add_team(
        &mut self,
        name: &str,
        flag: &str,
        kind: TeamKind,
    ) -> Result<TeamId, ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        let team = Team::new(name, Glyph::parse(flag), kind);
        let id = team.id;
        self.unassigned.push(team);
        self.touch();
        Ok(id)
    }

    /// Rename a team wherever it lives.
    pub fn rename_team(&mut self, id: TeamId, name: &str) -> Result<(), ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        let team = self
            .unassigned
            .iter_mut()
            .chain(self.groups.iter_mut().flat_map(|g| g.teams.iter_mut()))
            .find(|t| t.id == id)
            .ok_or(ProjectError::TeamNotFound(id))?;
        team.name = name.to_string();
        self.touch();
        Ok(())
    }

    /// Delete a team and every group match it plays in.
    pub fn delete_team(&mut self, id: TeamId) -> Result<(), ProjectError> {
        self.take_team(id)?;
        self.matches.retain(|m| !m.involves(id));
        self.touch();
        Ok(())
    }

    /// Move a team to a group (`Some`) or back to the pool (`None`).
    ///
    /// Moving a team to the container it is already in does nothing. Group
    /// matches of the old group that involve the team are left in place; they
    /// are replaced the next time matches are generated.
    pub fn move_team(&mut self, id: TeamId, target: Option<GroupId>) -> Result<(), ProjectError> {
        let current = self
            .team_location(id)
            .ok_or(ProjectError::TeamNotFound(id))?;
        let wanted = match target {
            Some(group_id) => {
                self.group(group_id)?;
                TeamLocation::Group(group_id)
            }
            None => TeamLocation::Unassigned,
        };
        if current == wanted {
            return Ok(());
        }
        let team = self.take_team(id)?;
        match wanted {
            TeamLocation::Unassigned => self.unassigned.push(team),
            TeamLocation::Group(group_id) => self.group_mut(group_id)?.teams.push(team),
        }
        log::debug!("Moved team {} from {:?} to {:?}", id, current, wanted);
        self.touch();
        Ok(())
    }

    /// Remove a team from whichever container holds it.
    fn take_team(&mut self, id: TeamId) -> Result<Team, ProjectError> {
        if let Some(idx) = self.unassigned.iter().position(|t| t.id == id) {
            return Ok(self.unassigned.remove(idx));
        }
        for group in &mut self.groups {
            if let Some(idx) = group.teams.iter().position(|t| t.id == id) {
                return Ok(group.teams.remove(idx));
            }
        }
        Err(ProjectError::TeamNotFound(id))
    }

    /// Add an empty group. Returns its id.
    pub fn add_group(&mut self, name: &str) -> Result<GroupId, ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        let group = Group::new(name);
        let id = group.id;
        self.groups.push(group);
        self.touch();
        Ok(id)
    }

    pub fn rename_group(&mut self, id: GroupId, name: &str) -> Result<(), ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        self.group_mut(id)?.name = name.to_string();
        self.touch();
        Ok(())
    }

    /// Delete a group: its teams go back to the pool and its matches are dropped.
    pub fn delete_group(&mut self, id: GroupId) -> Result<(), ProjectError> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(ProjectError::GroupNotFound(id))?;
        let group = self.groups.remove(idx);
        self.unassigned.extend(group.teams);
        self.matches.retain(|m| m.group_id != id);
        self.touch();
        Ok(())
    }

    /// Start over with an empty project of the same name and settings.
    pub fn reset(&mut self) {
        let name = std::mem::take(&mut self.name);
        let settings = self.settings;
        let id = self.id;
        *self = Self::new(name);
        self.id = id;
        self.settings = settings;
    }

    /// Replace the settings. Legs outside 1..=3 are rejected.
    pub fn set_settings(&mut self, settings: TournamentSettings) -> Result<(), ProjectError> {
        if settings.rounds == 0 || settings.rounds > TournamentSettings::MAX_LEGS {
            return Err(ProjectError::InvalidLegs(settings.rounds));
        }
        self.settings = settings;
        self.touch();
        Ok(())
    }
}
