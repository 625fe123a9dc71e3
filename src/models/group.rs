//! Group of teams for the group stage.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A group "contains" teams; a team lives in at most one group at a time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.teams.iter().any(|t| t.id == team_id)
    }

    /// Round robin needs at least two teams.
    pub fn can_generate_matches(&self) -> bool {
        self.teams.len() >= 2
    }
}
