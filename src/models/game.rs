//! Group-stage match, match side and optional link metadata.

use crate::models::group::GroupId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (group stage or knockout).
pub type MatchId = Uuid;

/// One of the two sides of a match (or slots of a knockout match).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Supplementary link attached to a match (stream, highlights, ...).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchLink {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A group-stage match between two teams of the same group.
///
/// `played` is true iff both scores are set; use [`GameMatch::record`] and
/// [`GameMatch::clear`] rather than touching the fields directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMatch {
    pub id: MatchId,
    pub group_id: GroupId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub played: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<MatchLink>,
}

impl GameMatch {
    pub fn new(group_id: GroupId, team1_id: TeamId, team2_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            team1_id,
            team2_id,
            score1: None,
            score2: None,
            played: false,
            link: None,
        }
    }

    pub fn record(&mut self, score1: u32, score2: u32) {
        self.score1 = Some(score1);
        self.score2 = Some(score2);
        self.played = true;
    }

    pub fn clear(&mut self) {
        self.score1 = None;
        self.score2 = None;
        self.played = false;
    }

    /// Both scores, only when the match has been played.
    pub fn scores(&self) -> Option<(u32, u32)> {
        match (self.played, self.score1, self.score2) {
            (true, Some(s1), Some(s2)) => Some((s1, s2)),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }
}
