//! Knockout bracket: rounds, matches and slot provenance.

use crate::models::game::{MatchId, MatchLink, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Knockout round, in bracket order from the largest round to the final.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Round64,
    Round32,
    Round16,
    Quarter,
    Semi,
    Final,
}

impl Round {
    pub const ALL: [Round; 6] = [
        Round::Round64,
        Round::Round32,
        Round::Round16,
        Round::Quarter,
        Round::Semi,
        Round::Final,
    ];

    /// The round a winner of this round advances to; `None` after the final.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::Round64 => Some(Round::Round32),
            Round::Round32 => Some(Round::Round16),
            Round::Round16 => Some(Round::Quarter),
            Round::Quarter => Some(Round::Semi),
            Round::Semi => Some(Round::Final),
            Round::Final => None,
        }
    }

    /// Smallest bracket size that includes this round.
    pub fn min_teams(self) -> u32 {
        match self {
            Round::Round64 => 64,
            Round::Round32 => 32,
            Round::Round16 => 16,
            Round::Quarter => 8,
            Round::Semi => 4,
            Round::Final => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Round::Round64 => "Round of 64",
            Round::Round32 => "Round of 32",
            Round::Round16 => "Round of 16",
            Round::Quarter => "Quarter-Final",
            Round::Semi => "Semi-Final",
            Round::Final => "Final",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Human-readable reason a slot holds its label.
pub struct Provenance;

impl Provenance {
    pub fn manual() -> String {
        "Manual Entry".to_string()
    }

    /// e.g. "1st Place Group A".
    pub fn group_position(position: usize, group_name: &str) -> String {
        format!("{} Place {}", ordinal(position), group_name)
    }

    /// e.g. "Winner of Quarter-Final 2".
    pub fn winner_of(round: Round, match_number: u32) -> String {
        format!("Winner of {} {}", round.display_name(), match_number)
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// One knockout match. Slots hold display labels, not team ids, since a slot
/// may be filled manually or by a winner that is not known yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutMatch {
    pub id: MatchId,
    pub round: Round,
    /// 1-based, unique within its round.
    pub match_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_source: Option<String>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub played: bool,
    /// Decided side; set together with the scores (covers tiebreak-decided draws).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<MatchLink>,
}

impl KnockoutMatch {
    /// Empty slot pair: no labels, no scores.
    pub fn empty(round: Round, match_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            team1: None,
            team2: None,
            team1_source: None,
            team2_source: None,
            score1: None,
            score2: None,
            played: false,
            winner: None,
            link: None,
        }
    }

    pub fn label(&self, side: Side) -> Option<&str> {
        match side {
            Side::One => self.team1.as_deref(),
            Side::Two => self.team2.as_deref(),
        }
    }

    pub(crate) fn set_slot(&mut self, side: Side, label: Option<String>, source: Option<String>) {
        match side {
            Side::One => {
                self.team1 = label;
                self.team1_source = source;
            }
            Side::Two => {
                self.team2 = label;
                self.team2_source = source;
            }
        }
    }

    pub(crate) fn clear_result(&mut self) {
        self.score1 = None;
        self.score2 = None;
        self.played = false;
        self.winner = None;
    }

    /// Label of the decided winner, if played.
    pub fn winner_label(&self) -> Option<&str> {
        if !self.played {
            return None;
        }
        self.winner.and_then(|side| self.label(side))
    }
}
