//! Tournament settings: round-robin legs and points per result.

use serde::{Deserialize, Serialize};

/// Points awarded per result in the group stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsScheme {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsScheme {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    /// Round-robin legs (1, 2 or 3).
    pub rounds: u8,
    pub points_win: u32,
    pub points_draw: u32,
    pub points_loss: u32,
}

impl TournamentSettings {
    pub const MAX_LEGS: u8 = 3;

    pub fn points(&self) -> PointsScheme {
        PointsScheme {
            win: self.points_win,
            draw: self.points_draw,
            loss: self.points_loss,
        }
    }
}

impl Default for TournamentSettings {
    fn default() -> Self {
        let points = PointsScheme::default();
        Self {
            rounds: 1,
            points_win: points.win,
            points_draw: points.draw,
            points_loss: points.loss,
        }
    }
}
