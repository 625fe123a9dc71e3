//! Tournament engine: round robin, standings, bracket, result propagation, draw.

mod bracket;
mod draw;
mod import;
mod progression;
mod round_robin;
mod standings;

pub use bracket::{
    generate_bracket, generate_knockout, is_supported_bracket_size, rounds_for, BRACKET_SIZES,
};
pub use draw::{draw_team_for_group, draw_teams_into_groups};
pub use import::import_teams_csv;
pub use progression::{
    apply_knockout_result, apply_result, assign_from_group, assign_manual, assign_slot,
    bracket_champion, next_slot, set_knockout_link, ScoreUpdate,
};
pub use round_robin::{
    change_match_teams, clear_match_score, create_match, delete_match, generate_all_matches,
    generate_group_matches, generate_round_robin, generate_round_robin_legs, record_match_score,
};
pub use standings::{compute_standings, compute_standings_with, group_standings, StandingRow};
