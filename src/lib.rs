//! Tournament organizer: groups, random draw, round robin, standings and a
//! single-elimination bracket, behind a small JSON web API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    apply_knockout_result, apply_result, assign_from_group, assign_manual, assign_slot,
    bracket_champion, change_match_teams, clear_match_score, compute_standings,
    compute_standings_with, create_match, delete_match, draw_team_for_group,
    draw_teams_into_groups, generate_all_matches, generate_bracket, generate_group_matches,
    generate_knockout, generate_round_robin, generate_round_robin_legs, group_standings,
    import_teams_csv, is_supported_bracket_size, next_slot, record_match_score, rounds_for,
    set_knockout_link, ScoreUpdate, StandingRow, BRACKET_SIZES,
};
pub use models::{
    GameMatch, Glyph, Group, GroupId, KnockoutMatch, MatchId, MatchLink, PointsScheme, Project,
    ProjectError, ProjectId, Provenance, Round, Side, Team, TeamId, TeamKind, TeamLocation,
    TournamentSettings,
};
