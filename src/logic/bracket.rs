//! Knockout bracket generation.

use crate::models::{KnockoutMatch, Project, ProjectError, Round};

/// Bracket sizes the organizer offers.
pub const BRACKET_SIZES: [u32; 6] = [2, 4, 8, 16, 32, 64];

pub fn is_supported_bracket_size(team_count: u32) -> bool {
    BRACKET_SIZES.contains(&team_count)
}

/// Rounds needed for `team_count` teams, largest first.
pub fn rounds_for(team_count: u32) -> Vec<Round> {
    Round::ALL
        .into_iter()
        .filter(|round| match round {
            Round::Round64 => team_count == 64,
            other => team_count >= other.min_teams(),
        })
        .collect()
}

/// Empty knockout slots for `team_count` teams: `team_count - 1` matches,
/// numbered from 1 within each round.
///
/// Sizes outside [`BRACKET_SIZES`] are not validated here; see
/// [`generate_knockout`].
pub fn generate_bracket(team_count: u32) -> Vec<KnockoutMatch> {
    let mut matches = Vec::new();
    for (round_index, round) in rounds_for(team_count).into_iter().enumerate() {
        let in_round = team_count >> (round_index + 1);
        matches.extend((1..=in_round).map(|number| KnockoutMatch::empty(round, number)));
    }
    matches
}

/// Replace the project's bracket with a fresh one.
pub fn generate_knockout(project: &mut Project, team_count: u32) -> Result<usize, ProjectError> {
    if !is_supported_bracket_size(team_count) {
        return Err(ProjectError::UnsupportedBracketSize(team_count));
    }
    project.knockout_matches = generate_bracket(team_count);
    log::info!(
        "Generated {}-team bracket ({} matches) for project {}",
        team_count,
        project.knockout_matches.len(),
        project.id
    );
    project.touch();
    Ok(project.knockout_matches.len())
}
