//! Knockout results: winner decision and propagation through the bracket.
//!
//! A single-elimination bracket is a binary tree folded by match number:
//! matches 1 and 2 of a round feed match 1 of the next round (slots one and
//! two), matches 3 and 4 feed match 2, and so on. Every slot write goes
//! through [`write_slot`], which also invalidates downstream results whose
//! participants changed.

use crate::logic::standings::group_standings;
use crate::models::{
    GroupId, KnockoutMatch, MatchId, MatchLink, Project, ProjectError, Provenance, Round, Side,
};
use serde::Deserialize;
use std::cmp::Ordering;

/// Score submitted for a knockout match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub score1: u32,
    pub score2: u32,
    /// Decides a level score (penalties, coin toss, ...). Ignored otherwise.
    #[serde(default)]
    pub tiebreak_winner: Option<Side>,
    /// Replaces the match link when present.
    #[serde(default)]
    pub link: Option<MatchLink>,
}

impl ScoreUpdate {
    pub fn new(score1: u32, score2: u32) -> Self {
        Self {
            score1,
            score2,
            ..Self::default()
        }
    }

    pub fn with_tiebreak(mut self, winner: Side) -> Self {
        self.tiebreak_winner = Some(winner);
        self
    }

    /// Winning side; level scores need a tiebreak winner.
    pub fn winner(&self) -> Result<Side, ProjectError> {
        match self.score1.cmp(&self.score2) {
            Ordering::Greater => Ok(Side::One),
            Ordering::Less => Ok(Side::Two),
            Ordering::Equal => self
                .tiebreak_winner
                .ok_or(ProjectError::UnresolvedKnockoutDraw),
        }
    }
}

/// Match number and slot in the next round fed by `match_number`.
///
/// Numbers are 1-based; a 0 from a hand-edited save is treated as 1.
pub fn next_slot(match_number: u32) -> (u32, Side) {
    let index = match_number.saturating_sub(1);
    let next_number = index / 2 + 1;
    let side = if index % 2 == 0 {
        Side::One
    } else {
        Side::Two
    };
    (next_number, side)
}

fn position(matches: &[KnockoutMatch], match_id: MatchId) -> Result<usize, ProjectError> {
    matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(ProjectError::KnockoutMatchNotFound(match_id))
}

fn find_slot_match(matches: &[KnockoutMatch], round: Round, match_number: u32) -> Option<usize> {
    matches
        .iter()
        .position(|m| m.round == round && m.match_number == match_number)
}

/// Record a result and push the winner into the next round.
///
/// Re-recording the same winner is a no-op downstream. Recording a different
/// winner replaces the next slot and clears any result that depended on the
/// previous occupant, all the way to the final.
pub fn apply_result(
    matches: &mut [KnockoutMatch],
    match_id: MatchId,
    update: ScoreUpdate,
) -> Result<(), ProjectError> {
    let idx = position(matches, match_id)?;
    let winner = update.winner()?;

    let m = &mut matches[idx];
    m.score1 = Some(update.score1);
    m.score2 = Some(update.score2);
    m.played = true;
    m.winner = Some(winner);
    if update.link.is_some() {
        m.link = update.link;
    }
    log::debug!(
        "{} {} recorded {}-{}",
        m.round,
        m.match_number,
        update.score1,
        update.score2
    );

    propagate(matches, idx);
    Ok(())
}

/// Write the current winner of `matches[idx]` (or nothing, if unplayed) into
/// the slot it feeds. The final feeds nothing.
fn propagate(matches: &mut [KnockoutMatch], idx: usize) {
    let m = &matches[idx];
    let Some(next_round) = m.round.next() else {
        return;
    };
    let label = m.winner_label().map(str::to_owned);
    let source = Provenance::winner_of(m.round, m.match_number);
    let (next_number, side) = next_slot(m.match_number);
    let Some(next_idx) = find_slot_match(matches, next_round, next_number) else {
        return;
    };
    write_slot(matches, next_idx, side, label, Some(source));
}

/// Set one slot. If the occupant changes on a played match, its result no
/// longer holds: clear it and propagate the now-empty winner onward.
fn write_slot(
    matches: &mut [KnockoutMatch],
    idx: usize,
    side: Side,
    label: Option<String>,
    source: Option<String>,
) {
    let target = &mut matches[idx];
    let changed = target.label(side) != label.as_deref();
    target.set_slot(side, label, source);
    if changed && target.played {
        log::debug!(
            "{} {} participants changed, clearing its result",
            target.round,
            target.match_number
        );
        target.clear_result();
        propagate(matches, idx);
    }
}

/// Fill a slot by hand (manual label or group placement).
pub fn assign_slot(
    matches: &mut [KnockoutMatch],
    match_id: MatchId,
    side: Side,
    label: Option<String>,
    source: Option<String>,
) -> Result<(), ProjectError> {
    let idx = position(matches, match_id)?;
    let label = label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    write_slot(matches, idx, side, label, source);
    Ok(())
}

/// Record a knockout result on the project's bracket.
pub fn apply_knockout_result(
    project: &mut Project,
    match_id: MatchId,
    update: ScoreUpdate,
) -> Result<(), ProjectError> {
    apply_result(&mut project.knockout_matches, match_id, update)?;
    project.touch();
    Ok(())
}

/// Put a manually named team into a slot.
pub fn assign_manual(
    project: &mut Project,
    match_id: MatchId,
    side: Side,
    name: &str,
) -> Result<(), ProjectError> {
    if name.trim().is_empty() {
        return Err(ProjectError::EmptyName);
    }
    assign_slot(
        &mut project.knockout_matches,
        match_id,
        side,
        Some(name.to_string()),
        Some(Provenance::manual()),
    )?;
    project.touch();
    Ok(())
}

/// Put the team currently at `position` (1-based) of a group table into a slot.
pub fn assign_from_group(
    project: &mut Project,
    match_id: MatchId,
    side: Side,
    group_id: GroupId,
    position: usize,
) -> Result<(), ProjectError> {
    let table = group_standings(project, group_id)?;
    let row = position
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .ok_or(ProjectError::PositionOutOfRange { position })?;
    let group_name = project.group(group_id)?.name.clone();
    let label = row.name.clone();
    assign_slot(
        &mut project.knockout_matches,
        match_id,
        side,
        Some(label),
        Some(Provenance::group_position(position, &group_name)),
    )?;
    project.touch();
    Ok(())
}

/// Attach or remove a link on a knockout match.
pub fn set_knockout_link(
    project: &mut Project,
    match_id: MatchId,
    link: Option<MatchLink>,
) -> Result<(), ProjectError> {
    let idx = position(&project.knockout_matches, match_id)?;
    project.knockout_matches[idx].link = link;
    project.touch();
    Ok(())
}

/// Winner of the played final, if any.
pub fn bracket_champion(matches: &[KnockoutMatch]) -> Option<&str> {
    matches
        .iter()
        .find(|m| m.round == Round::Final)
        .and_then(KnockoutMatch::winner_label)
}
