//! Integration tests for the knockout bracket: generation and result propagation.

use tournament_draw_web::{
    apply_result, assign_from_group, assign_manual, assign_slot, bracket_champion,
    generate_bracket, generate_knockout, record_match_score, generate_group_matches,
    KnockoutMatch, Project, ProjectError, Round, ScoreUpdate, Side, TeamKind, BRACKET_SIZES,
};
use uuid::Uuid;

fn find(matches: &[KnockoutMatch], round: Round, number: u32) -> &KnockoutMatch {
    matches
        .iter()
        .find(|m| m.round == round && m.match_number == number)
        .unwrap()
}

fn id_of(matches: &[KnockoutMatch], round: Round, number: u32) -> Uuid {
    find(matches, round, number).id
}

fn fill(matches: &mut [KnockoutMatch], round: Round, number: u32, team1: &str, team2: &str) {
    let id = id_of(matches, round, number);
    assign_slot(matches, id, Side::One, Some(team1.into()), None).unwrap();
    assign_slot(matches, id, Side::Two, Some(team2.into()), None).unwrap();
}

#[test]
fn bracket_has_n_minus_one_matches() {
    for n in BRACKET_SIZES {
        let matches = generate_bracket(n);
        assert_eq!(matches.len() as u32, n - 1, "size {n}");
        let finals: Vec<_> = matches.iter().filter(|m| m.round == Round::Final).collect();
        assert_eq!(finals.len(), 1);
        assert!(matches.iter().all(|m| {
            !m.played && m.score1.is_none() && m.team1.is_none() && m.team2_source.is_none()
        }));
    }
}

#[test]
fn eight_team_bracket_rounds() {
    let matches = generate_bracket(8);
    let count = |round: Round| matches.iter().filter(|m| m.round == round).count();
    assert_eq!(count(Round::Quarter), 4);
    assert_eq!(count(Round::Semi), 2);
    assert_eq!(count(Round::Final), 1);
    assert_eq!(matches.len(), 7);
    let numbers: Vec<u32> = matches
        .iter()
        .filter(|m| m.round == Round::Quarter)
        .map(|m| m.match_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn sixty_four_team_bracket_halves_each_round() {
    let matches = generate_bracket(64);
    let expected = [
        (Round::Round64, 32),
        (Round::Round32, 16),
        (Round::Round16, 8),
        (Round::Quarter, 4),
        (Round::Semi, 2),
        (Round::Final, 1),
    ];
    for (round, count) in expected {
        assert_eq!(matches.iter().filter(|m| m.round == round).count(), count);
    }
}

#[test]
fn semi_winners_reach_the_final() {
    let mut matches = generate_bracket(4);
    fill(&mut matches, Round::Semi, 1, "A", "B");
    fill(&mut matches, Round::Semi, 2, "C", "D");

    let semi1 = id_of(&matches, Round::Semi, 1);
    apply_result(&mut matches, semi1, ScoreUpdate::new(2, 1)).unwrap();
    let final_match = find(&matches, Round::Final, 1);
    assert_eq!(final_match.team1.as_deref(), Some("A"));
    assert_eq!(
        final_match.team1_source.as_deref(),
        Some("Winner of Semi-Final 1")
    );

    let semi2 = id_of(&matches, Round::Semi, 2);
    apply_result(&mut matches, semi2, ScoreUpdate::new(0, 3)).unwrap();
    let final_match = find(&matches, Round::Final, 1);
    assert_eq!(final_match.team2.as_deref(), Some("D"));
    assert_eq!(
        final_match.team2_source.as_deref(),
        Some("Winner of Semi-Final 2")
    );
}

#[test]
fn final_result_writes_nothing_else() {
    let mut matches = generate_bracket(4);
    fill(&mut matches, Round::Final, 1, "A", "D");
    let before: Vec<KnockoutMatch> = matches
        .iter()
        .filter(|m| m.round != Round::Final)
        .cloned()
        .collect();

    let final_id = id_of(&matches, Round::Final, 1);
    apply_result(&mut matches, final_id, ScoreUpdate::new(1, 4)).unwrap();

    let after: Vec<KnockoutMatch> = matches
        .iter()
        .filter(|m| m.round != Round::Final)
        .cloned()
        .collect();
    assert_eq!(before, after);
    assert_eq!(bracket_champion(&matches), Some("D"));
}

#[test]
fn quarter_four_feeds_second_slot_of_semi_two() {
    let mut matches = generate_bracket(8);
    fill(&mut matches, Round::Quarter, 4, "G", "H");
    let q4 = id_of(&matches, Round::Quarter, 4);
    apply_result(&mut matches, q4, ScoreUpdate::new(0, 1)).unwrap();
    let semi2 = find(&matches, Round::Semi, 2);
    assert_eq!(semi2.team1, None);
    assert_eq!(semi2.team2.as_deref(), Some("H"));
    assert_eq!(semi2.team2_source.as_deref(), Some("Winner of Quarter-Final 4"));
}

#[test]
fn level_knockout_score_needs_tiebreak() {
    let mut matches = generate_bracket(2);
    fill(&mut matches, Round::Final, 1, "A", "B");
    let id = id_of(&matches, Round::Final, 1);
    assert_eq!(
        apply_result(&mut matches, id, ScoreUpdate::new(1, 1)),
        Err(ProjectError::UnresolvedKnockoutDraw)
    );
    assert!(!find(&matches, Round::Final, 1).played);

    apply_result(&mut matches, id, ScoreUpdate::new(1, 1).with_tiebreak(Side::One)).unwrap();
    assert_eq!(bracket_champion(&matches), Some("A"));
}

#[test]
fn reapplying_same_result_is_idempotent() {
    let mut matches = generate_bracket(4);
    fill(&mut matches, Round::Semi, 1, "A", "B");
    fill(&mut matches, Round::Semi, 2, "C", "D");
    let semi1 = id_of(&matches, Round::Semi, 1);
    let semi2 = id_of(&matches, Round::Semi, 2);
    let final_id = id_of(&matches, Round::Final, 1);
    apply_result(&mut matches, semi1, ScoreUpdate::new(2, 1)).unwrap();
    apply_result(&mut matches, semi2, ScoreUpdate::new(1, 0)).unwrap();
    apply_result(&mut matches, final_id, ScoreUpdate::new(3, 2)).unwrap();
    let snapshot = matches.clone();

    apply_result(&mut matches, semi1, ScoreUpdate::new(4, 1)).unwrap();
    let final_match = find(&matches, Round::Final, 1);
    assert!(final_match.played);
    assert_eq!(final_match.team1, find(&snapshot, Round::Final, 1).team1);
    assert_eq!(bracket_champion(&matches), Some("A"));
}

#[test]
fn changed_winner_invalidates_downstream_chain() {
    let mut matches = generate_bracket(8);
    fill(&mut matches, Round::Quarter, 1, "A", "B");
    fill(&mut matches, Round::Quarter, 2, "C", "D");
    fill(&mut matches, Round::Quarter, 3, "E", "F");
    fill(&mut matches, Round::Quarter, 4, "G", "H");
    for n in 1..=4 {
        let id = id_of(&matches, Round::Quarter, n);
        apply_result(&mut matches, id, ScoreUpdate::new(1, 0)).unwrap();
    }
    let s1 = id_of(&matches, Round::Semi, 1);
    let s2 = id_of(&matches, Round::Semi, 2);
    apply_result(&mut matches, s1, ScoreUpdate::new(2, 0)).unwrap();
    apply_result(&mut matches, s2, ScoreUpdate::new(0, 2)).unwrap();
    let f = id_of(&matches, Round::Final, 1);
    apply_result(&mut matches, f, ScoreUpdate::new(1, 0)).unwrap();
    assert_eq!(bracket_champion(&matches), Some("A"));

    // Quarter 1 is corrected: B won, so semi 1 and the final no longer hold.
    let q1 = id_of(&matches, Round::Quarter, 1);
    apply_result(&mut matches, q1, ScoreUpdate::new(0, 1)).unwrap();

    let semi1 = find(&matches, Round::Semi, 1);
    assert_eq!(semi1.team1.as_deref(), Some("B"));
    assert_eq!(semi1.team2.as_deref(), Some("C"));
    assert!(!semi1.played);
    assert_eq!(semi1.score1, None);

    let final_match = find(&matches, Round::Final, 1);
    assert_eq!(final_match.team1, None);
    assert_eq!(
        final_match.team1_source.as_deref(),
        Some("Winner of Semi-Final 1")
    );
    assert_eq!(final_match.team2.as_deref(), Some("G"));
    assert!(!final_match.played);
    assert_eq!(bracket_champion(&matches), None);

    // Other half of the bracket is untouched.
    assert!(find(&matches, Round::Semi, 2).played);
}

#[test]
fn unknown_knockout_match_is_an_error() {
    let mut matches = generate_bracket(4);
    let missing = Uuid::new_v4();
    assert_eq!(
        apply_result(&mut matches, missing, ScoreUpdate::new(1, 0)),
        Err(ProjectError::KnockoutMatchNotFound(missing))
    );
}

#[test]
fn regenerating_replaces_the_bracket() {
    let mut p = Project::new("Cup");
    generate_knockout(&mut p, 8).unwrap();
    let first = id_of(&p.knockout_matches, Round::Quarter, 1);
    assign_manual(&mut p, first, Side::One, "Brazil").unwrap();
    assert_eq!(generate_knockout(&mut p, 4).unwrap(), 3);
    assert!(p.knockout_matches.iter().all(|m| m.team1.is_none()));
    assert!(p.knockout_matches.iter().all(|m| m.id != first));
}

#[test]
fn slot_from_group_standings() {
    let mut p = Project::new("Cup");
    let g = p.add_group("Group A").unwrap();
    for name in ["Spain", "Italy"] {
        let id = p.add_team(name, "", TeamKind::Country).unwrap();
        p.move_team(id, Some(g)).unwrap();
    }
    generate_group_matches(&mut p, g).unwrap();
    let m = p.matches[0].clone();
    // Italy (team2) wins, so tops the table despite being added second.
    record_match_score(&mut p, m.id, 0, 2, None).unwrap();

    generate_knockout(&mut p, 2).unwrap();
    let final_id = id_of(&p.knockout_matches, Round::Final, 1);
    assign_from_group(&mut p, final_id, Side::One, g, 1).unwrap();
    assign_from_group(&mut p, final_id, Side::Two, g, 2).unwrap();

    let final_match = find(&p.knockout_matches, Round::Final, 1);
    assert_eq!(final_match.team1.as_deref(), Some("Italy"));
    assert_eq!(final_match.team1_source.as_deref(), Some("1st Place Group A"));
    assert_eq!(final_match.team2.as_deref(), Some("Spain"));
    assert_eq!(final_match.team2_source.as_deref(), Some("2nd Place Group A"));

    assert_eq!(
        assign_from_group(&mut p, final_id, Side::One, g, 3),
        Err(ProjectError::PositionOutOfRange { position: 3 })
    );
}
