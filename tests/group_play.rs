//! Integration tests for the group stage: round robin and standings.

use std::collections::HashSet;
use tournament_draw_web::{
    compute_standings, create_match, generate_all_matches, generate_group_matches,
    generate_round_robin, group_standings, record_match_score, GameMatch, Project, ProjectError,
    Team, TeamKind, TournamentSettings,
};
use uuid::Uuid;

fn teams(names: &[&str]) -> Vec<Team> {
    names.iter().map(|n| Team::named(*n)).collect()
}

fn played(group: Uuid, a: &Team, b: &Team, s1: u32, s2: u32) -> GameMatch {
    let mut m = GameMatch::new(group, a.id, b.id);
    m.record(s1, s2);
    m
}

#[test]
fn round_robin_needs_two_teams() {
    let group = Uuid::new_v4();
    assert!(generate_round_robin(group, &[]).is_empty());
    assert!(generate_round_robin(group, &teams(&["A"])).is_empty());
}

#[test]
fn round_robin_covers_every_pair_once() {
    let group = Uuid::new_v4();
    for n in 2..=8 {
        let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let t: Vec<Team> = names.iter().map(Team::named).collect();
        let matches = generate_round_robin(group, &t);
        assert_eq!(matches.len(), n * (n - 1) / 2);

        let mut pairs = HashSet::new();
        for m in &matches {
            assert_ne!(m.team1_id, m.team2_id);
            assert_eq!(m.group_id, group);
            assert!(!m.played);
            let key = if m.team1_id < m.team2_id {
                (m.team1_id, m.team2_id)
            } else {
                (m.team2_id, m.team1_id)
            };
            assert!(pairs.insert(key), "pair generated twice");
        }
    }
}

#[test]
fn round_robin_order_is_deterministic() {
    let group = Uuid::new_v4();
    let t = teams(&["A", "B", "C", "D"]);
    let order = |ms: Vec<GameMatch>| -> Vec<(Uuid, Uuid)> {
        ms.into_iter().map(|m| (m.team1_id, m.team2_id)).collect()
    };
    let first = order(generate_round_robin(group, &t));
    let second = order(generate_round_robin(group, &t));
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            (t[0].id, t[1].id),
            (t[0].id, t[2].id),
            (t[0].id, t[3].id),
            (t[1].id, t[2].id),
            (t[1].id, t[3].id),
            (t[2].id, t[3].id),
        ]
    );
}

#[test]
fn three_team_group_scenario() {
    let group = Uuid::new_v4();
    let t = teams(&["A", "B", "C"]);
    let mut matches = generate_round_robin(group, &t);
    assert_eq!(matches.len(), 3);
    assert_eq!((matches[0].team1_id, matches[0].team2_id), (t[0].id, t[1].id));
    assert_eq!((matches[1].team1_id, matches[1].team2_id), (t[0].id, t[2].id));
    assert_eq!((matches[2].team1_id, matches[2].team2_id), (t[1].id, t[2].id));

    matches[0].record(2, 0);
    matches[1].record(1, 1);
    matches[2].record(3, 1);

    let table = compute_standings(&t, &matches);
    let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    assert_eq!((table[0].points, table[0].wins, table[0].draws), (4, 1, 1));
    assert_eq!(table[0].goal_difference, 2);
    assert_eq!((table[1].points, table[1].wins, table[1].losses), (3, 1, 1));
    assert_eq!(table[1].goal_difference, 0);
    assert_eq!((table[2].points, table[2].draws, table[2].losses), (1, 1, 1));
    assert_eq!(table[2].goal_difference, -2);
}

#[test]
fn standings_totals_add_up() {
    let group = Uuid::new_v4();
    let t = teams(&["A", "B", "C", "D"]);
    let matches = vec![
        played(group, &t[0], &t[1], 3, 0),
        played(group, &t[2], &t[3], 2, 2),
        played(group, &t[0], &t[2], 0, 1),
        played(group, &t[1], &t[3], 4, 4),
        played(group, &t[0], &t[3], 5, 1),
        GameMatch::new(group, t[1].id, t[2].id),
    ];
    let table = compute_standings(&t, &matches);
    assert_eq!(table.len(), 4);

    let decisive = 3;
    let drawn = 2;
    let total: u32 = table.iter().map(|r| r.points).sum();
    assert_eq!(total, 3 * decisive + 2 * drawn);

    for row in &table {
        assert_eq!(row.wins + row.draws + row.losses, row.played);
        assert_eq!(
            row.goal_difference,
            i64::from(row.goals_for) - i64::from(row.goals_against)
        );
    }
}

#[test]
fn identical_records_sort_by_name() {
    let group = Uuid::new_v4();
    let t = teams(&["Zeta", "Alpha", "Mid", "Beta"]);
    // Zeta and Alpha draw, Mid and Beta draw: all four level on every criterion
    let matches = vec![
        played(group, &t[0], &t[1], 1, 1),
        played(group, &t[2], &t[3], 1, 1),
    ];
    let first = compute_standings(&t, &matches);
    let names: Vec<&str> = first.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Mid", "Zeta"]);

    let mut reversed = t.clone();
    reversed.reverse();
    assert_eq!(compute_standings(&reversed, &matches), first);
}

#[test]
fn unplayed_teams_rank_by_name_and_unknown_teams_are_ignored() {
    let group = Uuid::new_v4();
    let t = teams(&["C", "B", "A"]);
    let outsider = Team::named("X");
    let matches = vec![played(group, &t[0], &outsider, 9, 0)];
    let table = compute_standings(&t, &matches);
    let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
}

fn project_with_group(n: usize) -> (Project, Uuid) {
    let mut p = Project::new("Cup");
    let g = p.add_group("Group A").unwrap();
    for i in 0..n {
        let id = p.add_team(&format!("T{i}"), "", TeamKind::Country).unwrap();
        p.move_team(id, Some(g)).unwrap();
    }
    (p, g)
}

#[test]
fn regenerating_replaces_only_that_group() {
    let (mut p, a) = project_with_group(4);
    let b = p.add_group("Group B").unwrap();
    for name in ["X", "Y"] {
        let id = p.add_team(name, "", TeamKind::Club).unwrap();
        p.move_team(id, Some(b)).unwrap();
    }
    assert_eq!(generate_all_matches(&mut p).unwrap(), 7);

    let b_ids: Vec<Uuid> = p
        .matches
        .iter()
        .filter(|m| m.group_id == b)
        .map(|m| m.id)
        .collect();
    assert_eq!(generate_group_matches(&mut p, a).unwrap(), 6);
    assert_eq!(p.matches.len(), 7);
    let b_after: Vec<Uuid> = p
        .matches
        .iter()
        .filter(|m| m.group_id == b)
        .map(|m| m.id)
        .collect();
    assert_eq!(b_ids, b_after);
}

#[test]
fn project_generation_honours_legs() {
    let (mut p, g) = project_with_group(3);
    p.set_settings(TournamentSettings {
        rounds: 2,
        ..TournamentSettings::default()
    })
    .unwrap();
    assert_eq!(generate_group_matches(&mut p, g).unwrap(), 6);
}

#[test]
fn project_standings_use_configured_points() {
    let (mut p, g) = project_with_group(2);
    p.set_settings(TournamentSettings {
        rounds: 1,
        points_win: 2,
        points_draw: 1,
        points_loss: 0,
    })
    .unwrap();
    generate_group_matches(&mut p, g).unwrap();
    let id = p.matches[0].id;
    record_match_score(&mut p, id, 1, 0, None).unwrap();
    let table = group_standings(&p, g).unwrap();
    assert_eq!(table[0].points, 2);
}

#[test]
fn create_match_validates_teams() {
    let (mut p, g) = project_with_group(2);
    let t0 = p.group(g).unwrap().teams[0].id;
    let outsider = p.add_team("Out", "", TeamKind::Country).unwrap();
    assert_eq!(create_match(&mut p, g, t0, t0), Err(ProjectError::SameTeam));
    assert_eq!(
        create_match(&mut p, g, t0, outsider),
        Err(ProjectError::TeamNotInGroup {
            team: outsider,
            group: g
        })
    );
}
