use super::*;
use crate::matches::{Match, Side};
use crate::round::Round;

const ROSTER: [&str; 6] = ["AA00001", "BB00002", "CC00003", "DD00004", "EE00005", "FF00006"];

fn id(raw: &str) -> PlayerId {
    PlayerId::parse(raw).unwrap()
}

fn roster(size: usize) -> crate::player::Roster {
    ROSTER[..size]
        .iter()
        .map(|raw| Player::new(raw, raw, "Test", "01/01/2000").unwrap())
        .collect()
}

/// One round per entry; each result is (player, opponent, player's score)
fn played(size: usize, rounds: &[&[(&str, &str, f64)]]) -> Tournament {
    let rounds: Vec<Round> = rounds
        .iter()
        .enumerate()
        .map(|(i, results)| {
            let matches = results
                .iter()
                .map(|(a, b, score)| {
                    let mut m = Match::with_sides(id(a), Side::White, id(b), Side::Black);
                    m.set_scores(&id(a), *score).unwrap();
                    m
                })
                .collect();
            let mut round = Round::create(Round::name_for(i as u32 + 1));
            round.populate(matches).unwrap();
            round.start();
            round.finish().unwrap();
            round
        })
        .collect();
    let current = rounds.len().max(1) as u32;
    Tournament::restore(
        "Test".into(),
        "Club".into(),
        None,
        None,
        String::new(),
        4,
        current,
        rounds,
        roster(size),
    )
}

#[test]
fn test_scores_start_at_zero_for_everyone() {
    let tournament = played(4, &[]);
    let sheet = compute_scores(&tournament);
    assert_eq!(sheet.scores.len(), 4);
    assert!(sheet.scores.values().all(|&s| s == 0.0));
    assert_eq!(sheet.players.len(), 4);
}

#[test]
fn test_scores_sum_across_rounds() {
    let tournament = played(
        4,
        &[
            &[("AA00001", "BB00002", 1.0), ("CC00003", "DD00004", 0.5)],
            &[("AA00001", "CC00003", 0.5), ("DD00004", "BB00002", 0.0)],
        ],
    );
    let sheet = compute_scores(&tournament);
    assert_eq!(sheet.score_of(&id("AA00001")), 1.5);
    assert_eq!(sheet.score_of(&id("BB00002")), 1.0);
    assert_eq!(sheet.score_of(&id("CC00003")), 1.0);
    assert_eq!(sheet.score_of(&id("DD00004")), 0.5);

    // Repeated calls give the same sheet
    assert_eq!(compute_scores(&tournament), sheet);
}

#[test]
fn test_rank_is_stable_on_ties() {
    let tournament = played(
        4,
        &[&[("AA00001", "BB00002", 1.0), ("CC00003", "DD00004", 0.5)]],
    );
    let order: Vec<&str> = rank(&tournament)
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();
    assert_eq!(order, vec!["AA00001", "CC00003", "DD00004", "BB00002"]);
}

#[test]
fn test_rank_with_no_results_keeps_roster_order() {
    let tournament = played(6, &[]);
    let order: Vec<PlayerId> = rank(&tournament)
        .iter()
        .map(|p| p.identifier.clone())
        .collect();
    assert_eq!(order, tournament.roster().identifiers());
}

#[test]
fn test_standings_share_ranks_on_ties() {
    let tournament = played(
        4,
        &[&[("AA00001", "BB00002", 1.0), ("CC00003", "DD00004", 0.5)]],
    );
    let rows = standings(&tournament);
    let summary: Vec<(usize, &str, f64)> = rows
        .iter()
        .map(|r| (r.rank, r.player.identifier.as_str(), r.score))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "AA00001", 1.0),
            (2, "CC00003", 0.5),
            (2, "DD00004", 0.5),
            (4, "BB00002", 0.0),
        ]
    );
}

#[test]
fn test_standings_ignore_the_round_in_progress() {
    use crate::tournament::TournamentSetup;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut tournament = Tournament::new(TournamentSetup::new("Live", "Club").rounds(2)).unwrap();
    tournament.add_players(roster(4).iter().cloned()).unwrap();
    tournament
        .create_round(1, &mut StdRng::seed_from_u64(8))
        .unwrap();
    let leader = tournament.round(1).unwrap().matches()[0].slot_a().player.clone();
    tournament.record_score(&leader, 1.0).unwrap();

    assert_eq!(compute_scores(&tournament).score_of(&leader), 1.0);
    assert_eq!(compute_finished_scores(&tournament).score_of(&leader), 0.0);
    assert!(standings(&tournament).iter().all(|row| row.score == 0.0 && row.rank == 1));

    let other = tournament.round(1).unwrap().matches()[1].slot_a().player.clone();
    tournament.record_score(&other, 0.5).unwrap();
    tournament.finish_round().unwrap();
    let top = &standings(&tournament)[0];
    assert_eq!((top.player.identifier.clone(), top.score), (leader, 1.0));
}
