//! End-to-end tournament scenarios driven through the public API

use club_core::{
    standings, tournaments_from_document, tournaments_to_document, ClubError, PlayerId, Stage,
    Tournament, TournamentsDocument,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// Round 1 finished: A beat B, C drew D. Counter already on round 2.
const AFTER_ROUND_ONE: &str = r#"{
    "Autumn Cup": {
        "place": "Rennes",
        "start_date": "04/10/2025",
        "end_date": "05/10/2025",
        "description": "",
        "current_round": 2,
        "rounds_number": 3,
        "players": {
            "AA00001": {"name": "Alpha", "first_name": "Ann", "birth_date": "01/01/1990"},
            "BB00002": {"name": "Bravo", "first_name": "Ben", "birth_date": "02/02/1991"},
            "CC00003": {"name": "Charlie", "first_name": "Cat", "birth_date": "03/03/1992"},
            "DD00004": {"name": "Delta", "first_name": "Dan", "birth_date": "04/04/1993"}
        },
        "rounds": {
            "Round 1": {
                "round_name": "Round 1",
                "start_date": "04/10/2025",
                "start_time": "09:00:00",
                "end_date": "04/10/2025",
                "end_time": "11:00:00",
                "matches": {
                    "match_1": {
                        "player1": {"identifier": "AA00001", "score": 1.0, "color": "white"},
                        "player2": {"identifier": "BB00002", "score": 0.0, "color": "black"}
                    },
                    "match_2": {
                        "player1": {"identifier": "CC00003", "score": 0.5, "color": "black"},
                        "player2": {"identifier": "DD00004", "score": 0.5, "color": "white"}
                    }
                }
            }
        }
    }
}"#;

fn id(raw: &str) -> PlayerId {
    PlayerId::parse(raw).unwrap()
}

fn load(json: &str) -> Tournament {
    let document: TournamentsDocument = serde_json::from_str(json).unwrap();
    tournaments_from_document(&document).unwrap().remove(0)
}

fn pair_set(tournament: &Tournament, number: u32) -> HashSet<(String, String)> {
    tournament
        .round(number)
        .unwrap()
        .matches()
        .iter()
        .map(|m| {
            let (a, b) = m.players();
            let (a, b) = (a.to_string(), b.to_string());
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

#[test]
fn test_reloaded_tournament_pairs_round_two_by_score() {
    let mut tournament = load(AFTER_ROUND_ONE);
    assert_eq!(tournament.stage(), Stage::RoundFinished(1));

    let mut rng = StdRng::seed_from_u64(11);
    tournament.create_round(2, &mut rng).unwrap();

    let expected: HashSet<(String, String)> = [
        ("AA00001".to_string(), "CC00003".to_string()),
        ("BB00002".to_string(), "DD00004".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(pair_set(&tournament, 2), expected);

    // Roster now follows the round 2 seed
    let order: Vec<String> = tournament
        .roster()
        .identifiers()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(order, vec!["AA00001", "CC00003", "DD00004", "BB00002"]);
}

#[test]
fn test_tournament_plays_to_completion_and_survives_reloads() {
    let mut tournament = load(AFTER_ROUND_ONE);
    let mut rng = StdRng::seed_from_u64(5);

    for number in 2..=3 {
        tournament.create_round(number, &mut rng).unwrap();

        // Save and reload mid-round
        let json =
            serde_json::to_string_pretty(&tournaments_to_document(&[tournament.clone()])).unwrap();
        tournament = load(&json);
        assert_eq!(tournament.stage(), Stage::RoundInProgress(number));

        let first_seats: Vec<PlayerId> = tournament
            .round(number)
            .unwrap()
            .matches()
            .iter()
            .map(|m| m.slot_a().player.clone())
            .collect();
        for player in &first_seats {
            tournament.record_score(player, 1.0).unwrap();
        }
        tournament.finish_round().unwrap();
        if number < 3 {
            tournament.advance_round().unwrap();
        }
    }

    assert!(tournament.is_completed());
    assert_eq!(tournament.stage(), Stage::Completed);
    assert!(matches!(
        tournament.create_round(4, &mut rng),
        Err(ClubError::State(_))
    ));

    // Everyone met everyone over three rounds of four players
    let all_pairs: HashSet<(String, String)> =
        (1..=3).flat_map(|n| pair_set(&tournament, n)).collect();
    assert_eq!(all_pairs.len(), 6);

    let table = standings(&tournament);
    assert_eq!(table.len(), 4);
    let points: f64 = table.iter().map(|row| row.score).sum();
    assert_eq!(points, 6.0);
    assert!(!tournament.winners().is_empty());
}

#[test]
fn test_reload_refuses_a_round_naming_a_stranger() {
    let json = AFTER_ROUND_ONE.replace(
        r#""player2": {"identifier": "DD00004""#,
        r#""player2": {"identifier": "XY12345""#,
    );
    let document: TournamentsDocument = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        tournaments_from_document(&document),
        Err(ClubError::Consistency(_))
    ));
}

#[test]
fn test_scores_on_a_stale_round_are_refused() {
    let mut tournament = load(AFTER_ROUND_ONE);
    // Counter is on round 2, which does not exist yet
    assert!(matches!(
        tournament.record_score(&id("AA00001"), 1.0),
        Err(ClubError::State(_))
    ));
}
