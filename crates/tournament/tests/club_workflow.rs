//! A club season driven through the store, one command at a time

use club_core::{ClubError, Player, PlayerId, Stage, TournamentSetup};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament::{standings_report, winners_line, Club, ClubStore, RoundOutcome};

const MEMBERS: [(&str, &str, &str); 4] = [
    ("ab12345", "Doe", "John"),
    ("CD54321", "Smith", "Anna"),
    ("EF11111", "Brown", "Charlie"),
    ("GH22222", "Taylor", "Emma"),
];

fn ids() -> Vec<PlayerId> {
    MEMBERS
        .iter()
        .map(|(id, _, _)| PlayerId::parse(id).unwrap())
        .collect()
}

#[test]
fn test_season_survives_a_reload_after_every_step() {
    let dir = tempfile::tempdir().unwrap();
    let store = ClubStore::new(dir.path().join("data/tournaments"));
    let mut rng = StdRng::seed_from_u64(2025);

    // Register members
    let mut club = Club::load(&store).unwrap();
    for (id, name, first) in MEMBERS {
        club.register_player(Player::new(id, name, first, "01/01/1990").unwrap())
            .unwrap();
    }
    club.save(&store).unwrap();

    // Open the tournament
    let mut club = Club::load(&store).unwrap();
    assert_eq!(club.players().len(), 4);
    club.create_tournament(
        TournamentSetup::new("Spring Open", "Paris").rounds(2),
        &ids(),
        &mut rng,
    )
    .unwrap();
    club.save(&store).unwrap();

    for round in 1..=2 {
        // Enter one score per match
        let mut club = Club::load(&store).unwrap();
        let tournament = club.tournament_mut("Spring Open").unwrap();
        assert_eq!(tournament.stage(), Stage::RoundInProgress(round));
        let seats: Vec<PlayerId> = tournament
            .round(round)
            .unwrap()
            .matches()
            .iter()
            .map(|m| m.slot_a().player.clone())
            .collect();
        for player in &seats {
            tournament.record_score(player, 0.5).unwrap();
        }
        club.save(&store).unwrap();

        // Close the round
        let mut club = Club::load(&store).unwrap();
        let outcome = club.close_round("Spring Open", &mut rng).unwrap();
        let expected = if round == 1 {
            RoundOutcome::Next(2)
        } else {
            RoundOutcome::Completed
        };
        assert_eq!(outcome, expected);
        club.save(&store).unwrap();
    }

    let club = Club::load(&store).unwrap();
    let tournament = club.tournament("Spring Open").unwrap();
    assert!(tournament.is_completed());
    assert_eq!(tournament.history().len(), 4);

    // Four draws each: everyone shares first place
    assert_eq!(tournament.winners().len(), 4);
    assert!(winners_line(tournament).starts_with("Joint winners of Spring Open"));
    assert!(standings_report(tournament).contains("AB12345"));
}

#[test]
fn test_first_run_creates_empty_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = ClubStore::new(dir.path());

    let club = Club::load(&store).unwrap();
    assert!(club.players().is_empty());
    assert!(club.tournaments().is_empty());
    assert!(store.players_path().exists());
    assert!(store.tournaments_path().exists());
}

#[test]
fn test_unknown_tournament_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = ClubStore::new(dir.path());
    let mut club = Club::load(&store).unwrap();

    let err = club
        .close_round("Missing", &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(err, ClubError::NotFound { .. }));
}
