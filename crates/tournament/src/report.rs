//! Plain-text reports

use chrono::{NaiveDate, NaiveDateTime};
use club_core::{standings, Match, PlayerId, Roster, Side, Stage, Tournament};

fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(club_core::DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn stamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|at| at.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn stage(tournament: &Tournament) -> String {
    match tournament.stage() {
        Stage::Setup => "not started".to_string(),
        Stage::RoundInProgress(n) => format!("round {n}/{} in progress", tournament.rounds_number()),
        Stage::RoundFinished(n) => format!("round {n}/{} finished", tournament.rounds_number()),
        Stage::Completed => "completed".to_string(),
    }
}

fn player_label(roster: &Roster, id: &PlayerId) -> String {
    match roster.find_by_identifier(id) {
        Some(player) => format!("{} ({})", player.display_name(), id),
        None => id.to_string(),
    }
}

fn side(side: Side) -> &'static str {
    match side {
        Side::White => "W",
        Side::Black => "B",
    }
}

fn match_line(roster: &Roster, m: &Match) -> String {
    let (a, b) = (m.slot_a(), m.slot_b());
    let result = if m.is_scored() {
        format!("{} - {}", a.score, b.score)
    } else {
        "pending".to_string()
    };
    format!(
        "  [{}] {:<32} vs [{}] {:<32} {}\n",
        side(a.side),
        player_label(roster, &a.player),
        side(b.side),
        player_label(roster, &b.player),
        result
    )
}

/// Club members sorted by name, then first name
pub fn players_report(players: &Roster) -> String {
    let mut sorted: Vec<_> = players.iter().collect();
    sorted.sort_by(|a, b| {
        (a.name.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.name.to_lowercase(), b.first_name.to_lowercase()))
    });

    let mut report = String::new();
    report.push_str(&format!("=== Players ({}) ===\n\n", sorted.len()));
    report.push_str(&format!(
        "{:<10} {:<20} {:<20} {:<10}\n",
        "ID", "Name", "First name", "Born"
    ));
    report.push_str(&"-".repeat(63));
    report.push('\n');
    for player in sorted {
        report.push_str(&format!(
            "{:<10} {:<20} {:<20} {:<10}\n",
            player.identifier.as_str(),
            player.name,
            player.first_name,
            player.birth_date
        ));
    }
    report
}

/// One line per tournament
pub fn tournaments_report(tournaments: &[Tournament]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Tournaments ({}) ===\n\n", tournaments.len()));
    for t in tournaments {
        report.push_str(&format!(
            "{:<24} {:<16} {} to {}  {}\n",
            t.name,
            t.place,
            date(t.start_date),
            date(t.end_date),
            stage(t)
        ));
    }
    report
}

/// Tournament header, roster, then every round with its matches
pub fn tournament_report(tournament: &Tournament) -> String {
    let roster = tournament.roster();
    let mut report = String::new();
    report.push_str(&format!("=== Tournament: {} ===\n\n", tournament.name));
    report.push_str(&format!("Place: {}\n", tournament.place));
    report.push_str(&format!(
        "Dates: {} to {}\n",
        date(tournament.start_date),
        date(tournament.end_date)
    ));
    if !tournament.description.is_empty() {
        report.push_str(&format!("Description: {}\n", tournament.description));
    }
    report.push_str(&format!("Status: {}\n", stage(tournament)));
    report.push_str(&format!("Players: {}\n", roster.len()));
    for player in roster {
        report.push_str(&format!("  {}\n", player_label(roster, &player.identifier)));
    }

    for round in tournament.rounds() {
        report.push('\n');
        report.push_str(&format!(
            "{}  (start {}, end {})\n",
            round.name,
            stamp(round.started_at()),
            stamp(round.ended_at())
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');
        for m in round.matches() {
            report.push_str(&match_line(roster, m));
        }
    }
    report
}

/// Ranked score table; tied players share a rank
pub fn standings_report(tournament: &Tournament) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Standings: {} ===\n\n", tournament.name));
    report.push_str(&format!("{:>4}  {:<40} {:>6}\n", "Rank", "Player", "Points"));
    report.push_str(&"-".repeat(52));
    report.push('\n');
    for row in standings(tournament) {
        report.push_str(&format!(
            "{:>4}  {:<40} {:>6.1}\n",
            row.rank,
            player_label(tournament.roster(), &row.player.identifier),
            row.score
        ));
    }
    report
}

/// Winners of a completed tournament, or where it stands otherwise
pub fn winners_line(tournament: &Tournament) -> String {
    if !tournament.is_completed() {
        return format!("{} is not over yet: {}", tournament.name, stage(tournament));
    }
    let names: Vec<String> = tournament
        .winners()
        .iter()
        .map(|p| p.display_name())
        .collect();
    match names.len() {
        0 => format!("{} has no winner", tournament.name),
        1 => format!("Winner of {}: {}", tournament.name, names[0]),
        _ => format!("Joint winners of {}: {}", tournament.name, names.join(", ")),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
