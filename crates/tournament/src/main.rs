//! Tournament CLI
//!
//! Register players, run tournaments round by round and print standings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use club_core::{parse_date, Player, PlayerId, TournamentSetup};
use std::path::PathBuf;
use tournament::{
    logging, players_report, standings_report, tournament_report, tournaments_report,
    winners_line, Club, ClubConfig, ClubStore, RoundOutcome,
};

/// Chess club tournament manager
#[derive(Parser, Debug)]
#[command(version, about = "Chess club tournament manager")]
struct Args {
    /// Configuration file
    #[arg(long, global = true, default_value = "club.toml")]
    config: PathBuf,

    /// Directory holding tournaments.json and players.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fixed RNG seed for reproducible pairings
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Whether to log on the debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage club members
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Open a tournament and pair its first round
    Create {
        name: String,
        #[arg(long)]
        place: String,
        /// Start date, dd/mm/yyyy
        #[arg(long)]
        start: Option<String>,
        /// End date, dd/mm/yyyy
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Number of rounds (defaults to the configured value)
        #[arg(long)]
        rounds: Option<u32>,
        /// Identifier of an entrant; repeat for each player
        #[arg(long = "player", required = true)]
        players: Vec<String>,
    },

    /// List all tournaments
    List,

    /// Show a tournament with its rounds and matches
    Show { name: String },

    /// Record a player's score in the current round (1, 0.5 or 0)
    Score {
        name: String,
        player: String,
        score: f64,
    },

    /// Finish the current round, then pair the next one or announce winners
    Close { name: String },

    /// Print the standings table
    Standings { name: String },
}

#[derive(Subcommand, Debug)]
enum PlayerCommand {
    /// Register a new member
    Add {
        identifier: String,
        name: String,
        first_name: String,
        /// dd/mm/yyyy
        birth_date: String,
    },

    /// List members alphabetically
    List,
}

struct Session {
    config: ClubConfig,
    store: ClubStore,
}

impl Session {
    fn load(&self) -> Result<Club> {
        let club = Club::load(&self.store)
            .with_context(|| format!("Failed to load club data from {:?}", self.store.dir()))?;
        Ok(club.with_pairing(self.config.pairing))
    }

    fn save(&self, club: &Club) -> Result<()> {
        club.save(&self.store)
            .with_context(|| format!("Failed to save club data to {:?}", self.store.dir()))
    }
}

fn run_player(ctx: &Session, command: PlayerCommand) -> Result<()> {
    let mut club = ctx.load()?;
    match command {
        PlayerCommand::Add {
            identifier,
            name,
            first_name,
            birth_date,
        } => {
            let player = Player::new(&identifier, &name, &first_name, &birth_date)?;
            println!("Registered {}", club.register_player(player)?);
            ctx.save(&club)?;
        }
        PlayerCommand::List => print!("{}", players_report(club.players())),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_create(
    ctx: &Session,
    name: &str,
    place: &str,
    start: Option<&str>,
    end: Option<&str>,
    description: &str,
    rounds: Option<u32>,
    players: &[String],
) -> Result<()> {
    let mut setup = TournamentSetup::new(name, place)
        .rounds(rounds.unwrap_or(ctx.config.rounds_number))
        .description(description);
    setup.start_date = start.map(parse_date).transpose()?;
    setup.end_date = end.map(parse_date).transpose()?;
    let entrants = players
        .iter()
        .map(|raw| PlayerId::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut club = ctx.load()?;
    let mut rng = ctx.config.rng();
    let created = club
        .create_tournament(setup, &entrants, &mut rng)
        .with_context(|| format!("Failed to create tournament {name}"))?;
    print!("{}", tournament_report(created));
    ctx.save(&club)
}

fn run_score(ctx: &Session, name: &str, player: &str, score: f64) -> Result<()> {
    let player = PlayerId::parse(player)?;
    let mut club = ctx.load()?;
    club.tournament_mut(name)?
        .record_score(&player, score)
        .with_context(|| format!("Failed to record the score of {player} in {name}"))?;
    println!("Recorded {score} for {player} in {name}");
    ctx.save(&club)
}

fn run_close(ctx: &Session, name: &str) -> Result<()> {
    let mut club = ctx.load()?;
    let mut rng = ctx.config.rng();
    let outcome = club
        .close_round(name, &mut rng)
        .with_context(|| format!("Failed to close the current round of {name}"))?;
    ctx.save(&club)?;

    let tournament = club.tournament(name)?;
    match outcome {
        RoundOutcome::Next(round) => {
            println!("Round {} is paired:\n", round);
            print!("{}", tournament_report(tournament));
        }
        RoundOutcome::Completed => {
            print!("{}", standings_report(tournament));
            println!("\n{}", winners_line(tournament));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let mut config = ClubConfig::load(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let store = ClubStore::new(&config.data_dir);
    let ctx = Session { config, store };

    match args.command {
        Command::Player(command) => run_player(&ctx, command),
        Command::Create {
            name,
            place,
            start,
            end,
            description,
            rounds,
            players,
        } => run_create(
            &ctx,
            &name,
            &place,
            start.as_deref(),
            end.as_deref(),
            &description,
            rounds,
            &players,
        ),
        Command::List => {
            print!("{}", tournaments_report(ctx.load()?.tournaments()));
            Ok(())
        }
        Command::Show { name } => {
            print!("{}", tournament_report(ctx.load()?.tournament(&name)?));
            Ok(())
        }
        Command::Score {
            name,
            player,
            score,
        } => run_score(&ctx, &name, &player, score),
        Command::Close { name } => run_close(&ctx, &name),
        Command::Standings { name } => {
            let club = ctx.load()?;
            let tournament = club.tournament(&name)?;
            print!("{}", standings_report(tournament));
            println!("\n{}", winners_line(tournament));
            Ok(())
        }
    }
}
