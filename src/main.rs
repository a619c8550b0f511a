use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quiz_board::admin;
use quiz_board::model::TeamId;
use quiz_board::scoring::{RoundEntry, Scoreboard, SortState, Visibility};
use quiz_board::snapshot::Snapshot;
use quiz_board::store::{JsonStore, RecordStore, TeamUpdate};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Live public scoreboard (default if no subcommand)
    Show,
    /// Print the public standings and breakdown once
    Standings,
    /// Print the admin summary: every saved round, published or not
    Summary,
    /// Create the quiz: rounds, questions per round and the team list
    Setup {
        /// Total number of rounds
        #[arg(long)]
        rounds: u32,
        /// Maximum standard points per round
        #[arg(long)]
        questions: u32,
        /// Rounds with the tipovacka bonus: "all", "none" or e.g. "1,3"
        #[arg(long, default_value = "all")]
        tipovacka: String,
        /// Team names
        #[arg(required = true)]
        teams: Vec<String>,
    },
    /// Save one round of scores, one NAME=POINTS entry per team
    Score {
        /// Round number (1-based)
        #[arg(long)]
        round: u32,
        /// Team that won the tipovacka point this round
        #[arg(long)]
        tipovacka: Option<String>,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Set how many rounds the public view sees
    Publish {
        #[arg(long)]
        rounds: u32,
    },
    /// Update a team's player count or shots bonus
    Team {
        name: String,
        #[arg(long)]
        players: Option<u32>,
        #[arg(long)]
        shots_bonus: Option<bool>,
    },
    /// Delete all quiz data (config, teams, scores)
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "quiz-board")]
#[command(about = "Live pub-quiz scoreboard CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/quiz-board/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the quiz data file (overrides the config file)
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match quiz_board::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let refresh_interval = match config.refresh_interval() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let data_path = config.resolve_data_path(cli.data.map(PathBuf::from));
    if cli.verbose {
        eprintln!("Data file: {}", data_path.display());
    }

    let mut store = match JsonStore::open(&data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open quiz data: {}", e);
            std::process::exit(EXIT_STORE);
        }
    };

    let use_colors = quiz_board::output::should_use_colors();

    match command {
        Commands::Show => {
            let board = match build_board(&store, Visibility::Public) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Failed to read quiz data: {}", e);
                    std::process::exit(EXIT_STORE);
                }
            };
            let app = quiz_board::tui::App::new(board, refresh_interval);
            if let Err(e) = quiz_board::tui::run_tui(app, store).await {
                eprintln!("Scoreboard error: {}", e);
                std::process::exit(EXIT_STORE);
            }
        }
        Commands::Standings => {
            let board = exit_on_store_err(build_board(&store, Visibility::Public));
            println!(
                "{}",
                quiz_board::output::format_standings(&board, use_colors)
            );
            if !board.rounds.is_empty() {
                println!();
                println!(
                    "{}",
                    quiz_board::output::format_breakdown(&board, SortState::default(), use_colors)
                );
            }
        }
        Commands::Summary => {
            let board = exit_on_store_err(build_board(&store, Visibility::Admin));
            println!(
                "{}",
                quiz_board::output::format_breakdown(&board, SortState::default(), use_colors)
            );
        }
        Commands::Setup {
            rounds,
            questions,
            tipovacka,
            teams,
        } => {
            let has_tipovacka = exit_on_config_err(parse_tipovacka(&tipovacka, rounds));
            let request = admin::SetupRequest {
                rounds,
                questions_per_round: questions,
                has_tipovacka,
                team_names: teams,
            };
            let created = exit_on_config_err(admin::run_setup(&mut store, &request));
            println!(
                "Quiz configured: {} rounds, {} questions each, {} teams.",
                rounds,
                questions,
                created.len()
            );
        }
        Commands::Score {
            round,
            tipovacka,
            entries,
        } => {
            let (parsed, tip_id) =
                exit_on_config_err(parse_entries(&store, &entries, tipovacka.as_deref()));
            exit_on_config_err(admin::save_round(&mut store, round, &parsed, tip_id));
            println!("Round {} saved.", round);
        }
        Commands::Publish { rounds } => {
            let config = exit_on_config_err(admin::publish_rounds(&mut store, rounds));
            println!(
                "Published {} of {} rounds.",
                config.published_rounds, config.rounds
            );
        }
        Commands::Team {
            name,
            players,
            shots_bonus,
        } => {
            if players.is_none() && shots_bonus.is_none() {
                eprintln!("Nothing to update. Pass --players and/or --shots-bonus.");
                std::process::exit(EXIT_CONFIG);
            }
            let update = TeamUpdate {
                player_count: players,
                shots_bonus,
            };
            let team = exit_on_config_err(admin::update_team(&mut store, &name, &update));
            println!(
                "{}: {} players, shots bonus {}.",
                team.name,
                team.player_count,
                if team.shots_bonus { "on" } else { "off" }
            );
        }
        Commands::Reset { yes } => {
            if !yes {
                eprintln!("This deletes ALL quiz data. Re-run with --yes to confirm.");
                std::process::exit(EXIT_CONFIG);
            }
            exit_on_config_err(admin::reset(&mut store));
            println!("Quiz data deleted.");
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn build_board(store: &JsonStore, visibility: Visibility) -> anyhow::Result<Scoreboard> {
    let snapshot = Snapshot::load(store)?;
    Ok(Scoreboard::build(&snapshot, visibility))
}

fn exit_on_store_err<T>(result: anyhow::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Failed to read quiz data: {}", e);
            std::process::exit(EXIT_STORE);
        }
    }
}

fn exit_on_config_err<T>(result: anyhow::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Parse the --tipovacka flag: "all", "none", or a comma list of rounds.
fn parse_tipovacka(raw: &str, rounds: u32) -> anyhow::Result<Vec<bool>> {
    match raw.trim() {
        "all" => Ok(vec![true; rounds as usize]),
        "none" => Ok(vec![false; rounds as usize]),
        list => {
            let mut flags = vec![false; rounds as usize];
            for part in list.split(',') {
                let round: u32 = part
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid tipovacka round '{}'", part.trim()))?;
                if round < 1 || round > rounds {
                    anyhow::bail!("Tipovacka round {} is out of range 1-{}", round, rounds);
                }
                flags[round as usize - 1] = true;
            }
            Ok(flags)
        }
    }
}

/// Parse NAME=POINTS entries and resolve names against the team list.
/// Accepts both "7.5" and the European "7,5" for half points.
fn parse_entries(
    store: &JsonStore,
    raw_entries: &[String],
    tipovacka_name: Option<&str>,
) -> anyhow::Result<(Vec<RoundEntry>, Option<TeamId>)> {
    let teams = store.list_teams()?;
    let find_team = |name: &str| -> anyhow::Result<TeamId> {
        teams
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id)
            .ok_or_else(|| anyhow::anyhow!("No team named '{}'", name))
    };

    let mut entries = Vec::with_capacity(raw_entries.len());
    for raw in raw_entries {
        let (name, points_str) = raw
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected NAME=POINTS, got '{}'", raw))?;
        let points: f64 = points_str
            .trim()
            .replace(',', ".")
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid points '{}' for '{}'", points_str, name))?;
        entries.push(RoundEntry {
            team_id: find_team(name.trim())?,
            standard_points: points,
        });
    }

    let tip_id = tipovacka_name.map(find_team).transpose()?;
    Ok((entries, tip_id))
}
