use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use golf_scoring::calculate::{
    calculate_hvp_best_of, calculate_playing_handicap, calculate_strokes_received,
    format_match_play_final_result, format_match_play_score, get_score_result_vs_par, hvp_summary,
    match_status, recompute_playing_handicaps, score_hole, score_round, summarize_round,
    HoleOutcome, RoundStandings,
};
use golf_scoring::config::AppConfig;
use golf_scoring::models::{
    Course, EntityId, HandicapHistoryEntry, HandicapPercentage, Round, Team,
};
use golf_scoring::parse_date;
use golf_scoring::storage::{
    add_handicap_entry, find_course, find_round, read_courses, read_handicap_history,
    read_rounds, save_round, StorageConfig,
};

#[derive(Parser)]
#[command(name = "golf-scoring")]
#[command(about = "Golf round scoring and handicap engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a playing handicap and its stroke allocation
    PlayingHandicap {
        /// Official handicap index
        #[arg(long, allow_hyphen_values = true)]
        index: f64,

        /// Tee slope
        #[arg(long)]
        slope: u32,

        /// Percentage applied: 100 or 75 (default from config)
        #[arg(long)]
        percentage: Option<u8>,
    },

    /// Print the scorecard and standings of a round
    Scorecard {
        /// Round ID
        #[arg(long)]
        round: String,

        /// Score with the configured scoring settings instead of the round's.
        /// Playing handicaps are recomputed for the configured percentage.
        #[arg(long)]
        use_config_scoring: bool,
    },

    /// Finish a round and store the owner's virtual handicap
    Finish {
        /// Round ID
        #[arg(long)]
        round: String,
    },

    /// Show the average virtual handicap (HVP) per period
    Hvp {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,

        /// Also show the mean of the best N of the recent rounds
        #[arg(long)]
        best: Option<usize>,

        /// Number of recent rounds considered by --best
        #[arg(long, default_value = "20")]
        last: usize,
    },

    /// Check every stored course for malformed data
    ValidateCourses,

    /// Manage the official handicap index history
    HandicapHistory {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Record a new handicap index
    Add {
        #[arg(long, allow_hyphen_values = true)]
        index: f64,

        /// Effective date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the history, or the index in effect on a date
    Show {
        #[arg(long)]
        date: Option<String>,
    },
}

fn load_config(path: &PathBuf) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::from_file(path).with_context(|| format!("Failed to load config {:?}", path))
    } else {
        Ok(AppConfig::default())
    }
}

fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    parse_date(value)
        .with_context(|| format!("Invalid --{} date (expected YYYY-MM-DD): {}", flag, value))
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    info!("Starting golf-scoring v{}", env!("CARGO_PKG_VERSION"));
    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::PlayingHandicap {
            index,
            slope,
            percentage,
        } => {
            let percentage = match percentage {
                Some(p) => HandicapPercentage::try_from(p).map_err(anyhow::Error::msg)?,
                None => config.scoring.percentage()?,
            };
            let hdj = calculate_playing_handicap(index, slope, percentage)?;

            println!(
                "Index {:.1}, slope {}, {}% -> playing handicap {}",
                index,
                slope,
                percentage.as_percent(),
                hdj
            );
            println!("\nStroke index  Strokes");
            for si in 1..=18u8 {
                println!("{:>12}  {}", si, calculate_strokes_received(hdj, si));
            }
        }
        Commands::Scorecard {
            round,
            use_config_scoring,
        } => {
            let mut round = find_round(&storage, &EntityId::from(round))?;
            let course = find_course(&storage, &round.course_id)?;
            if use_config_scoring {
                config.scoring.apply_to(&mut round)?;
                recompute_playing_handicaps(&mut round, &course)?;
            }
            print_scorecard(&round, &course)?;
        }
        Commands::Finish { round } => {
            let mut round = find_round(&storage, &EntityId::from(round))?;
            let course = find_course(&storage, &round.course_id)?;

            let virtual_handicap = round.finish(&course)?;
            save_round(&storage, round.clone())?;

            match virtual_handicap {
                Some(vh) => println!("Round {} finished. Virtual handicap: {:.1}", round.id, vh),
                None => println!("Round {} finished (no players).", round.id),
            }
        }
        Commands::Hvp { today, best, last } => {
            let today = match today {
                Some(s) => parse_date_arg(&s, "today")?,
                None => Local::now().date_naive(),
            };
            let rounds = read_rounds(&storage)?;
            let summary = hvp_summary(&rounds, today);

            let show = |v: Option<f64>| {
                v.map(|x| format!("{:.1}", x))
                    .unwrap_or_else(|| "-".to_string())
            };
            println!("=== HVP as of {} ({} rounds) ===", today, summary.rounds_counted);
            println!("Month:   {}", show(summary.month));
            println!("Quarter: {}", show(summary.quarter));
            println!("Year:    {}", show(summary.year));
            println!("Total:   {}", show(summary.total));
            if let Some(best) = best {
                println!(
                    "Best {} of last {}: {}",
                    best,
                    last,
                    show(calculate_hvp_best_of(&rounds, best, last))
                );
            }
        }
        Commands::ValidateCourses => {
            let courses = read_courses(&storage)?;
            let mut invalid = 0;
            for course in &courses {
                if let Err(reason) = course.validate() {
                    warn!("Course {} ({}) is invalid: {}", course.name, course.id, reason);
                    println!("INVALID  {} ({}): {}", course.name, course.id, reason);
                    invalid += 1;
                } else {
                    println!("ok       {} ({})", course.name, course.id);
                }
            }
            if invalid > 0 {
                bail!("{} of {} courses are invalid", invalid, courses.len());
            }
        }
        Commands::HandicapHistory { action } => match action {
            HistoryAction::Add { index, date, notes } => {
                let date = parse_date_arg(&date, "date")?;
                let mut entry = HandicapHistoryEntry::new(index, date);
                if let Some(notes) = notes {
                    entry = entry.with_notes(notes);
                }
                if add_handicap_entry(&storage, entry)? {
                    println!("Recorded handicap index {:.1} from {}", index, date);
                } else {
                    println!("Duplicate: that index is already recorded for {}", date);
                }
            }
            HistoryAction::Show { date } => {
                let history = read_handicap_history(&storage)?;
                match date {
                    Some(s) => {
                        let date = parse_date_arg(&s, "date")?;
                        match history.index_at(date) {
                            Some(index) => println!("Index on {}: {:.1}", date, index),
                            None => println!("No handicap index recorded on or before {}", date),
                        }
                    }
                    None => {
                        for entry in history.entries() {
                            println!(
                                "{}  {:>5.1}  {}",
                                entry.effective_date,
                                entry.handicap_index,
                                entry.notes.as_deref().unwrap_or("")
                            );
                        }
                    }
                }
            }
        },
    }

    Ok(())
}

fn print_scorecard(round: &Round, course: &Course) -> Result<()> {
    if let Err(reason) = course.validate() {
        warn!("Course {} failed validation: {}", course.id, reason);
    }

    let length = round.course_length.played_on(course);
    println!(
        "=== {} on {} ({}, {} holes) ===",
        round.game_mode,
        round.round_date,
        course.name,
        length.hole_count()
    );

    let names: Vec<&str> = round.players.iter().map(|p| p.name.as_str()).collect();
    println!("Hole Par SI  {}", names.join("  "));

    for number in length.holes() {
        let hole = course
            .hole(number)
            .with_context(|| format!("Hole {} missing from course {}", number, course.id))?;
        let cells: Vec<String> = round
            .players
            .iter()
            .map(|p| match p.score(number) {
                Some(score) => format!(
                    "{} ({})",
                    score.strokes,
                    get_score_result_vs_par(score.strokes, hole.par).label()
                ),
                None => "-".to_string(),
            })
            .collect();

        let outcome = match score_hole(round, course, number)? {
            HoleOutcome::MatchPlay { result: Some(r) } => format!("  [{}]", r),
            HoleOutcome::Team { points } => format!(
                "  [A {} B {}]",
                points.get(&Team::A).copied().unwrap_or(0),
                points.get(&Team::B).copied().unwrap_or(0)
            ),
            _ => String::new(),
        };
        println!(
            "{:>4} {:>3} {:>2}  {}{}",
            number,
            hole.par,
            hole.handicap,
            cells.join("  "),
            outcome
        );
    }

    println!();
    match score_round(round, course)? {
        RoundStandings::Points { points } => {
            for player in &round.players {
                let pts = points.get(&player.id).copied().unwrap_or(0);
                println!("{:<20} {:>3} pts", player.name, pts);
            }
        }
        RoundStandings::Strokes { gross, net } => {
            for player in &round.players {
                println!(
                    "{:<20} gross {:>3}  net {:>3}",
                    player.name,
                    gross.get(&player.id).copied().unwrap_or(0),
                    net.get(&player.id).copied().unwrap_or(0)
                );
            }
        }
        RoundStandings::Teams { points } => {
            for (team, pts) in points {
                println!("Team {}: {} pts", team, pts);
            }
        }
        RoundStandings::Match {
            score,
            holes_remaining,
        } => {
            let text = if round.is_finished {
                format_match_play_final_result(score, holes_remaining, 0)
            } else {
                format_match_play_score(score, 0)
            };
            println!(
                "{}: {} ({:?}, {} to play)",
                names.first().copied().unwrap_or("Player 1"),
                text,
                match_status(score, holes_remaining),
                holes_remaining
            );
        }
    }

    println!("\nPlayer               HDJ  Gross  Net  Putts  GIR");
    for summary in summarize_round(round, course)? {
        let name = round
            .player(&summary.player_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!(
            "{:<20} {:>3}  {:>5}  {:>3}  {:>5}  {:>3.0}%",
            name,
            summary.playing_handicap,
            summary.gross_strokes,
            summary.net_strokes,
            summary.putts,
            summary.gir_percentage * 100.0
        );
    }

    if let Some(vh) = round.virtual_handicap {
        println!("\nVirtual handicap: {:.1}", vh);
    }

    Ok(())
}
