//! Belöningskartan (Reward Chart)
//!
//! Tracks children's reward goals with stars, persisted to a JSON file in the
//! per-user config directory, with CSV/JSON export.
//!
//! # Modes
//!
//! - `ledger`: stars are awarded into a balance and spent to claim goals
//! - `progress`: each goal has a fixed number of star slots filled directly

mod commands;
mod config;
mod errors;
mod export;
mod models;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::export::ExportArgs;
use commands::goals::{AddArgs, GoalArgs, ProgressArgs, StarArgs};
use commands::stars::AwardArgs;
use commands::Reply;
use config::Config;
use errors::AppError;
use models::ChartMode;
use store::{ChartStore, Repository};

/// Reward chart with stars and goals
#[derive(Parser, Debug)]
#[command(name = "beloningskartan")]
#[command(version)]
#[command(about = "Visual reward system with stars and goals")]
#[command(propagate_version = true)]
struct Cli {
    /// Chart mode: ledger or progress [env: BELONINGSKARTAN_MODE]
    #[arg(long, global = true)]
    mode: Option<ChartMode>,

    /// Directory holding the chart file [env: BELONINGSKARTAN_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print a JSON envelope instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show goals and stars (the default)
    Show,
    /// Add a goal
    Add(AddArgs),
    /// Delete a goal
    Remove(GoalArgs),
    /// Award stars (ledger mode)
    Award(AwardArgs),
    /// Claim a goal, spending its stars (ledger mode)
    Claim(GoalArgs),
    /// Fill a goal's stars up to a slot (progress mode)
    Star(StarArgs),
    /// Set a goal's filled stars directly (progress mode)
    Progress(ProgressArgs),
    /// Empty every goal's stars (progress mode)
    Reset,
    /// List awarded stars and claimed goals (ledger mode)
    History,
    /// Export progress as CSV and JSON
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config.with_overrides(cli.mode, cli.data_dir.clone()),
        Err(err) => {
            commands::print_error(&err, cli.json);
            std::process::exit(err.exit_code());
        }
    };

    init_tracing(cli.verbose, &config.log_level);

    tracing::debug!("Data directory: {:?}", config.data_dir);
    tracing::debug!("Chart mode: {}", config.mode);

    let repo = Repository::new(ChartStore::open(&config.data_dir, config.mode));
    let command = cli.command.unwrap_or(Commands::Show);

    let exit_code = match run(&repo, &config, command) {
        Ok(reply) => {
            commands::print_reply(&reply, cli.json);
            0
        }
        Err(err) => {
            tracing::debug!("Command failed: {}", err);
            commands::print_error(&err, cli.json);
            err.exit_code()
        }
    };

    std::process::exit(exit_code);
}

/// Logging goes to stderr so `--json` output stays parseable.
fn init_tracing(verbose: u8, log_level: &str) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Dispatch a command to its handler.
fn run(repo: &Repository, config: &Config, command: Commands) -> Result<Reply, AppError> {
    match command {
        Commands::Show => commands::goals::handle_show(repo),
        Commands::Add(args) => commands::goals::handle_add(repo, args),
        Commands::Remove(args) => commands::goals::handle_remove(repo, args),
        Commands::Award(args) => commands::stars::handle_award(repo, args),
        Commands::Claim(args) => commands::stars::handle_claim(repo, args),
        Commands::Star(args) => commands::goals::handle_star(repo, args),
        Commands::Progress(args) => commands::goals::handle_progress(repo, args),
        Commands::Reset => commands::goals::handle_reset(repo),
        Commands::History => commands::stars::handle_history(repo),
        Commands::Export(args) => commands::export::handle_export(repo, config, args),
    }
}

#[cfg(test)]
mod tests;
