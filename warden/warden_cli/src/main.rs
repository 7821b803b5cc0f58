use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::FmtSubscriber;
use warden_core::{LogLevel, WardenConfig};
use warden_predicates::Authorizer;

mod commands;

use commands::check::CheckArgs;
use commands::inspect::PlanArgs;

/// Warden Command Line Interface
///
/// Inspect the resolved permission map and check permissions against
/// identities and contexts read from JSON files.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level or finer
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List permissions with their clause counts
    Permissions,

    /// List predicates with their declared parents
    Predicates,

    /// Print the resolved evaluation plan of one or every permission
    Plan(PlanArgs),

    /// Check a permission; exits 0 when granted and 1 when denied
    Check(CheckArgs),
}

/// Exit status for anything that is neither a grant nor a denial.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => WardenConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => WardenConfig::default(),
    };

    init_logging(config.logging.level, cli.verbose);

    let authorizer =
        Authorizer::from_config(&config).context("failed to build the permission map")?;

    match cli.command {
        Commands::Permissions => commands::inspect::permissions(&authorizer)?,
        Commands::Predicates => commands::inspect::predicates(&authorizer)?,
        Commands::Plan(args) => commands::inspect::plan(&authorizer, &args)?,
        Commands::Check(args) => {
            return if commands::check::execute(&authorizer, &args)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            };
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(level: LogLevel, verbose: bool) {
    let level = if verbose {
        level.min(LogLevel::Debug)
    } else {
        level
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level.as_tracing_level())
        .with_writer(std::io::stderr)
        .finish();

    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
