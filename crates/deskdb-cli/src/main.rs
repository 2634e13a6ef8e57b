mod coerce;
mod input;
mod render;
mod session;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use deskdb_config::DeskConfig;
use deskdb_core::{db::Db, error::Error as DeskError, obs::metrics};
use input::Terminal;
use render::{OutputFormat, stats_table};
use session::Session;
use std::{io, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

///
/// Args
///

#[derive(Debug, Parser)]
#[command(
    name = "deskdb",
    version,
    about = "Interactive field search over help-desk users, tickets and organizations"
)]
struct Args {
    /// TOML file describing where the data files live
    #[arg(long, env = "DESKDB_CONFIG")]
    config: Option<PathBuf>,

    /// Base directory holding the data files (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print load and search counters on exit
    #[arg(long)]
    stats: bool,

    /// Print result sets as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    const fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }

    fn config(&self) -> Result<DeskConfig> {
        let config = match &self.config {
            Some(path) => DeskConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DeskConfig::default(),
        };

        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir),
            None => config,
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("deskdb stopped: {err:#}");
            eprintln!("ERROR! An unexpected error has occurred. {err:#}.");
            eprintln!("Please re-run the search program");

            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    let db = Db::open(&config.source())
        .map_err(|err| anyhow!(DeskError::from(err).display_with_class()))
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))?;

    let snapshot = db.snapshot();
    info!(records = snapshot.len(), data_dir = %config.data_dir.display(), "data loaded");

    let mut session = Session::new(&db, Terminal::new()?, io::stdout().lock(), args.format());
    session.run()?;

    if args.stats {
        println!("{}", stats_table(&metrics::snapshot()));
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
