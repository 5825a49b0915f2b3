use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use peerscore::cli::{Cli, Commands};
use peerscore::commands::{self, person, rank, repo};
use tracing_subscriber::EnvFilter;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let config = commands::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Repo {
            path,
            metadata,
            now,
            max_file_bytes,
        } => {
            let score = commands::score_repository(
                &path,
                &metadata,
                reference_time(now),
                max_file_bytes,
                &config,
            )?;
            println!("{}", repo::render(&score)?);
        }
        Commands::Person { portfolio, now } => {
            let result = commands::score_person(&portfolio, reference_time(now), &config)?;
            println!("{}", person::render(&result)?);
        }
        Commands::Rank {
            cohort,
            format,
            top,
        } => {
            let boards = commands::rank_cohorts(&cohort, Utc::now(), top, &config)?;
            print!("{}", rank::render(&boards, format)?);
        }
        Commands::Init { force } => {
            let dir = std::env::current_dir()?;
            let path = commands::init_config(&dir, force)?;
            println!("Created {}", path.display());
        }
    }

    Ok(())
}

// Pure function to pick the scoring reference time
fn reference_time(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(Utc::now)
}

// PEERSCORE_LOG wins over RUST_LOG; -v flags override both
fn filter_directive(verbosity: u8) -> Option<String> {
    match verbosity {
        0 => std::env::var("PEERSCORE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok(),
        1 => Some("peerscore=debug".to_string()),
        _ => Some("peerscore=trace".to_string()),
    }
}

// Side effect function for logging setup (I/O at edges)
fn init_logging(verbosity: u8) {
    let filter = filter_directive(verbosity)
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("peerscore=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
