use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "peerscore")]
#[command(about = "Repository quality scoring and cohort ranking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .peerscore.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a local repository checkout
    Repo {
        /// Repository root directory
        path: PathBuf,

        /// Repository metadata as JSON
        #[arg(short, long)]
        metadata: PathBuf,

        /// Reference time for recency scoring (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Skip files larger than this many bytes
        #[arg(long, default_value = "1048576")]
        max_file_bytes: u64,
    },

    /// Score every repository in a portfolio and the person who owns them
    Person {
        /// Portfolio JSON: {person_id, repositories: [{metadata, files}]}
        portfolio: PathBuf,

        /// Reference time for recency scoring (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Rank cohort scores into leaderboards
    Rank {
        /// JSON list of {person_id, score, cohort_key}
        cohort: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Only show the top N entries of each cohort
        #[arg(long)]
        top: Option<usize>,
    },

    /// Write a default .peerscore.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}
