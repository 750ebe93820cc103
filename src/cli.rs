use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::normalize::ShotErrorPolicy;
use crate::providers::ProviderKind;

#[derive(Parser)]
#[command(name = "pitchside")]
#[command(version)]
#[command(about = "Normalize football shot data from multiple providers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Override the configured handling of shots that fail to normalize
    #[arg(long, value_parser = parse_policy)]
    pub shot_errors: Option<ShotErrorPolicy>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and normalize one match, printing the game as JSON
    Parse {
        #[arg(short, long, value_enum)]
        provider: ProviderKind,
        /// Provider match id
        #[arg(long)]
        id: String,
        /// Read saved responses from this directory instead of the network
        #[arg(long)]
        fixture_dir: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Normalize several matches concurrently, one JSON line per match
    Batch {
        #[arg(short, long, value_enum)]
        provider: ProviderKind,
        /// Comma separated match ids
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        #[arg(long)]
        fixture_dir: Option<PathBuf>,
    },
    /// Print the request URL for a match without fetching it
    Url {
        #[arg(short, long, value_enum)]
        provider: ProviderKind,
        #[arg(long)]
        id: String,
    },
}

fn parse_policy(s: &str) -> Result<ShotErrorPolicy, String> {
    s.parse()
}
