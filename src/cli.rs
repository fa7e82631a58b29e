use crate::core::{Gender, Score, SubsetId};
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moerank")]
#[command(about = "Learn which character traits you like from your ratings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session snapshot file (overrides the configured location)
    #[arg(long, global = true, env = "MOERANK_SESSION")]
    pub session: Option<PathBuf>,

    /// Configuration file (skips .moerank.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank traits by how much they move your ratings
    Calculate {
        /// Character dataset (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the per-trait breakdown behind each score
        #[arg(long)]
        explain: bool,
    },

    /// Rate a character from 0 to 10
    Rate {
        character: String,

        #[arg(value_parser = parse_score)]
        score: Score,
    },

    /// Skip a character without rating it
    Skip { character: String },

    /// Undo the most recent rate or skip
    Revert,

    /// Delete every rating in the session
    Clear,

    /// Suggest the next character to rate
    Next {
        /// Character dataset (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Subsets to draw from (defaults to the configured subsets)
        #[arg(long = "subset", value_delimiter = ',')]
        subsets: Vec<SubsetId>,

        /// Only suggest characters that have an image
        #[arg(long)]
        image_only: bool,

        /// Restrict to these genders (male, female, unknown or 0/1/2)
        #[arg(long = "gender", value_delimiter = ',')]
        genders: Vec<Gender>,
    },

    /// Show the ratings recorded so far
    Status {
        /// Resolve character names from this dataset
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Write a default .moerank.toml in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_score(s: &str) -> Result<Score, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number"))?;
    Score::new(value).map_err(|e| e.to_string())
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
