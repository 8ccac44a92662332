use crate::io::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "farmkpi")]
#[command(about = "Sustainability KPI and composite-index evaluation for urban farms", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every metric and composite index
    Evaluate {
        /// History import file (header row, then id,date,value rows); repeatable
        #[arg(long = "data", value_name = "FILE")]
        data: Vec<PathBuf>,

        /// Configuration file (defaults to .farmkpi.toml discovery)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Only use history points on or after this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<NaiveDate>,

        /// Only use history points on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<NaiveDate>,

        /// Output format (defaults to the config file's choice, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Disable colors
        #[arg(long)]
        plain: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Explain how a metric is measured or how a composite index is computed
    Explain {
        /// Metric id (e.g. eua) or composite id (isa, iis, idt, igd)
        id: String,

        /// History import file; repeatable
        #[arg(long = "data", value_name = "FILE")]
        data: Vec<PathBuf>,

        /// Configuration file (defaults to .farmkpi.toml discovery)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Increase log verbosity
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a starter .farmkpi.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Evaluate { verbosity, .. } | Commands::Explain { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
