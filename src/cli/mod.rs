//! CLI module for farmkpi
//!
//! - Argument parsing (`args`)
//! - Runtime setup such as logging (`setup`)

pub mod args;
pub mod setup;

pub use args::{Cli, Commands};
pub use setup::init_logging;

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
