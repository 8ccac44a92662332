use anyhow::Result;
use farmkpi::cli::{init_logging, parse_args, Commands};
use farmkpi::commands::evaluate::{handle_evaluate, EvaluateConfig};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Evaluate {
            data,
            config,
            from,
            to,
            format,
            output,
            plain,
            verbosity: _,
        } => handle_evaluate(EvaluateConfig {
            data,
            config,
            from,
            to,
            format,
            output,
            plain,
        }),
        Commands::Explain {
            id,
            data,
            config,
            verbosity: _,
        } => farmkpi::commands::explain::handle_explain(&id, &data, config),
        Commands::Init { force } => farmkpi::commands::init::init_config(force),
    }
}
