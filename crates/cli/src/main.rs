//! Command-line interface for a logical channel terminal over a simulated card
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

use clap::Parser;
use tracing::debug;

mod commands;
mod utils;

use commands::*;
use utils::CardArgs;

#[derive(Parser, Debug)]
#[command(version, about = "Drive a secure element terminal over a simulated card")]
struct Cli {
    /// Debug level output
    #[arg(short, long)]
    verbose: bool,

    /// Simulated card options
    #[command(flatten)]
    card: CardArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let terminal = cli.card.build_terminal()?;
    debug!(terminal = terminal.name(), "Terminal ready");

    match &cli.command {
        Commands::Atr => atr_command(&terminal)?,
        Commands::Open { aid } => open_command(&terminal, aid.as_ref())?,
        Commands::Transmit { aid, apdu } => transmit_command(&terminal, aid.as_ref(), apdu)?,
        Commands::Demo => demo_command(&terminal, &cli.card.applet_aids()?)?,
        Commands::Shell => shell_command(&terminal)?,
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();
}
