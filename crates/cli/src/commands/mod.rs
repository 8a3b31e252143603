//! Subcommands of the simterm CLI

mod channel_operations;
mod shell;

use clap::Subcommand;

pub(crate) use channel_operations::*;
pub(crate) use shell::*;

/// Define subcommands for the CLI
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Show the card's answer-to-reset
    Atr,

    /// Open a logical channel, optionally selecting an applet on it
    Open {
        /// AID to select on the new channel, in hex
        #[arg(long)]
        aid: Option<String>,
    },

    /// Send a command APDU and show the response
    Transmit {
        /// Open a channel with this AID first and send the APDU on it
        #[arg(long)]
        aid: Option<String>,

        /// Command APDU in hex
        #[arg(required = true)]
        apdu: String,
    },

    /// Walk through a complete open, select, transmit and close sequence
    Demo,

    /// Interactive shell for channel operations and raw APDUs
    Shell,
}
