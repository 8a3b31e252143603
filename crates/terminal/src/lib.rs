//! Secure element terminal over ISO/IEC 7816-4 logical channels
//!
//! A [`Terminal`] lets a client open logical channels on a card, optionally
//! selecting an applet by AID on each, transmit raw APDUs, and close channels
//! again. It talks downward to anything implementing
//! [`CardProcessor`](simterm_apdu_core::CardProcessor).
//!
//! ```
//! use simterm_apdu_sim::{EchoApplet, MockCard};
//! use simterm_apdu_core::Aid;
//! use simterm_terminal::Terminal;
//!
//! let terminal = Terminal::new(MockCard::new());
//! let aid = Aid::from_hex("A000000003000000").unwrap();
//! terminal.install_applet(aid.clone(), Box::new(EchoApplet::new()));
//!
//! let opened = terminal.open_logical_channel(Some(aid.as_bytes())).unwrap();
//! assert_eq!(opened.channel.number(), 1);
//! terminal.close_logical_channel(1);
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod channel;
mod config;
mod error;
mod manager;
mod terminal;

pub use channel::{ChannelState, OpenLogicalChannelResponse};
pub use config::{DEFAULT_NAME, DEFAULT_SE_STATE_CHANGED_ACTION, TerminalConfig};
pub use error::{Error, ErrorKind, Result};
pub use manager::ChannelManager;
pub use terminal::Terminal;
