//! Simulated smart cards for driving a logical channel terminal without hardware
//!
//! - [`MockCard`] keeps real logical channel state, answers MANAGE CHANNEL and
//!   SELECT by name itself, and forwards everything else to installed applets.
//! - [`ScriptedCard`] replays a fixed list of responses and records the
//!   commands it receives, for exercising exact byte sequences.
//! - [`EchoApplet`] is a trivial applet useful for demos and tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod card;
mod config;
mod echo;
mod scripted;

pub use card::MockCard;
pub use config::{DEFAULT_ATR, MockCardConfig};
pub use echo::{ECHO_MARKER, EchoApplet};
pub use scripted::ScriptedCard;
