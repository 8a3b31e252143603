//! Core traits and types for ISO/IEC 7816-4 logical channel operations
//!
//! This crate provides the foundational types used by a terminal that talks to a
//! smart card over multiplexed logical channels.
//!
//! ## Overview
//!
//! - Building the command-APDUs a terminal needs to manage logical channels
//!   (MANAGE CHANNEL open/close and SELECT by name)
//! - Encoding and decoding the logical channel number carried in the class byte
//! - Parsing response-APDUs and interpreting their status words
//! - The [`CardProcessor`] trait a card (real or simulated) implements, and the
//!   [`Applet`] trait plus [`AppletRegistry`] used to dispatch by AID
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod aid;
pub mod applet;
pub mod channel;
pub mod command;
pub mod commands;
pub mod constants;
pub mod error;
pub mod processor;
pub mod response;

pub use aid::Aid;
pub use applet::{Applet, AppletError, AppletRegistry, FnApplet};
pub use channel::LogicalChannel;
pub use command::{ApduCommand, Command, ExpectedLength, MAX_DATA_LEN};
pub use error::Error;
pub use processor::{CardProcessor, error::CardError};
pub use response::status::StatusWord;
pub use response::{ApduResponse, Response};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    // Core types
    pub use crate::{Bytes, BytesMut, Error};

    // Command related
    pub use crate::command::{ApduCommand, Command, ExpectedLength};
    pub use crate::commands::{manage_channel_close, manage_channel_open, select};

    // Channel and AID
    pub use crate::{Aid, LogicalChannel};

    // Response related
    pub use crate::Response;
    pub use crate::response::ApduResponse;
    pub use crate::response::status::{StatusWord, common as status};
    pub use crate::response::utils;

    // Card layer
    pub use crate::applet::{Applet, AppletError, AppletRegistry, FnApplet};
    pub use crate::processor::{CardProcessor, error::CardError};
}
