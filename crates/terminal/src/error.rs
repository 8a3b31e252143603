//! Error types for terminal operations

use bytes::Bytes;
use derive_more::Display;
use simterm_apdu_core::{CardError, LogicalChannel, StatusWord};

/// Result type for terminal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The card did not hand out a usable logical channel
    #[error("Failed to open a logical channel, card answered {}", hex::encode_upper(.response))]
    ChannelOpenFailure {
        /// Raw response to MANAGE CHANNEL open
        response: Bytes,
    },

    /// The card refused the SELECT on a freshly opened channel
    #[error("Failed to select applet on channel {channel}, card answered {}", hex::encode_upper(.response))]
    SelectFailure {
        /// Channel the SELECT was sent on; it has been closed again
        channel: LogicalChannel,
        /// Status word of the SELECT response, `None` when it was too short to carry one
        status: Option<StatusWord>,
        /// Raw response to SELECT
        response: Bytes,
    },

    /// The card processor could not process a command
    #[error(transparent)]
    Transmit(#[from] CardError),

    /// Invalid APDU level input, such as an over-long AID
    #[error(transparent)]
    Apdu(#[from] simterm_apdu_core::Error),
}

/// Flat classification of [`Error`] for callers that only need a discriminant
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No logical channel could be opened
    #[display("channel open failure")]
    ChannelOpen,
    /// The applet could not be selected
    #[display("select failure")]
    Select,
    /// The exchange with the card failed
    #[display("transmit failure")]
    Transmit,
    /// No card is present
    #[display("card absent")]
    CardAbsent,
    /// The caller passed invalid input
    #[display("invalid input")]
    InvalidInput,
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ChannelOpenFailure { .. } => ErrorKind::ChannelOpen,
            Self::SelectFailure { .. } => ErrorKind::Select,
            Self::Transmit(CardError::CardAbsent) => ErrorKind::CardAbsent,
            Self::Transmit(_) => ErrorKind::Transmit,
            Self::Apdu(_) => ErrorKind::InvalidInput,
        }
    }

    /// Status word the card rejected the SELECT with
    pub const fn status(&self) -> Option<StatusWord> {
        match self {
            Self::SelectFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw card response carried by the error, if any
    pub const fn response(&self) -> Option<&Bytes> {
        match self {
            Self::ChannelOpenFailure { response } | Self::SelectFailure { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }
}
