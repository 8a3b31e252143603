//! Error types specific to card processors

use thiserror::Error;

/// Failure of the card processor itself, distinct from a non-success status word
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// No card in the reader
    #[error("No card present")]
    CardAbsent,

    /// Transmission error
    #[error("Failed to transmit data")]
    Transmission,

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}
