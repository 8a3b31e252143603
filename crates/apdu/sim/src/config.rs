//! Configuration options for the simulated card

use bytes::Bytes;
use simterm_apdu_core::LogicalChannel;

/// Answer-to-reset reported when none is configured
pub const DEFAULT_ATR: [u8; 5] = [0x3B, 0x80, 0x80, 0x01, 0x01];

/// Configuration options for a [`MockCard`](crate::MockCard)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCardConfig {
    /// Answer-to-reset returned for the whole session
    pub atr: Bytes,

    /// Number of logical channels the card supports, the basic channel included.
    /// Clamped to `1..=20` when the card is created.
    pub max_logical_channels: u8,
}

impl Default for MockCardConfig {
    fn default() -> Self {
        Self {
            atr: Bytes::from_static(&DEFAULT_ATR),
            max_logical_channels: LogicalChannel::COUNT as u8,
        }
    }
}

impl MockCardConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer-to-reset
    pub fn with_atr(mut self, atr: impl Into<Bytes>) -> Self {
        self.atr = atr.into();
        self
    }

    /// Set the number of supported logical channels
    pub const fn with_max_logical_channels(mut self, max: u8) -> Self {
        self.max_logical_channels = max;
        self
    }

    /// Channel count actually usable, within what the class byte can address
    pub const fn channel_count(&self) -> usize {
        match self.max_logical_channels {
            0 => 1,
            n if n as usize > LogicalChannel::COUNT => LogicalChannel::COUNT,
            n => n as usize,
        }
    }
}
