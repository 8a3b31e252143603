//! Logical channel bookkeeping types

use bytes::Bytes;
use derive_more::Display;
use simterm_apdu_core::LogicalChannel;

/// State of a logical channel as tracked by the terminal
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Opened with MANAGE CHANNEL, no applet selected through the terminal
    #[display("open")]
    Open,
    /// Opened and an applet selected on it
    #[display("selected")]
    Selected,
}

/// Result of opening a logical channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLogicalChannelResponse {
    /// The channel the card assigned
    pub channel: LogicalChannel,
    /// Full response to the SELECT, or to MANAGE CHANNEL when no AID was given
    pub select_response: Bytes,
}

impl OpenLogicalChannelResponse {
    /// Select response without its trailing status word
    pub fn payload(&self) -> &[u8] {
        let len = self.select_response.len().saturating_sub(2);
        &self.select_response[..len]
    }
}
