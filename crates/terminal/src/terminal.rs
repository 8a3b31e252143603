//! The terminal surface exposed to secure element clients

use bytes::Bytes;
use simterm_apdu_core::{Aid, Applet, CardProcessor, LogicalChannel};
use tracing::{debug, info, warn};

use crate::channel::OpenLogicalChannelResponse;
use crate::config::TerminalConfig;
use crate::error::Result;
use crate::manager::ChannelManager;

/// Secure element terminal backed by a card processor
///
/// All operations take `&self`; concurrent callers are serialised by the
/// underlying [`ChannelManager`].
#[derive(Debug)]
pub struct Terminal<P> {
    config: TerminalConfig,
    channels: ChannelManager<P>,
}

impl<P: CardProcessor> Terminal<P> {
    /// Create a terminal with the default configuration
    pub fn new(processor: P) -> Self {
        Self::with_config(processor, TerminalConfig::default())
    }

    /// Create a terminal with a specific configuration
    pub fn with_config(processor: P, config: TerminalConfig) -> Self {
        Self {
            config,
            channels: ChannelManager::new(processor),
        }
    }

    /// Terminal name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration in use
    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Channel manager driving the processor
    pub const fn channels(&self) -> &ChannelManager<P> {
        &self.channels
    }

    /// Lifecycle hook invoked when a client binds to the terminal
    pub fn connect(&self) {
        info!(terminal = %self.config.name, "Terminal connected");
    }

    /// Lifecycle hook invoked when the client goes away
    pub fn disconnect(&self) {
        info!(terminal = %self.config.name, "Terminal disconnected");
    }

    /// Open a logical channel, selecting `aid` on it when given
    pub fn open_logical_channel(&self, aid: Option<&[u8]>) -> Result<OpenLogicalChannelResponse> {
        match aid {
            Some(aid) => self.channels.open_with_aid(&Aid::try_from(aid)?),
            None => self.channels.open_default(),
        }
    }

    /// Close a logical channel
    ///
    /// Channel numbers outside `0..=19` are ignored; failures are logged and
    /// not reported.
    pub fn close_logical_channel(&self, channel: i32) {
        let Ok(channel) = LogicalChannel::try_from(channel) else {
            debug!(channel, "Ignoring close of invalid channel number");
            return;
        };
        if let Err(e) = self.channels.close_channel(channel) {
            warn!(%channel, error = %e, "Failed to close logical channel");
        }
    }

    /// Send a raw command APDU and return the raw response APDU
    pub fn transmit(&self, command: &[u8]) -> Result<Bytes> {
        self.channels.transmit(command)
    }

    /// Answer-to-reset of the card
    pub fn atr(&self) -> Bytes {
        self.channels.atr()
    }

    /// Whether a card is present
    pub fn is_card_present(&self) -> bool {
        self.channels.is_card_present()
    }

    /// Response of the last successful SELECT
    pub fn select_response(&self) -> Option<Bytes> {
        self.channels.last_select_response()
    }

    /// Event action string for secure element state changes
    pub fn se_state_changed_action(&self) -> &str {
        &self.config.se_state_changed_action
    }

    /// SIM file access; this terminal has no SIM file system
    pub fn sim_io_exchange(&self, file_id: i32, file_path: &str, command: &[u8]) -> Option<Bytes> {
        debug!(file_id, file_path, command = %hex::encode_upper(command), "SIM IO not supported");
        None
    }

    /// Register an applet with the processor
    pub fn install_applet(&self, aid: Aid, applet: Box<dyn Applet>) {
        self.channels.install_applet(aid, applet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};
    use hex_literal::hex;
    use simterm_apdu_sim::ScriptedCard;

    #[test]
    fn test_close_out_of_range_sends_nothing() {
        let terminal = Terminal::new(ScriptedCard::new());
        terminal.close_logical_channel(-1);
        terminal.close_logical_channel(20);
        terminal.close_logical_channel(i32::MAX);
        assert!(terminal.channels().processor().commands().is_empty());
    }

    #[test]
    fn test_close_failure_is_swallowed() {
        let terminal = Terminal::new(ScriptedCard::new());
        terminal.close_logical_channel(2);
        assert_eq!(terminal.channels().processor().commands()[0].as_ref(), hex!("0270800200"));
    }

    #[test]
    fn test_open_without_aid() {
        let terminal = Terminal::new(ScriptedCard::new().with_response(hex!("019000").to_vec()));
        let opened = terminal.open_logical_channel(None).unwrap();
        assert_eq!(opened.channel.number(), 1);
        assert_eq!(opened.select_response.as_ref(), hex!("019000"));
        assert!(terminal.select_response().is_none());
    }

    #[test]
    fn test_open_with_oversized_aid() {
        let terminal = Terminal::new(ScriptedCard::new());
        let err = terminal.open_logical_channel(Some(&[0xA0; 256][..])).unwrap_err();
        assert!(matches!(err, Error::Apdu(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(terminal.channels().processor().commands().is_empty());
    }

    #[test]
    fn test_supplementary_surface() {
        let terminal = Terminal::new(ScriptedCard::new().with_atr(vec![0x3B, 0x11]));
        terminal.connect();
        assert_eq!(terminal.name(), "DummyTerminal");
        assert_eq!(
            terminal.se_state_changed_action(),
            "org.simalliance.openmobileapi.DummyTerminalEvent"
        );
        assert_eq!(terminal.atr().as_ref(), &[0x3B, 0x11]);
        assert!(terminal.is_card_present());
        assert!(terminal.sim_io_exchange(0x6F07, "3F00", &hex!("00B0000009")).is_none());
        terminal.disconnect();
    }
}
