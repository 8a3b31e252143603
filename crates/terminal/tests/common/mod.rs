//! Shared fixtures for terminal integration tests

use bytes::Bytes;
use simterm_apdu_core::{Aid, Applet, CardError, CardProcessor, FnApplet};
use simterm_apdu_sim::MockCard;
use simterm_terminal::Terminal;

/// AID used throughout the integration tests
pub const TEST_AID: [u8; 8] = [0xA0, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00];

/// Payload the test applet returns before its status word
pub const TEST_PAYLOAD: [u8; 3] = [0x01, 0x02, 0x03];

/// [`TEST_AID`] as an [`Aid`]
pub fn test_aid() -> Aid {
    Aid::new(TEST_AID.to_vec()).unwrap()
}

/// Fixed `01 02 03 90 00` response for every command the applet sees
pub fn fixed_payload_response() -> Bytes {
    let mut response = TEST_PAYLOAD.to_vec();
    response.extend_from_slice(&[0x90, 0x00]);
    Bytes::from(response)
}

/// Terminal over a recorded mock card with the fixed-payload applet installed
pub fn terminal_with_test_applet() -> Terminal<Recording<MockCard>> {
    let terminal = Terminal::new(Recording::new(MockCard::new()));
    terminal.install_applet(
        test_aid(),
        Box::new(FnApplet::new(|_: &[u8]| fixed_payload_response())),
    );
    terminal
}

/// Wraps a processor and records every command passed through it
#[derive(Debug)]
pub struct Recording<P> {
    inner: P,
    commands: Vec<Bytes>,
}

impl<P> Recording<P> {
    /// Wrap `inner`
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            commands: Vec::new(),
        }
    }

    /// Commands seen so far
    pub fn commands(&self) -> &[Bytes] {
        &self.commands
    }

    /// The wrapped processor
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: CardProcessor> CardProcessor for Recording<P> {
    fn do_process(&mut self, command: &[u8]) -> Result<Bytes, CardError> {
        self.commands.push(Bytes::copy_from_slice(command));
        self.inner.process(command)
    }

    fn install_applet(&mut self, aid: Aid, applet: Box<dyn Applet>) {
        self.inner.install_applet(aid, applet);
    }

    fn atr(&self) -> Bytes {
        self.inner.atr()
    }

    fn is_card_present(&self) -> bool {
        self.inner.is_card_present()
    }
}
