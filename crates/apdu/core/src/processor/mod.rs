//! Card processor trait
//!
//! A card processor accepts raw command-APDU bytes and returns raw
//! response-APDU bytes. It owns applet registration and the answer-to-reset.
//! It has no knowledge of logical channel bookkeeping; that lives with the
//! terminal driving it.

pub mod error;

use std::fmt;

use bytes::Bytes;
pub use error::CardError;
use tracing::{debug, trace};

use crate::aid::Aid;
use crate::applet::Applet;

/// Trait for smart-card processors, real or simulated
pub trait CardProcessor: Send + fmt::Debug {
    /// Send raw command bytes to the card and return the response bytes
    ///
    /// An `Err` means the exchange itself failed; a card that answers with a
    /// non-success status word still returns `Ok`.
    fn process(&mut self, command: &[u8]) -> Result<Bytes, CardError> {
        trace!(command = %hex::encode_upper(command), "Processing command");
        let result = self.do_process(command);
        match &result {
            Ok(response) => {
                trace!(response = %hex::encode_upper(response), "Received response");
            }
            Err(e) => {
                debug!(error = ?e, "Card processor failed to process command");
            }
        }
        result
    }

    /// Internal implementation of process
    /// This is the method that concrete implementations should override
    fn do_process(&mut self, command: &[u8]) -> Result<Bytes, CardError>;

    /// Register an applet that a SELECT for `aid` will make current
    fn install_applet(&mut self, aid: Aid, applet: Box<dyn Applet>);

    /// Answer-to-reset of the card, static for the session
    fn atr(&self) -> Bytes;

    /// Whether a card is present
    fn is_card_present(&self) -> bool;
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MockProcessor {
    /// Mock responses to return, in order
    pub(crate) responses: Vec<Bytes>,
    /// Commands that were sent
    pub(crate) commands: Vec<Bytes>,
    /// AIDs passed to install_applet
    pub(crate) installed: Vec<Aid>,
}

#[cfg(test)]
impl CardProcessor for MockProcessor {
    fn do_process(&mut self, command: &[u8]) -> Result<Bytes, CardError> {
        self.commands.push(Bytes::copy_from_slice(command));

        if self.responses.is_empty() {
            return Err(CardError::Transmission);
        }
        Ok(self.responses.remove(0))
    }

    fn install_applet(&mut self, aid: Aid, _applet: Box<dyn Applet>) {
        self.installed.push(aid);
    }

    fn atr(&self) -> Bytes {
        Bytes::from_static(&[0x3B, 0x00])
    }

    fn is_card_present(&self) -> bool {
        true
    }
}
