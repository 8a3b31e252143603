//! Card processor that replays scripted responses and records commands

use std::collections::VecDeque;

use bytes::Bytes;
use simterm_apdu_core::{Aid, Applet, CardError, CardProcessor};

use crate::config::DEFAULT_ATR;

/// Processor that returns queued outcomes in order and records every command
///
/// Once the script runs out, further commands fail with
/// [`CardError::Transmission`].
#[derive(Debug)]
pub struct ScriptedCard {
    script: VecDeque<Result<Bytes, CardError>>,
    commands: Vec<Bytes>,
    installed: Vec<Aid>,
    atr: Bytes,
    present: bool,
}

impl Default for ScriptedCard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCard {
    /// Create a processor with an empty script
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            commands: Vec::new(),
            installed: Vec::new(),
            atr: Bytes::from_static(&DEFAULT_ATR),
            present: true,
        }
    }

    /// Queue a response
    pub fn with_response(mut self, response: impl Into<Bytes>) -> Self {
        self.script.push_back(Ok(response.into()));
        self
    }

    /// Queue a processor failure
    pub fn with_failure(mut self, error: CardError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Set the answer-to-reset
    pub fn with_atr(mut self, atr: impl Into<Bytes>) -> Self {
        self.atr = atr.into();
        self
    }

    /// Set whether a card is reported present
    pub const fn with_presence(mut self, present: bool) -> Self {
        self.present = present;
        self
    }

    /// Queue a response on an existing processor
    pub fn push_response(&mut self, response: impl Into<Bytes>) {
        self.script.push_back(Ok(response.into()));
    }

    /// Commands received so far, in order
    pub fn commands(&self) -> &[Bytes] {
        &self.commands
    }

    /// AIDs passed to `install_applet`, in order
    pub fn installed(&self) -> &[Aid] {
        &self.installed
    }

    /// Number of scripted outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl CardProcessor for ScriptedCard {
    fn do_process(&mut self, command: &[u8]) -> Result<Bytes, CardError> {
        self.commands.push(Bytes::copy_from_slice(command));
        self.script.pop_front().unwrap_or(Err(CardError::Transmission))
    }

    fn install_applet(&mut self, aid: Aid, _applet: Box<dyn Applet>) {
        self.installed.push(aid);
    }

    fn atr(&self) -> Bytes {
        self.atr.clone()
    }

    fn is_card_present(&self) -> bool {
        self.present
    }
}
