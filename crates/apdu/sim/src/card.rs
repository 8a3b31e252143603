//! Simulated card with logical channels and an applet registry

use std::fmt;

use bytes::Bytes;
use simterm_apdu_core::constants::{ins, manage_channel_p1, select_p1};
use simterm_apdu_core::prelude::*;
use tracing::debug;

use crate::config::MockCardConfig;

/// What a logical channel slot on the card holds
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Closed,
    Open,
    Selected(Aid),
}

/// A card that keeps logical channel state and dispatches to applets by AID
///
/// The basic channel is always open. MANAGE CHANNEL and SELECT by name are
/// handled by the card itself; every other command goes to the applet
/// selected on the channel its class byte addresses.
pub struct MockCard {
    config: MockCardConfig,
    present: bool,
    applets: AppletRegistry,
    slots: Vec<Slot>,
}

impl fmt::Debug for MockCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockCard")
            .field("atr", &hex::encode_upper(&self.config.atr))
            .field("present", &self.present)
            .field("applets", &self.applets.len())
            .field("slots", &self.slots)
            .finish()
    }
}

impl Default for MockCard {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCard {
    /// Create a card with the default configuration
    pub fn new() -> Self {
        Self::with_config(MockCardConfig::default())
    }

    /// Create a card with a specific configuration
    pub fn with_config(config: MockCardConfig) -> Self {
        let mut slots = vec![Slot::Closed; config.channel_count()];
        slots[0] = Slot::Open;
        Self {
            config,
            present: true,
            applets: AppletRegistry::new(),
            slots,
        }
    }

    /// The configuration this card was created with
    pub const fn config(&self) -> &MockCardConfig {
        &self.config
    }

    /// Take the card out of the reader
    pub fn remove(&mut self) {
        debug!("Card removed");
        self.present = false;
    }

    /// Put the card back; this also resets it
    pub fn insert(&mut self) {
        debug!("Card inserted");
        self.present = true;
        self.reset();
    }

    /// Close every channel except the basic one and deselect all applets
    pub fn reset(&mut self) {
        for index in 0..self.slots.len() {
            self.deselect(index);
            self.slots[index] = Slot::Closed;
        }
        self.slots[0] = Slot::Open;
    }

    /// Whether `channel` is currently open on the card
    pub fn is_channel_open(&self, channel: LogicalChannel) -> bool {
        self.is_open(channel.number() as usize)
    }

    /// AID of the applet selected on `channel`, if any
    pub fn selected_aid(&self, channel: LogicalChannel) -> Option<&Aid> {
        match self.slots.get(channel.number() as usize) {
            Some(Slot::Selected(aid)) => Some(aid),
            _ => None,
        }
    }

    /// Installed applet registry
    pub const fn applets(&self) -> &AppletRegistry {
        &self.applets
    }

    fn is_open(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Open | Slot::Selected(_)))
    }

    /// Deselect whatever applet is selected on slot `index`, leaving it open
    fn deselect(&mut self, index: usize) {
        if let Some(Slot::Selected(aid)) = self.slots.get(index) {
            if let Some(applet) = self.applets.get_mut(aid.as_bytes()) {
                applet.deselect();
            }
            self.slots[index] = Slot::Open;
        }
    }

    fn open_channel(&mut self, p2: u8) -> Bytes {
        if p2 != 0 {
            return status_only(status::INCORRECT_P1P2);
        }

        let Some(index) = (1..self.slots.len()).find(|&i| self.slots[i] == Slot::Closed) else {
            debug!("No free logical channel");
            return status_only(status::FUNCTION_NOT_SUPPORTED);
        };

        self.slots[index] = Slot::Open;
        debug!(channel = index, "Logical channel opened");
        Bytes::from(utils::with_status(&[index as u8], status::SUCCESS))
    }

    fn close_channel(&mut self, target: u8) -> Bytes {
        let index = target as usize;
        if index == 0 {
            return status_only(status::INCORRECT_P1P2);
        }
        if !self.is_open(index) {
            return status_only(status::LOGICAL_CHANNEL_NOT_SUPPORTED);
        }

        self.deselect(index);
        self.slots[index] = Slot::Closed;
        debug!(channel = index, "Logical channel closed");
        status_only(status::SUCCESS)
    }

    fn select_by_name(&mut self, index: usize, command: &[u8]) -> Bytes {
        let Ok(parsed) = Command::from_bytes(command) else {
            return status_only(status::WRONG_LENGTH);
        };
        let aid = parsed.data().unwrap_or_default();

        if !self.applets.contains(aid) {
            debug!(aid = %hex::encode_upper(aid), "No applet with this AID");
            return status_only(status::FILE_NOT_FOUND);
        }
        let Ok(aid) = Aid::try_from(aid) else {
            return status_only(status::WRONG_LENGTH);
        };

        self.deselect(index);

        let Some(applet) = self.applets.get_mut(aid.as_bytes()) else {
            return status_only(status::FILE_NOT_FOUND);
        };
        match applet.select(command) {
            Ok(response) => {
                if is_success(&response) {
                    debug!(channel = index, %aid, "Applet selected");
                    self.slots[index] = Slot::Selected(aid);
                }
                response
            }
            Err(e) => status_only(e.status_word()),
        }
    }

    fn dispatch(&mut self, index: usize, command: &[u8]) -> Bytes {
        let Some(Slot::Selected(aid)) = self.slots.get(index) else {
            return status_only(status::COMMAND_NOT_ALLOWED);
        };
        let Some(applet) = self.applets.get_mut(aid.as_bytes()) else {
            return status_only(status::COMMAND_NOT_ALLOWED);
        };
        applet
            .process(command)
            .unwrap_or_else(|e| status_only(e.status_word()))
    }
}

impl CardProcessor for MockCard {
    fn do_process(&mut self, command: &[u8]) -> Result<Bytes, CardError> {
        if !self.present {
            return Err(CardError::CardAbsent);
        }

        let &[cla, instruction, p1, p2, ..] = command else {
            return Ok(status_only(status::WRONG_LENGTH));
        };

        let index = LogicalChannel::from_class_byte(cla).number() as usize;

        let response = match (instruction, p1) {
            (ins::MANAGE_CHANNEL, manage_channel_p1::OPEN) => self.open_channel(p2),
            (ins::MANAGE_CHANNEL, manage_channel_p1::CLOSE) => self.close_channel(p2),
            (ins::MANAGE_CHANNEL, _) => status_only(status::INCORRECT_P1P2),
            _ if !self.is_open(index) => status_only(status::LOGICAL_CHANNEL_NOT_SUPPORTED),
            (ins::SELECT, select_p1::BY_NAME) => self.select_by_name(index, command),
            _ => self.dispatch(index, command),
        };

        Ok(response)
    }

    fn install_applet(&mut self, aid: Aid, applet: Box<dyn Applet>) {
        debug!(%aid, "Installing applet");
        if self.applets.install(aid, applet).is_some() {
            debug!("Replaced a previously installed applet");
        }
    }

    fn atr(&self) -> Bytes {
        self.config.atr.clone()
    }

    fn is_card_present(&self) -> bool {
        self.present
    }
}

fn status_only(sw: StatusWord) -> Bytes {
    Bytes::copy_from_slice(&sw.to_bytes())
}

fn is_success(response: &[u8]) -> bool {
    utils::extract_status_and_payload(response).is_ok_and(|(sw, _)| sw.is_success())
}
