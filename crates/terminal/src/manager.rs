//! Logical channel manager
//!
//! The manager turns the terminal's channel operations into MANAGE CHANNEL
//! and SELECT exchanges with a [`CardProcessor`] and keeps track of which
//! channels it has opened. Every public operation holds the session lock for
//! its full duration, so an open-then-select sequence and its cleanup can
//! never interleave with another caller's commands.

use std::collections::BTreeMap;

use bytes::Bytes;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use simterm_apdu_core::commands::{manage_channel_close, manage_channel_open, select};
use simterm_apdu_core::response::utils;
use simterm_apdu_core::{Aid, ApduCommand, Applet, CardProcessor, LogicalChannel, StatusWord};
use tracing::{Level, debug, info, instrument, warn};

use crate::channel::{ChannelState, OpenLogicalChannelResponse};
use crate::error::{Error, Result};

/// Processor plus the bookkeeping guarded with it
#[derive(Debug)]
struct Session<P> {
    processor: P,
    channels: BTreeMap<LogicalChannel, ChannelState>,
    select_response: Option<Bytes>,
}

/// Opens, selects on and closes logical channels over a card processor
#[derive(Debug)]
pub struct ChannelManager<P> {
    session: Mutex<Session<P>>,
}

impl<P: CardProcessor> ChannelManager<P> {
    /// Create a manager that owns `processor`
    pub fn new(processor: P) -> Self {
        Self {
            session: Mutex::new(Session {
                processor,
                channels: BTreeMap::new(),
                select_response: None,
            }),
        }
    }

    /// Open a logical channel without selecting anything on it
    ///
    /// The returned `select_response` is the raw 3-byte MANAGE CHANNEL response.
    #[instrument(level = "debug", skip(self))]
    pub fn open_default(&self) -> Result<OpenLogicalChannelResponse> {
        self.session.lock().open_default()
    }

    /// Open a logical channel and select `aid` on it
    ///
    /// If the SELECT is rejected the channel is closed again before
    /// [`Error::SelectFailure`] is returned.
    #[instrument(level = "debug", skip_all, fields(aid = %aid))]
    pub fn open_with_aid(&self, aid: &Aid) -> Result<OpenLogicalChannelResponse> {
        self.session.lock().open_with_aid(aid)
    }

    /// Close `channel` and forget it, returning the card's raw answer
    ///
    /// The answer is not validated; closing a channel twice sends two close
    /// commands and is not an error.
    #[instrument(level = "debug", skip(self))]
    pub fn close_channel(&self, channel: LogicalChannel) -> Result<Bytes> {
        self.session.lock().close_channel(channel)
    }

    /// Send raw command bytes and return the raw response
    pub fn transmit(&self, command: &[u8]) -> Result<Bytes> {
        Ok(self.session.lock().processor.process(command)?)
    }

    /// Register an applet with the underlying processor
    pub fn install_applet(&self, aid: Aid, applet: Box<dyn Applet>) {
        self.session.lock().processor.install_applet(aid, applet);
    }

    /// Answer-to-reset of the card
    pub fn atr(&self) -> Bytes {
        self.session.lock().processor.atr()
    }

    /// Whether a card is present
    pub fn is_card_present(&self) -> bool {
        self.session.lock().processor.is_card_present()
    }

    /// Response of the most recent successful SELECT
    pub fn last_select_response(&self) -> Option<Bytes> {
        self.session.lock().select_response.clone()
    }

    /// Bookkeeping state of `channel`, `None` when the manager has not opened it
    pub fn channel_state(&self, channel: LogicalChannel) -> Option<ChannelState> {
        self.session.lock().channels.get(&channel).copied()
    }

    /// Channels the manager has opened and not yet closed, in ascending order
    pub fn open_channels(&self) -> Vec<LogicalChannel> {
        self.session.lock().channels.keys().copied().collect()
    }

    /// Lock the session and borrow the processor
    ///
    /// # Deadlocks
    ///
    /// The guard holds the session lock, which is not re-entrant. Calling any
    /// other method of this manager, or of the [`Terminal`](crate::Terminal)
    /// owning it, on the same thread before the guard is dropped deadlocks.
    pub fn processor(&self) -> MappedMutexGuard<'_, P> {
        MutexGuard::map(self.session.lock(), |session| &mut session.processor)
    }

    /// Give the processor back
    pub fn into_processor(self) -> P {
        self.session.into_inner().processor
    }
}

impl<P: CardProcessor> Session<P> {
    fn open_default(&mut self) -> Result<OpenLogicalChannelResponse> {
        let response = self.processor.process(&manage_channel_open().to_bytes())?;

        let channel = match *response {
            [number, 0x90, 0x00] => match LogicalChannel::new(number) {
                Ok(channel) => Some(channel),
                Err(_) => {
                    warn!(
                        channel = number,
                        "Card opened a channel outside 0..=19, it stays allocated card-side"
                    );
                    None
                }
            },
            _ => None,
        };
        let Some(channel) = channel else {
            warn!(response = %hex::encode_upper(&response), "Card did not open a logical channel");
            return Err(Error::ChannelOpenFailure { response });
        };

        self.channels.insert(channel, ChannelState::Open);
        debug!(%channel, "Logical channel opened");
        Ok(OpenLogicalChannelResponse {
            channel,
            select_response: response,
        })
    }

    fn open_with_aid(&mut self, aid: &Aid) -> Result<OpenLogicalChannelResponse> {
        let channel = self.open_default()?.channel;

        let response = match self.processor.process(&select(channel, aid).to_bytes()) {
            Ok(response) => response,
            Err(e) => {
                self.discard(channel);
                return Err(e.into());
            }
        };

        let status = status_of(&response);
        if !status.is_some_and(|sw| sw.is_success()) {
            log_rejected_select(channel, status);
            self.discard(channel);
            return Err(Error::SelectFailure {
                channel,
                status,
                response,
            });
        }

        self.channels.insert(channel, ChannelState::Selected);
        self.select_response = Some(response.clone());
        info!(%channel, %aid, "Applet selected");
        Ok(OpenLogicalChannelResponse {
            channel,
            select_response: response,
        })
    }

    fn close_channel(&mut self, channel: LogicalChannel) -> Result<Bytes> {
        self.channels.remove(&channel);
        let response = self
            .processor
            .process(&manage_channel_close(channel).to_bytes())?;
        debug!(%channel, response = %hex::encode_upper(&response), "Logical channel closed");
        Ok(response)
    }

    /// Close a channel whose SELECT failed. The close is sent once and its
    /// outcome only logged.
    fn discard(&mut self, channel: LogicalChannel) {
        match self.close_channel(channel) {
            Ok(response) if status_of(&response).is_some_and(|sw| sw.is_success()) => {}
            Ok(response) => {
                warn!(%channel, response = %hex::encode_upper(&response), "Card rejected closing channel after failed select");
            }
            Err(e) => {
                warn!(%channel, error = %e, "Failed to close channel after failed select");
            }
        }
    }
}

fn status_of(response: &[u8]) -> Option<StatusWord> {
    utils::extract_status_and_payload(response)
        .ok()
        .map(|(sw, _)| sw)
}

fn log_rejected_select(channel: LogicalChannel, status: Option<StatusWord>) {
    let Some(sw) = status else {
        warn!(%channel, "SELECT response too short");
        return;
    };
    if sw.tracing_level() == Level::INFO {
        info!(%channel, status = %sw, reason = sw.description(), "SELECT rejected");
    } else {
        warn!(%channel, status = %sw, reason = sw.description(), "SELECT rejected");
    }
}
