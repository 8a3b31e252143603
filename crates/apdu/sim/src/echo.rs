//! Applet that answers every command with a fixed marker

use bytes::Bytes;
use simterm_apdu_core::{Applet, AppletError};

/// Marker prefix of every [`EchoApplet`] response
pub const ECHO_MARKER: [u8; 4] = [0xDE, 0xAD, 0xC0, 0xDE];

/// Answers every command, SELECT included, with
/// `DE AD C0 DE (CLA & 0x03) 90 00`
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoApplet;

impl EchoApplet {
    /// Create the applet
    pub const fn new() -> Self {
        Self
    }

    fn respond(command: &[u8]) -> Bytes {
        let channel_bits = command.first().map_or(0, |cla| cla & 0x03);
        let mut response = Vec::with_capacity(ECHO_MARKER.len() + 3);
        response.extend_from_slice(&ECHO_MARKER);
        response.extend_from_slice(&[channel_bits, 0x90, 0x00]);
        Bytes::from(response)
    }
}

impl Applet for EchoApplet {
    fn select(&mut self, command: &[u8]) -> Result<Bytes, AppletError> {
        Ok(Self::respond(command))
    }

    fn process(&mut self, command: &[u8]) -> Result<Bytes, AppletError> {
        Ok(Self::respond(command))
    }
}
