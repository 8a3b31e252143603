//! MANAGE CHANNEL command
//!
//! Opens the next free logical channel, or closes a given one.

use crate::Command;
use crate::channel::LogicalChannel;
use crate::constants::{cla, ins, manage_channel_p1};

/// MANAGE CHANNEL (open): `00 70 00 00 01`
///
/// Asks the card to assign the next free channel. The trailing byte is Le: the
/// card answers with the one-byte channel number followed by the status word.
pub const fn manage_channel_open() -> Command {
    Command::new_with_le(
        cla::ISO7816,
        ins::MANAGE_CHANNEL,
        manage_channel_p1::OPEN,
        0x00,
        0x01,
    )
}

/// MANAGE CHANNEL (close): `CLA 70 80 nn 00`
pub const fn manage_channel_close(channel: LogicalChannel) -> Command {
    Command::new_with_le(
        channel.class_byte(),
        ins::MANAGE_CHANNEL,
        manage_channel_p1::CLOSE,
        channel.number(),
        0x00,
    )
}
