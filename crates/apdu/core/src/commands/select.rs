//! SELECT command
//!
//! Selects an applet by its AID on a given logical channel.

use crate::Command;
use crate::aid::Aid;
use crate::channel::LogicalChannel;
use crate::constants::{ins, select_p1, select_p2};

/// SELECT by name: `CLA A4 04 00 Lc AID`
///
/// No Le is appended, so the command is exactly `5 + aid.len()` bytes long.
/// An [`Aid`] never exceeds the Lc range, so this cannot fail.
pub fn select(channel: LogicalChannel, aid: &Aid) -> Command {
    Command {
        cla: channel.class_byte(),
        ins: ins::SELECT,
        p1: select_p1::BY_NAME,
        p2: select_p2::FIRST_OR_ONLY,
        data: Some(aid.to_bytes()),
        le: None,
    }
}
