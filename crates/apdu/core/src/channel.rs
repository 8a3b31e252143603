//! Logical channel numbers and their class byte encoding
//!
//! ISO/IEC 7816-4 carries the logical channel number in the CLA byte of every
//! command. Channels 0 to 3 use the first interindustry class (`b2 b1` hold the
//! number); channels 4 to 19 use the further interindustry class, where bit 7 is
//! set and `b4..b1` hold `number - 4`.

use derive_more::Display;

use crate::Error;
use crate::constants::cla;

/// A logical channel number in the range `0..=19`
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{_0}")]
pub struct LogicalChannel(u8);

impl LogicalChannel {
    /// The basic channel, always open on a card
    pub const BASIC: Self = Self(0);

    /// Highest addressable channel number
    pub const MAX: u8 = 19;

    /// Number of addressable channels, including the basic channel
    pub const COUNT: usize = Self::MAX as usize + 1;

    /// Create a channel number, rejecting numbers the class byte cannot carry
    pub const fn new(number: u8) -> Result<Self, Error> {
        if number > Self::MAX {
            Err(Error::InvalidChannel(number as i64))
        } else {
            Ok(Self(number))
        }
    }

    /// The raw channel number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Whether this is the basic channel (0)
    pub const fn is_basic(self) -> bool {
        self.0 == 0
    }

    /// Class byte addressing this channel
    pub const fn class_byte(self) -> u8 {
        if self.0 < 4 {
            self.0
        } else {
            cla::FURTHER_INTERINDUSTRY | (self.0 - 4)
        }
    }

    /// Decode the channel a class byte addresses
    pub const fn from_class_byte(class: u8) -> Self {
        if class & cla::FURTHER_INTERINDUSTRY != 0 {
            Self(4 + (class & 0x0F))
        } else {
            Self(class & 0x03)
        }
    }
}

impl TryFrom<u8> for LogicalChannel {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self, Error> {
        Self::new(number)
    }
}

impl TryFrom<i32> for LogicalChannel {
    type Error = Error;

    fn try_from(number: i32) -> Result<Self, Error> {
        u8::try_from(number)
            .map_err(|_| Error::InvalidChannel(number.into()))
            .and_then(Self::new)
    }
}

impl From<LogicalChannel> for u8 {
    fn from(channel: LogicalChannel) -> Self {
        channel.0
    }
}
