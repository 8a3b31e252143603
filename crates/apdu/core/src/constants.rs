//! Constants for the ISO/IEC 7816-4 commands used on logical channels

/// Command classes
pub mod cla {
    /// First interindustry class, basic channel
    pub const ISO7816: u8 = 0x00;
    /// Further interindustry class marker (channels 4 to 19)
    pub const FURTHER_INTERINDUSTRY: u8 = 0x40;
}

/// Instruction codes
pub mod ins {
    /// MANAGE CHANNEL command
    pub const MANAGE_CHANNEL: u8 = 0x70;
    /// SELECT command
    pub const SELECT: u8 = 0xA4;
}

/// Parameter values for MANAGE CHANNEL command (P1)
pub mod manage_channel_p1 {
    /// Open a logical channel
    pub const OPEN: u8 = 0x00;
    /// Close the logical channel given in P2
    pub const CLOSE: u8 = 0x80;
}

/// Parameter values for SELECT command (P1)
pub mod select_p1 {
    /// Select by DF name
    pub const BY_NAME: u8 = 0x04;
}

/// Parameter values for SELECT command (P2)
pub mod select_p2 {
    /// First or only occurrence, return FCI
    pub const FIRST_OR_ONLY: u8 = 0x00;
}
