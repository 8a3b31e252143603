//! Core error type for APDU operations
//!
//! Command construction, AID validation and channel number validation all
//! report through this one enum. Card level failures have their own
//! [`CardError`](crate::CardError) since they come from the processor, not from
//! the bytes.

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid command length
    #[error("Invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Invalid command data
    #[error("Invalid command data: {0}")]
    InvalidCommandData(&'static str),

    /// Command data does not fit the one byte Lc field
    #[error("Command data too long: {0} bytes, at most 255 fit a short APDU")]
    DataTooLong(usize),

    /// Channel number outside of the addressable range
    #[error("Invalid logical channel number: {0}")]
    InvalidChannel(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidChannel(20).to_string(),
            "Invalid logical channel number: 20"
        );
        assert_eq!(
            Error::DataTooLong(256).to_string(),
            "Command data too long: 256 bytes, at most 255 fit a short APDU"
        );
    }
}
