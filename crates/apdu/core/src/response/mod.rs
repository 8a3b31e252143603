//! APDU response definitions and traits
//!
//! A response-APDU is an optional payload followed by the two status bytes
//! SW1 SW2. Only `90 00` denotes success.

pub mod error;
pub mod status;
pub mod utils;

use bytes::Bytes;
use tracing::trace;

use error::ResponseError;
use status::StatusWord;

/// Trait for APDU responses
pub trait ApduResponse {
    /// Get the response payload data
    fn payload(&self) -> Option<&Bytes>;

    /// Get the status word
    fn status(&self) -> StatusWord;

    /// Check if the response indicates success
    fn is_success(&self) -> bool {
        self.status().is_success()
    }
}

/// Basic APDU response structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    payload: Option<Bytes>,
    status: StatusWord,
}

impl Response {
    /// Parse response from raw bytes (including status word)
    pub fn from_bytes(data: &Bytes) -> Result<Self, ResponseError> {
        let (status, payload) = utils::extract_status_and_payload(data)?;
        let payload = (!payload.is_empty()).then(|| data.slice(..payload.len()));

        trace!(
            %status,
            payload_len = payload.as_ref().map_or(0, |p| p.len()),
            "Parsed APDU response"
        );

        Ok(Self { payload, status })
    }
}

impl ApduResponse for Response {
    fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    fn status(&self) -> StatusWord {
        self.status
    }
}

impl TryFrom<&[u8]> for Response {
    type Error = ResponseError;

    fn try_from(data: &[u8]) -> Result<Self, ResponseError> {
        Self::from_bytes(&Bytes::copy_from_slice(data))
    }
}
