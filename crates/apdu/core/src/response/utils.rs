//! Utility functions for APDU response handling

use crate::response::error::ResponseError;
use crate::response::status::StatusWord;

/// Split raw response data into its trailing status word and the payload before it
///
/// # Errors
/// Returns an error if the data is too short to contain a valid status word.
pub fn extract_status_and_payload(data: &[u8]) -> Result<(StatusWord, &[u8]), ResponseError> {
    match data {
        [payload @ .., sw1, sw2] => Ok((StatusWord::new(*sw1, *sw2), payload)),
        _ => Err(ResponseError::Incomplete(data.len())),
    }
}

/// Append a status word to a payload, producing raw response bytes
pub fn with_status(payload: &[u8], status: StatusWord) -> Vec<u8> {
    let mut response = Vec::with_capacity(payload.len() + 2);
    response.extend_from_slice(payload);
    response.extend_from_slice(&status.to_bytes());
    response
}
