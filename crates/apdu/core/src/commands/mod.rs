//! Command encoders for logical channel management
//!
//! Pure constructors for the three command-APDUs a terminal needs to manage
//! logical channels. Every channel-addressed command derives its class byte
//! from [`LogicalChannel::class_byte`](crate::LogicalChannel::class_byte).

pub mod manage_channel;
pub mod select;

pub use manage_channel::{manage_channel_close, manage_channel_open};
pub use select::select;
