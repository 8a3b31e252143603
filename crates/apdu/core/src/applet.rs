//! Applets and the AID registry
//!
//! An [`Applet`] receives the commands sent on a logical channel once it has
//! been selected there. The [`AppletRegistry`] maps AIDs to applets with
//! exact-match lookup; it has no ordering or prefix semantics.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::aid::Aid;
use crate::response::status::{StatusWord, common as status};

/// Error an applet returns instead of a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppletError {
    /// Reject the command with this status word
    #[error("Applet returned status {0}")]
    Status(StatusWord),

    /// The applet failed internally
    #[error("Applet failure: {0}")]
    Failure(String),
}

impl AppletError {
    /// Create an internal failure with a message
    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self::Failure(message.into())
    }

    /// Status word the card reports for this error
    pub const fn status_word(&self) -> StatusWord {
        match self {
            Self::Status(sw) => *sw,
            Self::Failure(_) => status::NO_PRECISE_DIAGNOSIS,
        }
    }
}

/// An applet that can be selected by AID and then receives commands
pub trait Applet: Send + fmt::Debug {
    /// Called when a SELECT for this applet's AID arrives.
    /// Returns the full select response, status word included.
    fn select(&mut self, _command: &[u8]) -> Result<Bytes, AppletError> {
        Ok(Bytes::copy_from_slice(&status::SUCCESS.to_bytes()))
    }

    /// Called when the applet stops being selected on a channel.
    fn deselect(&mut self) {}

    /// Process a command sent while selected, returning the full response.
    fn process(&mut self, command: &[u8]) -> Result<Bytes, AppletError>;
}

/// Applet backed by a closure; every command, SELECT included, goes to it
pub struct FnApplet<F> {
    handler: F,
}

impl<F> FnApplet<F>
where
    F: FnMut(&[u8]) -> Bytes + Send,
{
    /// Wrap a handler
    pub const fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> fmt::Debug for FnApplet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnApplet").finish_non_exhaustive()
    }
}

impl<F> Applet for FnApplet<F>
where
    F: FnMut(&[u8]) -> Bytes + Send,
{
    fn select(&mut self, command: &[u8]) -> Result<Bytes, AppletError> {
        Ok((self.handler)(command))
    }

    fn process(&mut self, command: &[u8]) -> Result<Bytes, AppletError> {
        Ok((self.handler)(command))
    }
}

/// Lookup table from AID to applet
#[derive(Debug, Default)]
pub struct AppletRegistry {
    applets: HashMap<Aid, Box<dyn Applet>>,
}

impl AppletRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an applet, returning the one previously registered under the same AID
    pub fn install(&mut self, aid: Aid, applet: Box<dyn Applet>) -> Option<Box<dyn Applet>> {
        self.applets.insert(aid, applet)
    }

    /// Remove the applet registered under `aid`
    pub fn uninstall(&mut self, aid: &[u8]) -> Option<Box<dyn Applet>> {
        self.applets.remove(aid)
    }

    /// Exact-match lookup
    pub fn get_mut(&mut self, aid: &[u8]) -> Option<&mut Box<dyn Applet>> {
        self.applets.get_mut(aid)
    }

    /// Whether an applet is registered under exactly this AID
    pub fn contains(&self, aid: &[u8]) -> bool {
        self.applets.contains_key(aid)
    }

    /// Registered AIDs, in no particular order
    pub fn aids(&self) -> impl Iterator<Item = &Aid> {
        self.applets.keys()
    }

    /// Number of registered applets
    pub fn len(&self) -> usize {
        self.applets.len()
    }

    /// Whether no applets are registered
    pub fn is_empty(&self) -> bool {
        self.applets.is_empty()
    }
}
