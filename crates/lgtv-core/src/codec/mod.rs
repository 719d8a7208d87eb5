//! Message codecs: command string ⇄ wire bytes.
//!
//! Two interchangeable implementations of [`MessageCodec`]:
//!
//! - [`PlainCodec`] – the command plus a terminator, sent verbatim.
//! - [`EncryptedCodec`] – the terminated command padded to the block size and
//!   encrypted with AES-128 using a key derived from the TV's keycode.
//!
//! Both share the terminate/strip rules in [`Framing`].

pub mod encrypted;
pub mod plain;

pub use encrypted::{EncryptedCodec, IvSource, RandomIv};
pub use plain::PlainCodec;

use thiserror::Error;

use crate::settings::Settings;

/// Errors raised while encoding or decoding a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The command is empty or contains the message terminator.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The keycode does not match the required 8-character `[A-Z0-9]` shape.
    #[error("keycode format is invalid")]
    InvalidKeycode,

    /// The settings cannot drive this codec (e.g. a non-AES key length).
    #[error("invalid codec settings: {0}")]
    InvalidSettings(String),

    /// The reply could not be decrypted.
    #[error("failed to decode reply: {0}")]
    Decode(String),
}

/// Translates a command string to wire bytes and a reply back to text.
pub trait MessageCodec: Send + Sync {
    /// Encodes `command` into the bytes written to the socket.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidCommand`] for an empty command or one that
    /// contains the message terminator.
    fn encode(&self, command: &str) -> Result<Vec<u8>, CodecError>;

    /// Decodes reply bytes into the text before the response terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if the bytes cannot be decrypted.
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError>;
}

/// Terminator handling shared by both codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    message_terminator: char,
    response_terminator: char,
}

impl Framing {
    pub fn new(settings: &Settings) -> Self {
        Self {
            message_terminator: settings.message_terminator,
            response_terminator: settings.response_terminator,
        }
    }

    /// Validates `command` and returns it with the message terminator appended.
    pub fn terminate(&self, command: &str) -> Result<String, CodecError> {
        if command.is_empty() {
            return Err(CodecError::InvalidCommand(
                "command must not be empty".to_string(),
            ));
        }
        if command.contains(self.message_terminator) {
            return Err(CodecError::InvalidCommand(format!(
                "command must not contain the message terminator {:?}",
                self.message_terminator
            )));
        }
        let mut terminated = String::with_capacity(command.len() + self.message_terminator.len_utf8());
        terminated.push_str(command);
        terminated.push(self.message_terminator);
        Ok(terminated)
    }

    /// Returns the text before the first response terminator, or all of it if
    /// there is none.
    pub fn strip(&self, bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        match text.split_once(self.response_terminator) {
            Some((head, _)) => head.to_string(),
            None => text.into_owned(),
        }
    }
}
