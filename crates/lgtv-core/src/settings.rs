//! Protocol settings shared by the codecs, the channel, and the wake sender.
//!
//! A [`Settings`] value is built once and handed to every constructor; there
//! is no process-wide default object.  All fields carry serde defaults so a
//! partial `[settings]` table in a TOML file only overrides what it names:
//!
//! ```toml
//! [settings]
//! network_port = 9761
//! network_timeout_ms = 2000
//! wol_address = "192.168.1.255"
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`Settings::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A numeric field that must be positive is zero.
    #[error("settings.{0} must be greater than 0")]
    NotPositive(&'static str),

    /// The key-derivation salt has no bytes.
    #[error("settings.encryption_key_salt must not be empty")]
    EmptySalt,

    /// Padding bytes hold the pad length, so a block cannot exceed one byte's range.
    #[error("settings.message_block_size must be at most 255, got {0}")]
    BlockSizeTooLarge(usize),

    /// A terminator is the NUL character, which cannot delimit a text command.
    #[error("settings.{0} must not be the NUL character")]
    InvalidTerminator(&'static str),
}

/// Digest used inside PBKDF2-HMAC when deriving the AES key from a keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDigest {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

/// Immutable configuration for one TV connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// TCP port of the TV's IP-control server.
    #[serde(default = "default_network_port")]
    pub network_port: u16,
    /// Connect timeout and idle timeout of the control channel, in milliseconds.
    #[serde(default = "default_network_timeout_ms")]
    pub network_timeout_ms: u64,
    /// Destination address of the wake-on-LAN datagram (usually a broadcast address).
    #[serde(default = "default_wol_address")]
    pub wol_address: IpAddr,
    /// Destination UDP port of the wake-on-LAN datagram.
    #[serde(default = "default_wol_port")]
    pub wol_port: u16,
    #[serde(default = "default_encryption_key_salt")]
    pub encryption_key_salt: Vec<u8>,
    #[serde(default = "default_encryption_key_iterations")]
    pub encryption_key_iterations: u32,
    #[serde(default)]
    pub encryption_key_digest: KeyDigest,
    /// Derived key length in bytes.  Also the length of the encrypted IV prefix on the wire.
    #[serde(default = "default_encryption_key_length")]
    pub encryption_key_length: usize,
    #[serde(default = "default_encryption_iv_length")]
    pub encryption_iv_length: usize,
    /// Commands are padded to a multiple of this many bytes before encryption.
    #[serde(default = "default_message_block_size")]
    pub message_block_size: usize,
    /// Appended to every outbound command.
    #[serde(default = "default_message_terminator")]
    pub message_terminator: char,
    /// Bounds the meaningful prefix of every reply.
    #[serde(default = "default_response_terminator")]
    pub response_terminator: char,
}

// ── Default helpers ───────────────────────────────────────────────────────────

/// Salt published for the IP-control key derivation.
pub const DEFAULT_KEY_SALT: [u8; 16] = [
    0x63, 0x61, 0xb8, 0x0e, 0x9b, 0xdc, 0xa6, 0x63, 0x8d, 0x07, 0x20, 0xf2, 0xcc, 0x56, 0x8f, 0xb9,
];

fn default_network_port() -> u16 {
    9761
}
fn default_network_timeout_ms() -> u64 {
    5000
}
fn default_wol_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::BROADCAST)
}
fn default_wol_port() -> u16 {
    9
}
fn default_encryption_key_salt() -> Vec<u8> {
    DEFAULT_KEY_SALT.to_vec()
}
fn default_encryption_key_iterations() -> u32 {
    1 << 14
}
fn default_encryption_key_length() -> usize {
    16
}
fn default_encryption_iv_length() -> usize {
    16
}
fn default_message_block_size() -> usize {
    16
}
fn default_message_terminator() -> char {
    '\r'
}
fn default_response_terminator() -> char {
    '\n'
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network_port: default_network_port(),
            network_timeout_ms: default_network_timeout_ms(),
            wol_address: default_wol_address(),
            wol_port: default_wol_port(),
            encryption_key_salt: default_encryption_key_salt(),
            encryption_key_iterations: default_encryption_key_iterations(),
            encryption_key_digest: KeyDigest::default(),
            encryption_key_length: default_encryption_key_length(),
            encryption_iv_length: default_encryption_iv_length(),
            message_block_size: default_message_block_size(),
            message_terminator: default_message_terminator(),
            response_terminator: default_response_terminator(),
        }
    }
}

impl Settings {
    /// Checks the invariants every consumer relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`SettingsError`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("network_port", self.network_port as u64),
            ("network_timeout_ms", self.network_timeout_ms),
            ("wol_port", self.wol_port as u64),
            ("encryption_key_iterations", self.encryption_key_iterations as u64),
            ("encryption_key_length", self.encryption_key_length as u64),
            ("encryption_iv_length", self.encryption_iv_length as u64),
            ("message_block_size", self.message_block_size as u64),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(SettingsError::NotPositive(field));
        }
        if self.encryption_key_salt.is_empty() {
            return Err(SettingsError::EmptySalt);
        }
        if self.message_block_size > u8::MAX as usize {
            return Err(SettingsError::BlockSizeTooLarge(self.message_block_size));
        }
        if self.message_terminator == '\0' {
            return Err(SettingsError::InvalidTerminator("message_terminator"));
        }
        if self.response_terminator == '\0' {
            return Err(SettingsError::InvalidTerminator("response_terminator"));
        }
        Ok(())
    }

    pub fn network_timeout(&self) -> Duration {
        Duration::from_millis(self.network_timeout_ms)
    }

    /// Socket address the wake-on-LAN datagram is sent to.
    pub fn wol_target(&self) -> SocketAddr {
        SocketAddr::new(self.wol_address, self.wol_port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
