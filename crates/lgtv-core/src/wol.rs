//! Hardware addresses and the wake-on-LAN magic packet.
//!
//! Wire format (102 bytes):
//! ```text
//! [0xFF × 6][MAC × 16]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SYNC_BYTE: u8 = 0xFF;
const SYNC_COUNT: usize = 6;
const MAC_LEN: usize = 6;
const MAC_REPEAT: usize = 16;

/// Total length of a magic packet.
pub const MAGIC_PACKET_LEN: usize = SYNC_COUNT + MAC_LEN * MAC_REPEAT;

/// Errors produced when parsing a [`MacAddress`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacAddressError {
    #[error("invalid mac address {0:?}: expected six colon-separated hex octets")]
    Malformed(String),
}

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; MAC_LEN]);

impl MacAddress {
    pub const fn new(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    /// Parses `DA:0A:0F:E1:60:CB` (hex digits in either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MacAddressError::Malformed(s.to_string());

        let mut octets = [0u8; MAC_LEN];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(malformed)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| malformed())?;
        }
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Builds the wake-on-LAN payload for `mac`.
pub fn magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [SYNC_BYTE; MAGIC_PACKET_LEN];
    for chunk in packet[SYNC_COUNT..].chunks_exact_mut(MAC_LEN) {
        chunk.copy_from_slice(&mac.0);
    }
    packet
}

// ── Tests ─────────────────────────────────────────────────────────────────────
