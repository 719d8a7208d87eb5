//! Network infrastructure: the TCP control channel and wake-on-LAN.
//!
//! Architecture:
//! - [`TcpChannel`] owns at most one `TcpStream` at a time.  A stream is
//!   created fresh for every connect attempt and dropped on any hard error;
//!   it is never reused after a failure.
//! - Every socket operation races against `tokio::time::timeout`, so a
//!   silent peer surfaces as [`ChannelError::Timeout`] instead of a hang.
//! - [`send_magic_packet`] is stateless and independent of the TCP channel.

pub mod channel;
pub mod wake;

pub use channel::TcpChannel;
pub use wake::send_magic_packet;

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the control channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The operation is not valid in the channel's current state.
    #[error("channel is {actual}, expected {expected}")]
    InvalidState {
        expected: ChannelState,
        actual: ChannelState,
    },

    /// The TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The peer did not respond within the allotted time.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Every connect attempt failed; `source` is the last failure.
    #[error("gave up connecting after {attempts} attempts")]
    MaxRetries {
        attempts: u32,
        #[source]
        source: Box<ChannelError>,
    },

    /// An I/O error on an established connection.
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TV closed the connection.
    #[error("connection closed by the TV")]
    Closed,

    /// The channel lacks configuration the operation needs.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ChannelError {
    /// `true` for a timeout, including one that ended a retry loop.
    pub fn is_timeout(&self) -> bool {
        match self {
            ChannelError::Timeout(_) => true,
            ChannelError::MaxRetries { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Lifecycle of the control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChannelState::Disconnected => "disconnected",
            ChannelState::Connecting => "connecting",
            ChannelState::Connected => "connected",
        };
        f.write_str(text)
    }
}

/// How [`TcpChannel::connect`] handles failures.
///
/// With `max_retries == 0` a single attempt is made, bounded by the network
/// timeout.  Otherwise up to `max_retries` attempts are made, each bounded by
/// `retry_timeout`; a refused attempt waits `retry_timeout` before the next,
/// a timed-out one retries at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    pub max_retries: u32,
    pub retry_timeout: Duration,
}

/// Retry budget used when connecting right after a wake-on-LAN.
pub const WAKE_MAX_RETRIES: u32 = 10;

impl ConnectOptions {
    /// Options suited to a TV that is still booting after a wake packet.
    pub fn after_wake() -> Self {
        Self {
            max_retries: WAKE_MAX_RETRIES,
            ..Self::default()
        }
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_timeout: Duration::from_millis(750),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
