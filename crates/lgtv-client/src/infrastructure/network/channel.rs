//! TCP control channel to the TV.
//!
//! The channel is an explicit state machine over [`ChannelState`].  The
//! stored state is never trusted on its own: every read re-derives it from
//! the socket (a single non-blocking peek detects EOF and socket errors) and
//! from the idle deadline, which every successful exchange pushes forward by
//! the network timeout.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures_util::FutureExt;
use lgtv_core::{MacAddress, Settings};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{self, timeout, Instant};
use tracing::{debug, info, warn};

use super::{wake, ChannelError, ChannelState, ConnectOptions};

/// Replies are short text lines; one read of this size holds any of them.
const READ_BUFFER_SIZE: usize = 4096;

/// A single TCP connection to the TV's IP-control port.
#[derive(Debug)]
pub struct TcpChannel {
    addr: SocketAddr,
    mac: Option<MacAddress>,
    settings: Settings,
    stream: Option<TcpStream>,
    state: ChannelState,
    idle_deadline: Option<Instant>,
}

impl TcpChannel {
    /// Creates a disconnected channel to `host` on the configured port.
    ///
    /// `mac` is only needed for [`TcpChannel::wake_on_lan`].
    pub fn new(host: IpAddr, mac: Option<MacAddress>, settings: Settings) -> Self {
        Self {
            addr: SocketAddr::new(host, settings.network_port),
            mac,
            settings,
            stream: None,
            state: ChannelState::Disconnected,
            idle_deadline: None,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Current state, re-derived from the socket and the idle deadline.
    pub fn state(&mut self) -> ChannelState {
        self.refresh();
        self.state
    }

    pub fn is_connected(&mut self) -> bool {
        self.state() == ChannelState::Connected
    }

    /// Opens the connection.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::InvalidState`] unless the channel is disconnected.
    /// - [`ChannelError::Connect`] / [`ChannelError::Timeout`] for a failed
    ///   single attempt (`max_retries == 0`).
    /// - [`ChannelError::MaxRetries`] once every retry has failed.
    pub async fn connect(&mut self, options: ConnectOptions) -> Result<(), ChannelError> {
        let current = self.state();
        if current != ChannelState::Disconnected {
            return Err(ChannelError::InvalidState {
                expected: ChannelState::Disconnected,
                actual: current,
            });
        }

        self.state = ChannelState::Connecting;
        let result = if options.max_retries == 0 {
            self.attempt(self.settings.network_timeout()).await
        } else {
            self.attempt_with_retries(options).await
        };

        match result {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = ChannelState::Connected;
                self.touch();
                info!(peer = %self.addr, "connected");
                Ok(())
            }
            Err(e) => {
                self.teardown();
                Err(e)
            }
        }
    }

    /// Writes `request` and returns the payload of the next inbound read.
    ///
    /// Any failure tears the connection down.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::InvalidState`] unless connected.
    /// - [`ChannelError::Timeout`] if the TV stays silent for the network timeout.
    /// - [`ChannelError::Closed`] if the TV closes the connection instead of replying.
    /// - [`ChannelError::Io`] for socket errors.
    pub async fn send_receive(&mut self, request: &[u8]) -> Result<Vec<u8>, ChannelError> {
        let current = self.state();
        let stream = match (current, self.stream.as_mut()) {
            (ChannelState::Connected, Some(stream)) => stream,
            _ => {
                return Err(ChannelError::InvalidState {
                    expected: ChannelState::Connected,
                    actual: current,
                })
            }
        };

        let limit = self.settings.network_timeout();
        match exchange(stream, request, limit).await {
            Ok(reply) => {
                self.touch();
                Ok(reply)
            }
            Err(e) => {
                warn!(peer = %self.addr, error = %e, "exchange failed; dropping connection");
                self.teardown();
                Err(e)
            }
        }
    }

    /// Closes the connection gracefully.  A no-op when already disconnected.
    pub async fn disconnect(&mut self) -> Result<(), ChannelError> {
        let stream = self.stream.take();
        self.teardown();
        let Some(mut stream) = stream else {
            return Ok(());
        };

        let limit = self.settings.network_timeout();
        match timeout(limit, stream.shutdown()).await {
            Ok(Ok(())) => {}
            // The peer may already be gone; the socket is closed on drop regardless.
            Ok(Err(e)) => debug!(peer = %self.addr, error = %e, "shutdown failed"),
            Err(_) => debug!(peer = %self.addr, "shutdown timed out"),
        }
        info!(peer = %self.addr, "disconnected");
        Ok(())
    }

    /// Broadcasts the wake-on-LAN packet for the configured MAC address.
    ///
    /// Independent of the TCP connection state.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Config`] if no MAC address was given at construction,
    /// [`ChannelError::Io`] if the datagram cannot be sent.
    pub async fn wake_on_lan(&self) -> Result<(), ChannelError> {
        let mac = self.mac.as_ref().ok_or_else(|| {
            ChannelError::Config("a MAC address is required for wake-on-LAN".to_string())
        })?;
        wake::send_magic_packet(mac, self.settings.wol_target()).await?;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    async fn attempt(&self, limit: Duration) -> Result<TcpStream, ChannelError> {
        match timeout(limit, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(ChannelError::Connect {
                addr: self.addr,
                source,
            }),
            Err(_) => Err(ChannelError::Timeout(limit)),
        }
    }

    async fn attempt_with_retries(
        &self,
        options: ConnectOptions,
    ) -> Result<TcpStream, ChannelError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(options.retry_timeout).await {
                Ok(stream) => return Ok(stream),
                Err(e) if attempts >= options.max_retries => {
                    return Err(ChannelError::MaxRetries {
                        attempts,
                        source: Box::new(e),
                    })
                }
                Err(e) => {
                    debug!(
                        peer = %self.addr,
                        attempt = attempts,
                        max_retries = options.max_retries,
                        error = %e,
                        "connect attempt failed"
                    );
                    // A timed-out attempt has already waited; a refused one has not.
                    if !e.is_timeout() {
                        time::sleep(options.retry_timeout).await;
                    }
                }
            }
        }
    }

    fn refresh(&mut self) {
        match self.state {
            ChannelState::Disconnected => {}
            // `connect` holds `&mut self` until it settles, so this state is
            // only visible here if its future was dropped part-way.
            ChannelState::Connecting => self.teardown(),
            ChannelState::Connected => {
                if self.idle_deadline.is_some_and(|d| Instant::now() >= d) {
                    debug!(peer = %self.addr, "idle timeout; dropping connection");
                    self.teardown();
                } else if !self.socket_alive() {
                    debug!(peer = %self.addr, "connection lost");
                    self.teardown();
                }
            }
        }
    }

    fn socket_alive(&self) -> bool {
        let Some(stream) = self.stream.as_ref() else {
            return false;
        };
        if !matches!(stream.take_error(), Ok(None)) {
            return false;
        }
        let mut probe = [0u8; 1];
        match stream.peek(&mut probe).now_or_never() {
            // Nothing to read: the connection is idle.
            None => true,
            Some(Ok(0)) => false,
            Some(Ok(_)) => true,
            Some(Err(_)) => false,
        }
    }

    fn touch(&mut self) {
        self.idle_deadline = Some(Instant::now() + self.settings.network_timeout());
    }

    fn teardown(&mut self) {
        self.stream = None;
        self.state = ChannelState::Disconnected;
        self.idle_deadline = None;
    }
}

async fn exchange(
    stream: &mut TcpStream,
    request: &[u8],
    limit: Duration,
) -> Result<Vec<u8>, ChannelError> {
    timeout(limit, stream.write_all(request))
        .await
        .map_err(|_| ChannelError::Timeout(limit))??;

    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let n = timeout(limit, stream.read(&mut buf))
        .await
        .map_err(|_| ChannelError::Timeout(limit))??;
    if n == 0 {
        return Err(ChannelError::Closed);
    }
    buf.truncate(n);
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
