//! lgtv-client library entry point.
//!
//! Drives an LG TV over its IP-control port.  The pieces, bottom-up:
//!
//! 1. [`TcpChannel`](infrastructure::network::TcpChannel) owns the single TCP
//!    connection: connect with bounded retry, one request/one reply exchanges,
//!    idle timeout and disconnect.  It also sends the wake-on-LAN datagram.
//! 2. [`Session`](application::session::Session) pairs a channel with a
//!    codec and turns a command string into a decoded reply, enforcing `OK`
//!    acknowledgements where a command expects one.
//! 3. [`LgTv`](application::control_tv::LgTv) is the remote control itself:
//!    one method per TV feature.

/// Application layer: the session and the remote-control use cases.
pub mod application;

/// Infrastructure layer: sockets and configuration files.
pub mod infrastructure;

pub use application::control_tv::LgTv;
pub use application::session::{RequestChannel, Session, SessionError};
pub use infrastructure::network::{ChannelError, ChannelState, ConnectOptions, TcpChannel};
