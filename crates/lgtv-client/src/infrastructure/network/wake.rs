//! Wake-on-LAN sender.
//!
//! Fire-and-forget: one UDP datagram, no delivery confirmation.  The socket
//! is bound to an ephemeral port of the target's address family and dropped
//! as soon as the send completes.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use lgtv_core::{magic_packet, MacAddress};
use tokio::net::UdpSocket;
use tracing::debug;

/// Sends the magic packet for `mac` to `target`.
///
/// # Errors
///
/// Returns the underlying I/O error if the socket cannot be bound or the
/// datagram cannot be sent.
pub async fn send_magic_packet(mac: &MacAddress, target: SocketAddr) -> std::io::Result<()> {
    let bind_addr: SocketAddr = match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(bind_addr).await?;
    socket.set_broadcast(true)?;

    let packet = magic_packet(mac);
    let sent = socket.send_to(&packet, target).await?;
    debug!(%mac, %target, bytes = sent, "wake-on-LAN packet sent");
    Ok(())
}
