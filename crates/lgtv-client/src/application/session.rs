//! Session: a channel plus a codec, one request at a time.
//!
//! The protocol has no request identifiers, so a reply can only be matched to
//! the request that preceded it.  [`Session::call`] takes `&mut self`, which
//! makes a second in-flight call on the same session a compile error.  Tasks
//! that share a session wrap it in a `tokio::sync::Mutex`.

use async_trait::async_trait;
use lgtv_core::{CodecError, MessageCodec, ParseError};
use thiserror::Error;
use tracing::debug;

use crate::infrastructure::network::{ChannelError, ConnectOptions, TcpChannel};

/// The literal acknowledgement returned by set-style commands.
pub const ACK: &str = "OK";

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session could not be built from the given configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The TV answered something other than `OK` to a set-style command.
    #[error("TV rejected {command}: replied {reply:?}")]
    Protocol { command: String, reply: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SessionError {
    /// `true` if the underlying cause is a channel timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionError::Channel(e) if e.is_timeout())
    }
}

/// The transport a [`Session`] drives.
///
/// [`TcpChannel`] is the production implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestChannel: Send + Sync {
    async fn connect(&mut self, options: ConnectOptions) -> Result<(), ChannelError>;

    async fn disconnect(&mut self) -> Result<(), ChannelError>;

    /// Writes one request and returns the bytes of one reply.
    async fn send_receive(&mut self, request: &[u8]) -> Result<Vec<u8>, ChannelError>;

    fn is_connected(&mut self) -> bool;

    async fn wake_on_lan(&self) -> Result<(), ChannelError>;
}

#[async_trait]
impl RequestChannel for TcpChannel {
    async fn connect(&mut self, options: ConnectOptions) -> Result<(), ChannelError> {
        TcpChannel::connect(self, options).await
    }

    async fn disconnect(&mut self) -> Result<(), ChannelError> {
        TcpChannel::disconnect(self).await
    }

    async fn send_receive(&mut self, request: &[u8]) -> Result<Vec<u8>, ChannelError> {
        TcpChannel::send_receive(self, request).await
    }

    fn is_connected(&mut self) -> bool {
        TcpChannel::is_connected(self)
    }

    async fn wake_on_lan(&self) -> Result<(), ChannelError> {
        TcpChannel::wake_on_lan(self).await
    }
}

/// Request/response session over a single channel.
pub struct Session<C> {
    channel: C,
    codec: Box<dyn MessageCodec>,
}

impl<C: RequestChannel> Session<C> {
    pub fn new(channel: C, codec: Box<dyn MessageCodec>) -> Self {
        Self { channel, codec }
    }

    /// Encodes `command`, exchanges it, and returns the decoded reply.
    ///
    /// # Errors
    ///
    /// Codec and channel errors are returned unchanged.
    pub async fn call(&mut self, command: &str) -> Result<String, SessionError> {
        let request = self.codec.encode(command)?;
        debug!(command = verb(command), bytes = request.len(), "sending request");
        let response = self.channel.send_receive(&request).await?;
        let reply = self.codec.decode(&response)?;
        debug!(command = verb(command), bytes = response.len(), "received reply");
        Ok(reply)
    }

    /// Like [`Session::call`] for commands acknowledged with `OK`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Protocol`] carrying the raw reply if it is not `OK`.
    pub async fn call_ok(&mut self, command: &str) -> Result<(), SessionError> {
        let reply = self.call(command).await?;
        if reply == ACK {
            Ok(())
        } else {
            Err(SessionError::Protocol {
                command: verb(command).to_string(),
                reply,
            })
        }
    }

    pub async fn connect(&mut self, options: ConnectOptions) -> Result<(), SessionError> {
        Ok(self.channel.connect(options).await?)
    }

    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        Ok(self.channel.disconnect().await?)
    }

    pub fn is_connected(&mut self) -> bool {
        self.channel.is_connected()
    }

    pub async fn wake_on_lan(&self) -> Result<(), SessionError> {
        Ok(self.channel.wake_on_lan().await?)
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

/// The command keyword, without arguments.
fn verb(command: &str) -> &str {
    command.split(' ').next().unwrap_or(command)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lgtv_core::{PlainCodec, Settings};
    use mockall::predicate::eq;

    /// A device-side codec: reads `\r`-terminated requests, writes `\n` replies.
    fn device_codec() -> PlainCodec {
        PlainCodec::new(&Settings {
            message_terminator: '\n',
            response_terminator: '\r',
            ..Settings::default()
        })
    }

    fn session_replying(request: &'static str, reply: &'static str) -> Session<MockRequestChannel> {
        let mut channel = MockRequestChannel::new();
        channel
            .expect_send_receive()
            .withf(move |bytes| device_codec().decode(bytes).unwrap() == request)
            .times(1)
            .returning(move |_| Ok(device_codec().encode(reply).unwrap()));
        Session::new(channel, Box::new(PlainCodec::new(&Settings::default())))
    }

    #[tokio::test]
    async fn test_call_returns_decoded_reply() {
        // Arrange
        let mut session = session_replying("CURRENT_VOL", "VOL:12");

        // Act
        let reply = session.call("CURRENT_VOL").await.unwrap();

        // Assert
        assert_eq!(reply, "VOL:12");
    }

    #[tokio::test]
    async fn test_call_ok_accepts_ok() {
        let mut session = session_replying("POWER off", "OK");
        tokio_test::assert_ok!(session.call_ok("POWER off").await);
    }

    #[tokio::test]
    async fn test_call_ok_rejects_other_reply_with_raw_text() {
        // Arrange
        let mut session = session_replying("INPUT_SELECT hdmi9", "NG");

        // Act
        let err = session.call_ok("INPUT_SELECT hdmi9").await.unwrap_err();

        // Assert
        match err {
            SessionError::Protocol { command, reply } => {
                assert_eq!(command, "INPUT_SELECT");
                assert_eq!(reply, "NG");
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_command_never_reaches_channel() {
        // Arrange: no expectations, so any channel call would panic
        let channel = MockRequestChannel::new();
        let mut session = Session::new(channel, Box::new(PlainCodec::new(&Settings::default())));

        // Act
        let result = session.call("").await;

        // Assert
        assert!(matches!(
            result,
            Err(SessionError::Codec(CodecError::InvalidCommand(_)))
        ));
    }

    #[tokio::test]
    async fn test_channel_error_propagates_unchanged() {
        // Arrange
        let mut channel = MockRequestChannel::new();
        channel
            .expect_send_receive()
            .returning(|_| Err(ChannelError::Timeout(std::time::Duration::from_millis(5))));
        let mut session = Session::new(channel, Box::new(PlainCodec::new(&Settings::default())));

        // Act
        let err = session.call("CURRENT_APP").await.unwrap_err();

        // Assert
        assert!(err.is_timeout());
        assert!(matches!(err, SessionError::Channel(ChannelError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_connect_forwards_options() {
        // Arrange
        let options = ConnectOptions::after_wake();
        let mut channel = MockRequestChannel::new();
        channel
            .expect_connect()
            .with(eq(options))
            .times(1)
            .returning(|_| Ok(()));
        let mut session = Session::new(channel, Box::new(PlainCodec::new(&Settings::default())));

        // Act / Assert
        tokio_test::assert_ok!(session.connect(options).await);
    }

    #[test]
    fn test_verb_drops_arguments() {
        assert_eq!(verb("KEY_ACTION volumeup"), "KEY_ACTION");
        assert_eq!(verb("CURRENT_APP"), "CURRENT_APP");
    }
}
