//! Unencrypted codec for TVs with IP-control encryption switched off.

use super::{CodecError, Framing, MessageCodec};
use crate::settings::Settings;

/// Sends `<command><terminator>` as UTF-8, with no padding.
#[derive(Debug, Clone)]
pub struct PlainCodec {
    framing: Framing,
}

impl PlainCodec {
    pub fn new(settings: &Settings) -> Self {
        Self {
            framing: Framing::new(settings),
        }
    }
}

impl MessageCodec for PlainCodec {
    fn encode(&self, command: &str) -> Result<Vec<u8>, CodecError> {
        Ok(self.framing.terminate(command)?.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(self.framing.strip(bytes))
    }
}
