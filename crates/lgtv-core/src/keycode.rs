//! The pairing keycode shown on the TV's IP-control settings screen.

use std::fmt;
use std::str::FromStr;

use crate::codec::CodecError;

/// Number of characters in a keycode.
pub const KEYCODE_LEN: usize = 8;

/// A validated keycode: exactly eight characters from `A-Z` and `0-9`.
///
/// The value is key material, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Keycode(String);

impl Keycode {
    /// Validates `code` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeycode`] if the length or alphabet is wrong.
    pub fn new(code: &str) -> Result<Self, CodecError> {
        let well_formed = code.len() == KEYCODE_LEN
            && code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if well_formed {
            Ok(Self(code.to_string()))
        } else {
            Err(CodecError::InvalidKeycode)
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for Keycode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Keycode(********)")
    }
}
