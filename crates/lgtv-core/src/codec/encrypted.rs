//! AES-128 codec for TVs with IP-control encryption enabled.
//!
//! Wire format:
//! ```text
//! [ECB(iv):16][CBC(iv, padded_message):N]
//! ```
//!
//! The message is the terminated command padded to a multiple of the block
//! size: a block-aligned message first gets one extra space, then `r` bytes of
//! value `r` fill the short-fall.  The AES key is PBKDF2-HMAC over the keycode,
//! derived once at construction.
//!
//! Decoding does not validate the padding.  The response terminator always
//! precedes the pad bytes, so stripping at the terminator discards them.

use std::fmt;

use aes::cipher::consts::U16;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;

use super::{CodecError, Framing, MessageCodec};
use crate::keycode::Keycode;
use crate::settings::{KeyDigest, Settings};

const AES_BLOCK_SIZE: usize = 16;
const AES_128_KEY_SIZE: usize = 16;

type AesBlock = GenericArray<u8, U16>;

/// Supplies the initialisation vector for each encoded message.
pub trait IvSource: Send + Sync {
    fn fill_iv(&self, iv: &mut [u8]);
}

/// Draws every IV byte uniformly from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIv;

impl IvSource for RandomIv {
    fn fill_iv(&self, iv: &mut [u8]) {
        rand::thread_rng().fill_bytes(iv);
    }
}

/// Encrypting codec keyed by a TV keycode.
pub struct EncryptedCodec {
    framing: Framing,
    cipher: Aes128,
    key_length: usize,
    block_size: usize,
    iv_source: Box<dyn IvSource>,
}

impl EncryptedCodec {
    /// Derives the AES key from `keycode` and builds a codec with random IVs.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSettings`] if the settings do not describe
    /// AES-128 (16-byte key and IV, block size a multiple of 16).
    pub fn new(keycode: &Keycode, settings: &Settings) -> Result<Self, CodecError> {
        Self::with_iv_source(keycode, settings, Box::new(RandomIv))
    }

    /// Like [`EncryptedCodec::new`] but with a caller-supplied IV source.
    pub fn with_iv_source(
        keycode: &Keycode,
        settings: &Settings,
        iv_source: Box<dyn IvSource>,
    ) -> Result<Self, CodecError> {
        check_aes_settings(settings)?;

        let mut key = [0u8; AES_128_KEY_SIZE];
        derive_key(keycode, settings, &mut key);
        let cipher = Aes128::new_from_slice(&key)
            .map_err(|e| CodecError::InvalidSettings(format!("invalid AES key: {e}")))?;
        key.fill(0);
        debug!(
            digest = ?settings.encryption_key_digest,
            iterations = settings.encryption_key_iterations,
            "derived encryption key"
        );

        Ok(Self {
            framing: Framing::new(settings),
            cipher,
            key_length: settings.encryption_key_length,
            block_size: settings.message_block_size,
            iv_source,
        })
    }

    /// Pads a terminated message in place.
    fn pad(&self, message: &mut Vec<u8>) {
        if message.len() % self.block_size == 0 {
            message.push(b' ');
        }
        let remainder = message.len() % self.block_size;
        if remainder != 0 {
            let padding = self.block_size - remainder;
            message.resize(message.len() + padding, padding as u8);
        }
    }
}

impl MessageCodec for EncryptedCodec {
    fn encode(&self, command: &str) -> Result<Vec<u8>, CodecError> {
        let mut message = self.framing.terminate(command)?.into_bytes();
        self.pad(&mut message);

        let mut iv = [0u8; AES_BLOCK_SIZE];
        self.iv_source.fill_iv(&mut iv);

        let mut wire = Vec::with_capacity(AES_BLOCK_SIZE + message.len());

        let mut iv_block = AesBlock::clone_from_slice(&iv);
        self.cipher.encrypt_block(&mut iv_block);
        wire.extend_from_slice(&iv_block);

        let mut chain = AesBlock::clone_from_slice(&iv);
        for chunk in message.chunks_exact(AES_BLOCK_SIZE) {
            let mut block = AesBlock::clone_from_slice(chunk);
            xor_in_place(&mut block, &chain);
            self.cipher.encrypt_block(&mut block);
            wire.extend_from_slice(&block);
            chain = block;
        }
        Ok(wire)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        if bytes.len() < self.key_length + AES_BLOCK_SIZE {
            return Err(CodecError::Decode(format!(
                "reply of {} bytes is too short for an encrypted message",
                bytes.len()
            )));
        }
        let (iv_part, body) = bytes.split_at(self.key_length);
        if body.len() % AES_BLOCK_SIZE != 0 {
            return Err(CodecError::Decode(format!(
                "encrypted body of {} bytes is not a multiple of {AES_BLOCK_SIZE}",
                body.len()
            )));
        }

        let mut chain = AesBlock::clone_from_slice(iv_part);
        self.cipher.decrypt_block(&mut chain);

        let mut plain = Vec::with_capacity(body.len());
        for chunk in body.chunks_exact(AES_BLOCK_SIZE) {
            let cipher_block = AesBlock::clone_from_slice(chunk);
            let mut block = cipher_block;
            self.cipher.decrypt_block(&mut block);
            xor_in_place(&mut block, &chain);
            plain.extend_from_slice(&block);
            chain = cipher_block;
        }
        Ok(self.framing.strip(&plain))
    }
}

impl fmt::Debug for EncryptedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedCodec")
            .field("framing", &self.framing)
            .field("block_size", &self.block_size)
            .finish_non_exhaustive()
    }
}

fn check_aes_settings(settings: &Settings) -> Result<(), CodecError> {
    settings
        .validate()
        .map_err(|e| CodecError::InvalidSettings(e.to_string()))?;
    if settings.encryption_key_length != AES_128_KEY_SIZE {
        return Err(CodecError::InvalidSettings(format!(
            "encryption_key_length must be {AES_128_KEY_SIZE} for AES-128, got {}",
            settings.encryption_key_length
        )));
    }
    if settings.encryption_iv_length != AES_BLOCK_SIZE {
        return Err(CodecError::InvalidSettings(format!(
            "encryption_iv_length must be {AES_BLOCK_SIZE}, got {}",
            settings.encryption_iv_length
        )));
    }
    if settings.message_block_size % AES_BLOCK_SIZE != 0 {
        return Err(CodecError::InvalidSettings(format!(
            "message_block_size must be a multiple of {AES_BLOCK_SIZE}, got {}",
            settings.message_block_size
        )));
    }
    Ok(())
}

fn derive_key(keycode: &Keycode, settings: &Settings, key: &mut [u8]) {
    let password = keycode.as_bytes();
    let salt = settings.encryption_key_salt.as_slice();
    let rounds = settings.encryption_key_iterations;
    match settings.encryption_key_digest {
        KeyDigest::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, key),
        KeyDigest::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, rounds, key),
        KeyDigest::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, rounds, key),
    }
}

fn xor_in_place(block: &mut AesBlock, other: &AesBlock) {
    for (b, o) in block.iter_mut().zip(other.iter()) {
        *b ^= o;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Published example: keycode `12345678`, command `VOLUME_MUTE on`, zero IV.
    const VECTOR_KEYCODE: &str = "12345678";
    const VECTOR_COMMAND: &str = "VOLUME_MUTE on";
    const VECTOR_ENCRYPTED_IV: &str = "d2b21ca0ad6486cb2056a8b815033508";
    const VECTOR_ENCRYPTED_DATA: &str = "dfe77a7de05603a59ed5316ec552fac1";

    struct ZeroIv;

    impl IvSource for ZeroIv {
        fn fill_iv(&self, iv: &mut [u8]) {
            iv.fill(0);
        }
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn unhex(text: &str) -> Vec<u8> {
        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&text[i..i + 2], 16).unwrap())
            .collect()
    }

    fn codec_with(settings: &Settings) -> EncryptedCodec {
        let keycode = Keycode::new(VECTOR_KEYCODE).unwrap();
        EncryptedCodec::with_iv_source(&keycode, settings, Box::new(ZeroIv)).unwrap()
    }

    #[test]
    fn test_encode_matches_published_vector() {
        // Arrange
        let codec = codec_with(&Settings::default());

        // Act
        let wire = codec.encode(VECTOR_COMMAND).unwrap();

        // Assert
        assert_eq!(hex(&wire), format!("{VECTOR_ENCRYPTED_IV}{VECTOR_ENCRYPTED_DATA}"));
    }

    #[test]
    fn test_decode_matches_published_vector() {
        // Arrange
        let settings = Settings {
            response_terminator: '\r',
            ..Settings::default()
        };
        let codec = codec_with(&settings);
        let wire = unhex(&format!("{VECTOR_ENCRYPTED_IV}{VECTOR_ENCRYPTED_DATA}"));

        // Act
        let text = codec.decode(&wire).unwrap();

        // Assert
        assert_eq!(text, VECTOR_COMMAND);
    }

    #[test]
    fn test_round_trip_with_random_iv() {
        // Arrange
        let settings = Settings {
            response_terminator: '\r',
            ..Settings::default()
        };
        let keycode = Keycode::new("M9N0AZ62").unwrap();
        let codec = EncryptedCodec::new(&keycode, &settings).unwrap();

        for command in ["OK", "CURRENT_APP", "APP_LAUNCH youtube.leanback.v4", "fifteen chars!!"] {
            // Act
            let wire = codec.encode(command).unwrap();

            // Assert
            assert_eq!(codec.decode(&wire).unwrap(), command);
        }
    }

    #[test]
    fn test_pad_adds_numeric_padding_to_short_message() {
        // Arrange
        let codec = codec_with(&Settings::default());
        let mut message = b"POWER off\r".to_vec();

        // Act
        codec.pad(&mut message);

        // Assert
        assert_eq!(message.len(), 16);
        assert_eq!(&message[10..], &[6u8; 6]);
    }

    #[test]
    fn test_pad_grows_aligned_message_by_a_full_block() {
        // Arrange: 15 chars + terminator = exactly one block
        let codec = codec_with(&Settings::default());
        let mut message = b"KEY_ACTION exit\r".to_vec();
        assert_eq!(message.len(), 16);

        // Act
        codec.pad(&mut message);

        // Assert: one space, then fifteen bytes of 15
        assert_eq!(message.len(), 32);
        assert_eq!(message[16], b' ');
        assert_eq!(&message[17..], &[15u8; 15]);
    }

    #[test]
    fn test_encoded_length_is_iv_plus_padded_blocks() {
        let codec = codec_with(&Settings::default());
        assert_eq!(codec.encode("KEY_ACTION exit").unwrap().len(), 16 + 32);
        assert_eq!(codec.encode("POWER off").unwrap().len(), 16 + 16);
    }

    #[test]
    fn test_encode_rejects_empty_command() {
        let codec = codec_with(&Settings::default());
        assert!(matches!(codec.encode(""), Err(CodecError::InvalidCommand(_))));
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let codec = codec_with(&Settings::default());
        assert!(matches!(
            codec.decode(&[0u8; 20]),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unaligned_body() {
        let codec = codec_with(&Settings::default());
        assert!(matches!(
            codec.decode(&[0u8; 16 + 17]),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_different_keycodes_do_not_interoperate() {
        // Arrange
        let settings = Settings {
            response_terminator: '\r',
            ..Settings::default()
        };
        let sender = codec_with(&settings);
        let other = Keycode::new("ABCDEFGH").unwrap();
        let receiver = EncryptedCodec::new(&other, &settings).unwrap();

        // Act
        let wire = sender.encode(VECTOR_COMMAND).unwrap();

        // Assert
        assert_ne!(receiver.decode(&wire).unwrap(), VECTOR_COMMAND);
    }

    #[test]
    fn test_non_aes_key_length_is_rejected() {
        let settings = Settings {
            encryption_key_length: 32,
            ..Settings::default()
        };
        let keycode = Keycode::new(VECTOR_KEYCODE).unwrap();
        assert!(matches!(
            EncryptedCodec::new(&keycode, &settings),
            Err(CodecError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_block_size_must_be_aes_aligned() {
        let settings = Settings {
            message_block_size: 8,
            ..Settings::default()
        };
        let keycode = Keycode::new(VECTOR_KEYCODE).unwrap();
        assert!(matches!(
            EncryptedCodec::new(&keycode, &settings),
            Err(CodecError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_sha512_digest_derives_a_different_key() {
        // Arrange
        let sha512 = Settings {
            encryption_key_digest: KeyDigest::Sha512,
            ..Settings::default()
        };

        // Act
        let default_wire = codec_with(&Settings::default()).encode(VECTOR_COMMAND).unwrap();
        let sha512_wire = codec_with(&sha512).encode(VECTOR_COMMAND).unwrap();

        // Assert
        assert_ne!(default_wire, sha512_wire);
    }
}
