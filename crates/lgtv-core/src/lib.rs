//! # lgtv-core
//!
//! Runtime-free building blocks of the LG TV IP-control protocol: settings,
//! the message codecs, the command vocabulary and reply parsers, and the
//! wake-on-LAN packet.
//!
//! This crate never touches a socket.  `lgtv-client` layers the TCP channel and
//! the request/response session on top of it.
//!
//! - **`codec`** – [`PlainCodec`] and the AES-128 [`EncryptedCodec`], both
//!   implementing [`MessageCodec`].
//! - **`settings`** – [`Settings`], one explicit value handed to every
//!   constructor.
//! - **`vocabulary`**, **`command`**, **`reply`** – what can be said to the TV
//!   and how to read its answers.
//! - **`wol`** – [`MacAddress`] and [`magic_packet`].

pub mod codec;
pub mod command;
pub mod keycode;
pub mod reply;
pub mod settings;
pub mod vocabulary;
pub mod wol;

pub use codec::{CodecError, EncryptedCodec, MessageCodec, PlainCodec};
pub use keycode::Keycode;
pub use reply::{AppDetails, ParseError};
pub use settings::{KeyDigest, Settings, SettingsError};
pub use vocabulary::{
    App, EnergySavingLevel, Input, Key, MacInterface, PictureMode, PowerState, ScreenMuteMode,
    UnknownVariant,
};
pub use wol::{magic_packet, MacAddress, MacAddressError};
