//! Infrastructure layer for the client library.
//!
//! # Sub-modules
//!
//! - **`network`** – the TCP control channel to the TV and the UDP
//!   wake-on-LAN sender.
//!
//! - **`storage`** – the optional TOML file holding the TV's address, MAC and
//!   protocol setting overrides.  It never stores the keycode.

pub mod network;
pub mod storage;
