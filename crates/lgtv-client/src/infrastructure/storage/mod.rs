//! Storage infrastructure: the optional configuration file.
//!
//! The `config` sub-module reads the TOML file describing which TV to talk to
//! and which protocol settings to override.  Credentials are deliberately
//! absent from the schema; the keycode is supplied per invocation.

pub mod config;
