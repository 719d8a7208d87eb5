//! Application layer for the client library.
//!
//! - **`session`** – one request/one reply over a [`RequestChannel`]
//!   (`session::RequestChannel`), with codec and `OK` handling.
//! - **`control_tv`** – [`LgTv`](control_tv::LgTv), the remote-control API
//!   built on a session.

pub mod control_tv;
pub mod session;
