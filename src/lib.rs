//! Client for a minimal line-oriented text chat protocol.
//!
//! - [`client`]: connection lifecycle, background receive loop, event
//!   subscription and outbound commands.
//! - [`protocol`]: the line classifier, typed events and wire formatting.
//! - [`config`]: TOML configuration for the `linechat` binary.
//! - [`transcript`]: optional on-disk chat transcripts.

pub mod client;
pub mod config;
pub mod protocol;
pub mod transcript;
