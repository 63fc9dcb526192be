use std::io;

use thiserror::Error;

/// Errors surfaced by [`Client`](super::Client) operations.
///
/// Only connection establishment and sending report errors. Anything that
/// happens on the receive side after connecting ends the receive loop and is
/// reported as a [`ClosedEvent`](crate::protocol::ClosedEvent).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("timed out connecting to {addr}")]
    ConnectTimeout { addr: String },

    #[error("already connected")]
    AlreadyConnected,

    #[error("client has been disposed")]
    Disposed,

    #[error("not connected")]
    NotConnected,

    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    #[error("send timed out")]
    SendTimeout,
}

impl ClientError {
    /// True for failures of the initial handshake.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ClientError::Connect { .. } | ClientError::ConnectTimeout { .. }
        )
    }
}
