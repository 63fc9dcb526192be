//! Typed events produced from inbound protocol lines.
//!
//! Each event corresponds to exactly one received line (or, for
//! [`ClosedEvent`], to the end of a connection) and is handed to subscribers
//! by reference for the duration of a single dispatch.

use std::fmt;

/// A channel topic announced by the server (`server TOPIC <channel> :<topic>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEvent {
    pub channel: String,
    pub topic: String,
}

/// A channel member list announced by the server (`server NAMES <channel> :<names>`).
///
/// Names keep the order they had on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesEvent {
    pub channel: String,
    pub names: Vec<String>,
}

impl fmt::Display for NamesEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(", "))
    }
}

/// A message sent by `sender` to a channel or user (`<sender> PRIVMSG <target> :<message>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessageEvent {
    pub sender: String,
    pub target: String,
    pub message: String,
}

/// A line with a command the client has no mapping for, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledEvent {
    pub raw: String,
}

/// Why a receive loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed the stream.
    PeerClosed,
    /// No line arrived within the receive timeout.
    TimedOut,
    /// Reading or decoding a line failed.
    ReadFailed(String),
    /// The client was disposed.
    Disposed,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::PeerClosed => f.write_str("closed by peer"),
            CloseReason::TimedOut => f.write_str("receive timed out"),
            CloseReason::ReadFailed(e) => write!(f, "read failed: {}", e),
            CloseReason::Disposed => f.write_str("disposed"),
        }
    }
}

/// Emitted once when a connection's receive loop ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedEvent {
    pub reason: CloseReason,
}

/// Every event kind the client emits, as a single tagged value.
///
/// Used by consumers that prefer one channel over per-kind callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Topic(TopicEvent),
    Names(NamesEvent),
    Message(PrivateMessageEvent),
    Unhandled(UnhandledEvent),
    Closed(ClosedEvent),
}
