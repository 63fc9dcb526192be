//! Outbound protocol lines.
//!
//! Arguments are written as given: nothing checks for embedded CR/LF, so
//! callers are responsible for well-formed input.

use std::fmt;

/// Line terminator appended to every outbound line.
pub const LINE_ENDING: &str = "\r\n";

/// A line the client can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nick(String),
    Join(String),
    Privmsg { target: String, text: String },
    Pong,
    Raw(String),
}

impl Command {
    /// The full wire form, including the CRLF terminator.
    pub fn to_wire(&self) -> String {
        format!("{}{}", self, LINE_ENDING)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Nick(name) => write!(f, "NICK {}", name),
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Privmsg { target, text } => write!(f, "PRIVMSG {} {}", target, text),
            Command::Pong => f.write_str("PONG"),
            Command::Raw(line) => f.write_str(line),
        }
    }
}
