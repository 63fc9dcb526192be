//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler can act on.

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedCommand {
    Connect { addr: String },
    Nick { nick: String },
    Join { channel: String },
    Msg { target: String, text: String },
    Raw { line: String },
    Topic,
    Quit,
    Help,
}

/// Why a `host:port` address was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum AddressError {
    MissingHost,
    InvalidPort,
}

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`, is not a recognized
/// command, or lacks a required argument. Command names are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    let body = input.strip_prefix('/')?;

    let parts: Vec<&str> = body.splitn(3, ' ').collect();
    let cmd = parts.first()?.to_lowercase();
    let arg = |i: usize| parts.get(i).map(|s| s.trim()).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "connect" | "server" => {
            let addr = arg(1)?.to_string();
            Some(ParsedCommand::Connect { addr })
        }
        "nick" => {
            let nick = arg(1)?.to_string();
            Some(ParsedCommand::Nick { nick })
        }
        "join" | "j" => {
            let channel = arg(1)?;
            let channel = if channel.starts_with('#') {
                channel.to_string()
            } else {
                format!("#{}", channel)
            };
            Some(ParsedCommand::Join { channel })
        }
        "msg" | "query" => {
            let target = arg(1)?.to_string();
            let text = parts.get(2).unwrap_or(&"").to_string();
            Some(ParsedCommand::Msg { target, text })
        }
        "raw" | "quote" => {
            let line = body.split_once(' ')?.1.trim();
            if line.is_empty() {
                return None;
            }
            Some(ParsedCommand::Raw {
                line: line.to_string(),
            })
        }
        "topic" => Some(ParsedCommand::Topic),
        "quit" | "exit" => Some(ParsedCommand::Quit),
        "help" | "h" => Some(ParsedCommand::Help),
        _ => None,
    }
}

/// Split a `host[:port]` address. Without a port, `default_port` is used.
pub fn parse_host_port(addr: &str, default_port: u16) -> Result<(String, u16), AddressError> {
    let (host, port) = match addr.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse().map_err(|_| AddressError::InvalidPort)?;
            (host, port)
        }
        None => (addr, default_port),
    };
    if host.is_empty() {
        return Err(AddressError::MissingHost);
    }
    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connect() {
        assert_eq!(
            parse_command("/connect localhost:6667"),
            Some(ParsedCommand::Connect {
                addr: "localhost:6667".into()
            })
        );
        assert_eq!(parse_command("/connect"), None);
    }

    #[test]
    fn test_parse_nick_and_join() {
        assert_eq!(
            parse_command("/NICK bob"),
            Some(ParsedCommand::Nick { nick: "bob".into() })
        );
        assert_eq!(
            parse_command("/join lobby"),
            Some(ParsedCommand::Join {
                channel: "#lobby".into()
            })
        );
        assert_eq!(
            parse_command("/j #main"),
            Some(ParsedCommand::Join {
                channel: "#main".into()
            })
        );
    }

    #[test]
    fn test_parse_msg_keeps_text() {
        assert_eq!(
            parse_command("/msg alice hello there: friend"),
            Some(ParsedCommand::Msg {
                target: "alice".into(),
                text: "hello there: friend".into()
            })
        );
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(
            parse_command("/raw WHO #main now"),
            Some(ParsedCommand::Raw {
                line: "WHO #main now".into()
            })
        );
        assert_eq!(parse_command("/raw"), None);
        assert_eq!(parse_command("/raw   "), None);
    }

    #[test]
    fn test_not_a_command() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/bogus"), None);
        assert_eq!(parse_command("/quit"), Some(ParsedCommand::Quit));
        assert_eq!(parse_command("/help"), Some(ParsedCommand::Help));
        assert_eq!(parse_command("/TOPIC"), Some(ParsedCommand::Topic));
    }

    #[test]
    fn test_parse_host_port() {
        assert_eq!(
            parse_host_port("chat.example.org:7000", 6667),
            Ok(("chat.example.org".into(), 7000))
        );
        assert_eq!(
            parse_host_port("chat.example.org", 6667),
            Ok(("chat.example.org".into(), 6667))
        );
        assert_eq!(
            parse_host_port("host:abc", 6667),
            Err(AddressError::InvalidPort)
        );
        assert_eq!(parse_host_port(":7000", 6667), Err(AddressError::MissingHost));
    }
}
