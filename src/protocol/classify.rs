//! Inbound line classifier.
//!
//! Turns one trimmed protocol line into at most one typed event. Tokens are
//! split on the space character only, and every payload is taken from the
//! text after the first `:` in the line.
//!
//! Rules, first match wins:
//!
//! 1. `PING` on its own is answered with `PONG` and produces no event.
//! 2. `server TOPIC <channel> :<topic>` and `server NAMES <channel> :<names>`.
//!    Any other subcommand from `server` falls through to rule 3 with the
//!    same second token.
//! 3. `<sender> PRIVMSG <target> :<message>`.
//! 4. Any other line with at least two tokens is unhandled.
//! 5. Shorter lines are ignored.

use super::event::{ClientEvent, NamesEvent, PrivateMessageEvent, TopicEvent, UnhandledEvent};

/// Sender token that marks server-originated metadata lines.
pub const SERVER_SENDER: &str = "server";

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Keepalive probe; the caller must answer with `PONG`.
    Ping,
    /// A line that maps to exactly one event.
    Event(ClientEvent),
    /// A line with fewer than two tokens.
    Ignored,
}

/// Classify a single inbound line. Surrounding whitespace is trimmed first.
pub fn classify(line: &str) -> Classified {
    let line = line.trim();
    if line == "PING" {
        return Classified::Ping;
    }

    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 2 {
        return Classified::Ignored;
    }
    let sender = parts[0];
    let command = parts[1];
    // An empty channel or target (doubled space) counts as missing.
    let third = parts.get(2).copied().filter(|t| !t.is_empty());

    if sender == SERVER_SENDER {
        match (command, third) {
            ("TOPIC", Some(channel)) => {
                return Classified::Event(ClientEvent::Topic(TopicEvent {
                    channel: channel.to_string(),
                    topic: payload(line).to_string(),
                }));
            }
            ("NAMES", Some(channel)) => {
                let names = payload(line)
                    .split(' ')
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .collect();
                return Classified::Event(ClientEvent::Names(NamesEvent {
                    channel: channel.to_string(),
                    names,
                }));
            }
            // Unknown server subcommands are matched again as ordinary commands.
            _ => {}
        }
    }

    match (command, third) {
        ("PRIVMSG", Some(target)) => Classified::Event(ClientEvent::Message(PrivateMessageEvent {
            sender: sender.to_string(),
            target: target.to_string(),
            message: payload(line).to_string(),
        })),
        _ => Classified::Event(ClientEvent::Unhandled(UnhandledEvent {
            raw: line.to_string(),
        })),
    }
}

/// Text after the first `:`, trimmed. Without a `:` the whole line is the payload.
fn payload(line: &str) -> &str {
    match line.find(':') {
        Some(idx) => line[idx + 1..].trim(),
        None => line.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> ClientEvent {
        match classify(line) {
            Classified::Event(e) => e,
            other => panic!("expected an event for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_topic() {
        assert_eq!(
            event("server TOPIC #main :Welcome to the lobby"),
            ClientEvent::Topic(TopicEvent {
                channel: "#main".into(),
                topic: "Welcome to the lobby".into(),
            })
        );
    }

    #[test]
    fn test_names_preserve_order() {
        assert_eq!(
            event("server NAMES #main :alice bob carol"),
            ClientEvent::Names(NamesEvent {
                channel: "#main".into(),
                names: vec!["alice".into(), "bob".into(), "carol".into()],
            })
        );
    }

    #[test]
    fn test_names_skip_empty_entries() {
        let ClientEvent::Names(names) = event("server NAMES #main :alice  bob ") else {
            panic!("expected names");
        };
        assert_eq!(names.names, vec!["alice", "bob"]);

        let ClientEvent::Names(names) = event("server NAMES #empty :") else {
            panic!("expected names");
        };
        assert!(names.names.is_empty());
    }

    #[test]
    fn test_privmsg() {
        assert_eq!(
            event("alice PRIVMSG #main :hello there"),
            ClientEvent::Message(PrivateMessageEvent {
                sender: "alice".into(),
                target: "#main".into(),
                message: "hello there".into(),
            })
        );
    }

    #[test]
    fn test_privmsg_keeps_later_colons() {
        let ClientEvent::Message(msg) = event("bob PRIVMSG carol :time is 12:30: sharp") else {
            panic!("expected message");
        };
        assert_eq!(msg.message, "time is 12:30: sharp");
        assert_eq!(msg.target, "carol");
    }

    #[test]
    fn test_unknown_command_is_unhandled() {
        assert_eq!(
            event("FOO BAR baz"),
            ClientEvent::Unhandled(UnhandledEvent {
                raw: "FOO BAR baz".into()
            })
        );
    }

    #[test]
    fn test_ping() {
        assert_eq!(classify("PING"), Classified::Ping);
        assert_eq!(classify("  PING\r\n"), Classified::Ping);
    }

    #[test]
    fn test_ping_with_argument_is_not_ping() {
        assert!(matches!(
            classify("PING server1"),
            Classified::Event(ClientEvent::Unhandled(_))
        ));
    }

    #[test]
    fn test_short_lines_ignored() {
        assert_eq!(classify(""), Classified::Ignored);
        assert_eq!(classify("hello"), Classified::Ignored);
        assert_eq!(classify("   "), Classified::Ignored);
    }

    #[test]
    fn test_server_unknown_subcommand_falls_through() {
        assert_eq!(
            event("server PRIVMSG #main :maintenance at noon"),
            ClientEvent::Message(PrivateMessageEvent {
                sender: "server".into(),
                target: "#main".into(),
                message: "maintenance at noon".into(),
            })
        );
        assert!(matches!(
            event("server MOTD :hi"),
            ClientEvent::Unhandled(UnhandledEvent { raw }) if raw == "server MOTD :hi"
        ));
    }

    #[test]
    fn test_topic_only_from_server() {
        assert!(matches!(
            event("alice TOPIC #main :nope"),
            ClientEvent::Unhandled(_)
        ));
    }

    #[test]
    fn test_missing_channel_or_target_is_unhandled() {
        assert!(matches!(event("server TOPIC"), ClientEvent::Unhandled(_)));
        assert!(matches!(event("server NAMES"), ClientEvent::Unhandled(_)));
        assert!(matches!(event("alice PRIVMSG"), ClientEvent::Unhandled(_)));
    }

    #[test]
    fn test_empty_channel_or_target_is_unhandled() {
        assert_eq!(
            event("server TOPIC  :x"),
            ClientEvent::Unhandled(UnhandledEvent {
                raw: "server TOPIC  :x".into()
            })
        );
        assert!(matches!(event("server NAMES  :a b"), ClientEvent::Unhandled(_)));
        assert!(matches!(event("alice PRIVMSG  :x"), ClientEvent::Unhandled(_)));
    }

    #[test]
    fn test_split_on_single_space_only() {
        // A tab is not a separator, so this is one token.
        assert_eq!(classify("alice\tPRIVMSG"), Classified::Ignored);
    }

    #[test]
    fn test_payload_without_colon_uses_line() {
        let ClientEvent::Topic(topic) = event("server TOPIC #main") else {
            panic!("expected topic");
        };
        assert_eq!(topic.topic, "server TOPIC #main");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            event("  FOO BAR  \r"),
            ClientEvent::Unhandled(UnhandledEvent {
                raw: "FOO BAR".into()
            })
        );
    }
}
