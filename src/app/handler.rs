//! Turns user input and client events into output lines and [`Action`]s.
//!
//! The handler never touches the network; the main loop executes the
//! returned actions and reports their outcome back through the state.

use crate::app::action::Action;
use crate::app::commands::{parse_command, parse_host_port, AddressError, ParsedCommand};
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use linechat::protocol::ClientEvent;

const HELP: &[&str] = &[
    "Commands:",
    "  /connect <host[:port]>   connect to a server",
    "  /nick <name>             set your nickname (the first one also joins the channel)",
    "  /join <channel>          join a channel",
    "  /msg <target> <text>     send a private message",
    "  /raw <line>              send a raw protocol line",
    "  /topic                   show the current channel topic",
    "  /quit                    disconnect and exit",
    "Anything else is sent to the current channel.",
];

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Input(line) => handle_input(state, &line),
        AppEvent::InputClosed => {
            state.should_quit = true;
            vec![Action::Quit]
        }
        AppEvent::Client(event) => {
            handle_client_event(state, event);
            Vec::new()
        }
    }
}

fn handle_input(state: &mut AppState, line: &str) -> Vec<Action> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    if line.starts_with('/') {
        let Some(cmd) = parse_command(line) else {
            state.log(format!("* Unknown command: {}. Type /help for a list.", line));
            return Vec::new();
        };
        return handle_command(state, cmd);
    }

    if state.session.connected && state.session.nick_set {
        let nick = state.session.nickname.clone();
        state.log(format!("[{}] {}", nick, line));
        vec![Action::Msg {
            target: state.server.channel.clone(),
            text: line.to_string(),
        }]
    } else {
        state.log("Please connect and set your nick first.");
        Vec::new()
    }
}

fn handle_command(state: &mut AppState, cmd: ParsedCommand) -> Vec<Action> {
    match cmd {
        ParsedCommand::Connect { addr } => {
            if state.session.connected {
                state.log("* You are already connected.");
                return Vec::new();
            }
            match parse_host_port(&addr, state.server.port) {
                Ok((host, port)) => {
                    state.log(format!("Connecting to server: {}/{}", host, port));
                    vec![Action::Connect { host, port }]
                }
                Err(AddressError::InvalidPort) => {
                    state.log("* Invalid port! Must be a number.");
                    Vec::new()
                }
                Err(AddressError::MissingHost) => {
                    state.log("* Usage: /connect <host[:port]>");
                    Vec::new()
                }
            }
        }
        ParsedCommand::Quit => {
            state.should_quit = true;
            vec![Action::Quit]
        }
        ParsedCommand::Help => {
            for line in HELP {
                state.log(line);
            }
            Vec::new()
        }
        ParsedCommand::Topic => {
            match state.topic.clone() {
                Some(topic) => state.log(format!("* Topic: {}", topic)),
                None => state.log("* No topic set."),
            }
            Vec::new()
        }
        _ if !state.session.connected => {
            state.log("* Not connected. Use /connect <host[:port]> first.");
            Vec::new()
        }
        ParsedCommand::Nick { nick } => {
            if state.session.nick_set {
                let prev = state.session.nickname.clone();
                state.log(format!("* {} is now known as {}", prev, nick));
                vec![Action::Nick { nick, join: None }]
            } else {
                vec![Action::Nick {
                    nick,
                    join: Some(state.server.channel.clone()),
                }]
            }
        }
        ParsedCommand::Join { channel } => vec![Action::Join { channel }],
        ParsedCommand::Msg { target, text } => vec![Action::Msg { target, text }],
        ParsedCommand::Raw { line } => vec![Action::Raw { line }],
    }
}

fn handle_client_event(state: &mut AppState, event: ClientEvent) {
    match event {
        ClientEvent::Names(names) => {
            state.log(format!("* Users in this channel: {}", names));
        }
        ClientEvent::Unhandled(unhandled) => {
            state.log(format!("* Unhandled: {}", unhandled.raw));
        }
        ClientEvent::Message(msg) => {
            state.log(format!("[{}] {}", msg.sender, msg.message));
        }
        ClientEvent::Topic(topic) => {
            if topic.channel == state.server.channel {
                state.log(format!("* Topic: {}", topic.topic));
                state.topic = Some(topic.topic);
            }
        }
        ClientEvent::Closed(closed) => {
            state.session.connected = false;
            state.log(format!("* Disconnected ({}).", closed.reason));
        }
    }
}
