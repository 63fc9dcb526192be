mod app;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::{AppState, Session};
use anyhow::Result;
use linechat::client::Client;
use linechat::config::{self, AppConfig};
use linechat::transcript::Transcript;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linechat=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = config::load_config(config_path.as_deref())?;

    run_app(cfg).await
}

async fn run_app(cfg: AppConfig) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let client = Client::with_options(cfg.connection.client_options());
    let mut state = AppState::new(cfg.server.clone());
    let mut transcript = Transcript::new(&cfg.transcript);

    // Forward client events onto the main loop
    let mut client_rx = client.subscribe();
    let client_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = client_rx.recv().await {
            if client_tx.send(AppEvent::Client(event)).is_err() {
                break;
            }
        }
    });

    // Stdin is read on a plain thread so a pending read never holds up shutdown
    let input_tx = event_tx.clone();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
        let _ = input_tx.send(AppEvent::InputClosed);
    });
    drop(event_tx);

    if cfg.server.auto_connect {
        let srv = &cfg.server;
        state.log(format!("Connecting to server: {}/{}", srv.host, srv.port));
        match client
            .connect_as(&srv.host, srv.port, &srv.nickname, Some(&srv.channel))
            .await
        {
            Ok(()) => state.log(format!("Connected as {}.", srv.nickname)),
            Err(e) => {
                tracing::warn!(error = %e, "auto-connect failed");
                state.log("* Error: Could not connect to target.");
            }
        }
    } else {
        state.log("Type /connect <host[:port]> to begin, /help for commands.");
    }
    flush_output(&mut state)?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        if let AppEvent::Client(ref e) = event {
            transcript.record(e);
        }

        state.session = Session {
            connected: client.is_connected(),
            nick_set: client.nick_set(),
            nickname: client.nickname(),
        };
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            execute(&client, &mut state, action).await;
        }
        flush_output(&mut state)?;

        if state.should_quit {
            break;
        }
    }

    client.dispose().await;
    Ok(())
}

async fn execute(client: &Client, state: &mut AppState, action: Action) {
    let result = match action {
        Action::Connect { host, port } => match client.connect(&host, port).await {
            Ok(()) => {
                state.log("Connected. Set your nick by typing /nick <name>");
                Ok(())
            }
            Err(e) if e.is_connection_error() => {
                tracing::warn!(error = %e, "connect failed");
                state.log("* Error: Could not connect to target.");
                Ok(())
            }
            Err(e) => Err(e),
        },
        Action::Nick { nick, join } => match client.nick(&nick).await {
            Ok(()) => match join {
                Some(channel) => client.join(&channel).await,
                None => Ok(()),
            },
            Err(e) => Err(e),
        },
        Action::Join { channel } => client.join(&channel).await,
        Action::Msg { target, text } => client.msg(&target, &text).await,
        Action::Raw { line } => client.send(line).await,
        Action::Quit => Ok(()),
    };
    if let Err(e) = result {
        state.log(format!("* Error: {}", e));
    }
}

fn flush_output(state: &mut AppState) -> Result<()> {
    let lines = state.drain_output();
    if lines.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    Ok(())
}
