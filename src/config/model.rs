//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a default so the client works without a config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::nickname::generate_nickname;
use crate::client::ClientOptions;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

/// Where to connect and who to be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "generate_nickname")]
    pub nickname: String,
    /// Channel joined after the first nickname and used for plain-text input.
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default)]
    pub auto_connect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            nickname: generate_nickname(),
            channel: default_channel(),
            auto_connect: false,
        }
    }
}

/// Socket timeouts, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub send_timeout_secs: u64,
    /// `0` disables the receive timeout.
    #[serde(default = "default_timeout_secs")]
    pub receive_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_timeout_secs(),
            send_timeout_secs: default_timeout_secs(),
            receive_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectionConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            send_timeout: Duration::from_secs(self.send_timeout_secs),
            receive_timeout: match self.receive_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            ..ClientOptions::default()
        }
    }
}

/// Chat transcript settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_transcript_dir")]
    pub dir: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_transcript_dir(),
        }
    }
}

impl TranscriptConfig {
    /// The transcript directory with a leading `~` expanded.
    pub fn resolved_dir(&self) -> PathBuf {
        match self.dir.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => PathBuf::from(&self.dir),
            },
            None => PathBuf::from(&self.dir),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    6667
}
fn default_channel() -> String {
    "#main".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_transcript_dir() -> String {
    "~/.local/share/linechat/logs".to_string()
}
