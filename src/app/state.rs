use linechat::config::ServerConfig;

/// Snapshot of the client's connection flags, refreshed before each event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub connected: bool,
    pub nick_set: bool,
    pub nickname: String,
}

pub struct AppState {
    pub server: ServerConfig,
    pub session: Session,
    pub topic: Option<String>,
    /// Rendered lines waiting to be written to the terminal.
    pub output: Vec<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(server: ServerConfig) -> Self {
        Self {
            server,
            session: Session::default(),
            topic: None,
            output: Vec::new(),
            should_quit: false,
        }
    }

    /// Queue a line for output. Lines starting with `*` are notices and keep
    /// a single `* ` marker; everything else is indented.
    pub fn log(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        let line = if msg.starts_with('*') {
            format!("* {}", msg.trim_start_matches(['*', ' ']))
        } else {
            format!("  {}", msg)
        };
        self.output.push(line);
    }

    pub fn drain_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}
