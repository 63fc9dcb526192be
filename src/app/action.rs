/// Work the handler asks the main loop to perform against the client.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Connect { host: String, port: u16 },
    /// Set the nickname, then join `join` if given.
    Nick { nick: String, join: Option<String> },
    Join { channel: String },
    Msg { target: String, text: String },
    Raw { line: String },
    Quit,
}
