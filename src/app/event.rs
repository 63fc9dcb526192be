use linechat::protocol::ClientEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user
    Input(String),

    /// Standard input reached end of file
    InputClosed,

    /// Event from the chat connection
    Client(ClientEvent),
}
