//! Chat client: connection lifecycle, outbound commands, and event subscription.
//!
//! A [`Client`] starts disconnected. [`Client::connect`] opens the socket and
//! spawns a receive loop that classifies each inbound line and hands the
//! resulting event to the registered subscribers, on the receive task, in
//! arrival order. When that loop ends for any reason the client is marked
//! disconnected and a single [`ClosedEvent`] is dispatched.
//!
//! ```no_run
//! # async fn demo() -> Result<(), linechat::client::ClientError> {
//! use linechat::client::Client;
//!
//! let client = Client::new();
//! client.on_message(|m| println!("[{}] {}", m.sender, m.message));
//! client.connect_as("127.0.0.1", 6667, "bob", Some("#main")).await?;
//! client.msg("#main", "hello").await?;
//! client.dispose().await;
//! # Ok(())
//! # }
//! ```

mod connection;
mod dispatch;
mod error;
mod receiver;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::DropGuard;
use tracing::{debug, info};

pub use connection::{ClientOptions, Identity};
pub use dispatch::EventDispatcher;
pub use error::ClientError;

use crate::protocol::{
    ClientEvent, ClosedEvent, Command, NamesEvent, PrivateMessageEvent, TopicEvent, UnhandledEvent,
};
use connection::Shared;

/// Handle to a chat connection. Cheap to clone; all clones share one
/// connection. Dropping the last clone cancels the receive loop.
#[derive(Clone)]
pub struct Client {
    shared: Arc<Shared>,
    _guard: Arc<DropGuard>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Self {
        let shared = Arc::new(Shared::new(options));
        let guard = shared.cancel.clone().drop_guard();
        Self {
            shared,
            _guard: Arc::new(guard),
        }
    }

    /// Open the connection and start the receive loop.
    ///
    /// Fails with [`ClientError::Connect`] or [`ClientError::ConnectTimeout`]
    /// if the socket cannot be opened; the client stays disconnected and
    /// nothing is retried. A client whose previous connection has closed may
    /// connect again.
    pub async fn connect(&self, host: &str, port: u16) -> Result<(), ClientError> {
        if self.shared.is_disposed() {
            return Err(ClientError::Disposed);
        }
        if self.shared.is_connected() {
            return Err(ClientError::AlreadyConnected);
        }

        let stream = self.shared.open(host, port).await?;
        let (read, write) = stream.into_split();
        self.shared.attach(write).await?;
        *self.shared.endpoint.write() = Some(format!("{}:{}", host, port));
        info!(host, port, "connected");

        let handle = tokio::spawn(receiver::run(self.shared.clone(), read));
        *self.shared.receiver.lock() = Some(handle);
        Ok(())
    }

    /// Connect, announce `nickname`, and join `channel` if it is non-empty.
    pub async fn connect_as(
        &self,
        host: &str,
        port: u16,
        nickname: &str,
        channel: Option<&str>,
    ) -> Result<(), ClientError> {
        self.connect(host, port).await?;
        self.nick(nickname).await?;
        if let Some(channel) = channel.filter(|c| !c.is_empty()) {
            self.join(channel).await?;
        }
        Ok(())
    }

    /// Send `NICK <name>` and record it as the client's identity.
    pub async fn nick(&self, name: &str) -> Result<(), ClientError> {
        self.shared.send(&Command::Nick(name.to_string())).await?;
        let mut identity = self.shared.identity.write();
        identity.nickname = name.to_string();
        identity.nick_set = true;
        Ok(())
    }

    pub async fn join(&self, channel: &str) -> Result<(), ClientError> {
        self.shared.send(&Command::Join(channel.to_string())).await
    }

    pub async fn msg(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.shared
            .send(&Command::Privmsg {
                target: target.to_string(),
                text: text.to_string(),
            })
            .await
    }

    /// Send an arbitrary line. Build it with `format!` when it has arguments.
    pub async fn send(&self, line: impl Into<String>) -> Result<(), ClientError> {
        self.shared.send(&Command::Raw(line.into())).await
    }

    pub async fn send_command(&self, command: &Command) -> Result<(), ClientError> {
        self.shared.send(command).await
    }

    /// Cancel the receive loop, wait for it to exit, and release the socket.
    ///
    /// Safe to call any number of times. Never fails.
    pub async fn dispose(&self) {
        if self.shared.is_disposed() {
            return;
        }
        debug!("disposing client");
        self.shared.cancel.cancel();

        let handle = self.shared.receiver.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                debug!(error = %e, "receive task ended abnormally");
            }
        }
        self.shared.release().await;
    }

    pub fn is_connected(&self) -> bool {
        self.shared.is_connected()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    pub fn nick_set(&self) -> bool {
        self.shared.identity.read().nick_set
    }

    pub fn nickname(&self) -> String {
        self.shared.identity.read().nickname.clone()
    }

    pub fn identity(&self) -> Identity {
        self.shared.identity.read().clone()
    }

    /// `host:port` of the most recent successful connection.
    pub fn endpoint(&self) -> Option<String> {
        self.shared.endpoint.read().clone()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.shared.options
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.shared.dispatcher
    }

    pub fn on_topic(&self, handler: impl Fn(&TopicEvent) + Send + Sync + 'static) {
        self.shared.dispatcher.on_topic(handler);
    }

    pub fn on_names(&self, handler: impl Fn(&NamesEvent) + Send + Sync + 'static) {
        self.shared.dispatcher.on_names(handler);
    }

    pub fn on_message(&self, handler: impl Fn(&PrivateMessageEvent) + Send + Sync + 'static) {
        self.shared.dispatcher.on_message(handler);
    }

    pub fn on_unhandled(&self, handler: impl Fn(&UnhandledEvent) + Send + Sync + 'static) {
        self.shared.dispatcher.on_unhandled(handler);
    }

    pub fn on_closed(&self, handler: impl Fn(&ClosedEvent) + Send + Sync + 'static) {
        self.shared.dispatcher.on_closed(handler);
    }

    /// Receive every event through a channel instead of callbacks.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ClientEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared.dispatcher.forward_to(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_client_is_disconnected() {
        let client = Client::new();
        assert!(!client.is_connected());
        assert!(!client.nick_set());
        assert_eq!(client.nickname(), "");
        assert_eq!(client.endpoint(), None);
        assert_eq!(client.options(), &ClientOptions::default());
    }

    #[tokio::test]
    async fn test_send_before_connect_fails() {
        let client = Client::new();
        assert!(matches!(
            client.send("PING").await,
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(
            client.nick("bob").await,
            Err(ClientError::NotConnected)
        ));
        assert!(!client.nick_set());
    }

    #[tokio::test]
    async fn test_dispose_before_connect() {
        let client = Client::new();
        client.dispose().await;
        client.dispose().await;
        assert!(client.is_disposed());
        assert!(matches!(
            client.connect("127.0.0.1", 1).await,
            Err(ClientError::Disposed)
        ));
        assert!(matches!(
            client.msg("#main", "hi").await,
            Err(ClientError::Disposed)
        ));
    }

    #[tokio::test]
    async fn test_subscribe_registers_every_kind() {
        let client = Client::new();
        let _rx = client.subscribe();
        assert_eq!(client.events().handler_count(), 5);
    }
}
