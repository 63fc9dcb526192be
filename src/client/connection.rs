//! Connection state shared between the client handle and its receive loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::dispatch::EventDispatcher;
use super::error::ClientError;
use crate::protocol::{ClientEvent, CloseReason, ClosedEvent, Command};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;

/// Socket tuning for a [`Client`](super::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    pub send_timeout: Duration,
    /// Longest wait for the next inbound line. `None` waits forever.
    pub receive_timeout: Option<Duration>,
    /// Inbound lines longer than this end the connection.
    pub max_line_length: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            send_timeout: DEFAULT_TIMEOUT,
            receive_timeout: Some(DEFAULT_TIMEOUT),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// The nickname the client has announced.
///
/// `nick_set` turns true on the first NICK and stays true afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub nickname: String,
    pub nick_set: bool,
}

pub(crate) struct Shared {
    pub options: ClientOptions,
    pub dispatcher: EventDispatcher,
    pub cancel: CancellationToken,
    pub identity: RwLock<Identity>,
    pub endpoint: RwLock<Option<String>>,
    pub receiver: Mutex<Option<JoinHandle<()>>>,
    connected: AtomicBool,
    writer: tokio::sync::Mutex<Option<OwnedWriteHalf>>,
}

impl Shared {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            dispatcher: EventDispatcher::new(),
            cancel: CancellationToken::new(),
            identity: RwLock::new(Identity::default()),
            endpoint: RwLock::new(None),
            receiver: Mutex::new(None),
            connected: AtomicBool::new(false),
            writer: tokio::sync::Mutex::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Open the stream socket within the connect timeout.
    pub async fn open(&self, host: &str, port: u16) -> Result<TcpStream, ClientError> {
        let addr = format!("{}:{}", host, port);
        info!(%addr, "connecting");
        match tokio::time::timeout(self.options.connect_timeout, TcpStream::connect((host, port)))
            .await
        {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(ClientError::Connect { addr, source }),
            Err(_) => Err(ClientError::ConnectTimeout { addr }),
        }
    }

    /// Install the write half of a fresh connection and mark it live.
    ///
    /// Only succeeds while disconnected. The flag is cleared solely by
    /// [`Shared::finish`] and [`Shared::release`], both under the writer lock,
    /// so a previous receive loop is always done with the slot by now.
    pub async fn attach(&self, writer: OwnedWriteHalf) -> Result<(), ClientError> {
        let mut slot = self.writer.lock().await;
        if self.is_disposed() {
            return Err(ClientError::Disposed);
        }
        if self.is_connected() {
            return Err(ClientError::AlreadyConnected);
        }
        *slot = Some(writer);
        self.connected.store(true, Ordering::Release);
        Ok(())
    }

    /// Called by the receive loop as it exits: mark the client disconnected,
    /// drop the write half, then report the close.
    pub async fn finish(&self, reason: CloseReason) {
        {
            let mut slot = self.writer.lock().await;
            self.connected.store(false, Ordering::Release);
            slot.take();
        }
        info!(%reason, "connection closed");
        self.dispatcher
            .dispatch(&ClientEvent::Closed(ClosedEvent { reason }));
    }

    /// Write one command followed by CRLF and flush it.
    pub async fn send(&self, command: &Command) -> Result<(), ClientError> {
        if self.is_disposed() {
            return Err(ClientError::Disposed);
        }
        let line = command.to_wire();
        let mut slot = self.writer.lock().await;
        let writer = slot.as_mut().ok_or(ClientError::NotConnected)?;
        debug!(line = %command, "send");
        let write = async {
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await
        };
        match tokio::time::timeout(self.options.send_timeout, write).await {
            Ok(result) => result.map_err(ClientError::Send),
            Err(_) => Err(ClientError::SendTimeout),
        }
    }

    /// Shut down and drop the write half, if any. Errors are logged and suppressed.
    pub async fn release(&self) {
        let mut slot = self.writer.lock().await;
        if let Some(mut writer) = slot.take() {
            if let Err(e) = writer.shutdown().await {
                debug!(error = %e, "error shutting down socket");
            }
        }
        self.connected.store(false, Ordering::Release);
    }
}
