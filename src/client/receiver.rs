//! Background line receiver.
//!
//! One task per connection reads lines, classifies them and dispatches the
//! resulting events before reading the next line, so events reach
//! subscribers in arrival order. Any timeout, read error or end of stream
//! ends the loop for good; there is no retry.
//!
//! Lines are split on `\n` as raw bytes and decoded lossily, so a stray
//! non-UTF-8 byte turns into U+FFFD instead of dropping the connection.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::time::error::Elapsed;
use tokio_util::bytes::Bytes;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead};
use tracing::{debug, trace, warn};

use super::connection::Shared;
use crate::protocol::{classify, Classified, CloseReason, Command};

type Lines = FramedRead<OwnedReadHalf, AnyDelimiterCodec>;

pub(crate) async fn run(shared: Arc<Shared>, read: OwnedReadHalf) {
    let mut lines = FramedRead::new(
        read,
        AnyDelimiterCodec::new_with_max_length(
            b"\n".to_vec(),
            b"\n".to_vec(),
            shared.options.max_line_length,
        ),
    );
    let cancel = shared.cancel.clone();
    let receive_timeout = shared.options.receive_timeout;

    let reason = loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break CloseReason::Disposed,
            next = next_line(&mut lines, receive_timeout) => next,
        };

        let line = match next {
            Ok(Some(Ok(chunk))) => decode_line(&chunk),
            Ok(Some(Err(e))) => {
                warn!(error = %e, "read failed");
                break CloseReason::ReadFailed(e.to_string());
            }
            Ok(None) => break CloseReason::PeerClosed,
            Err(_) => break CloseReason::TimedOut,
        };

        trace!(%line, "recv");
        match classify(&line) {
            Classified::Ping => {
                if let Err(e) = shared.send(&Command::Pong).await {
                    warn!(error = %e, "failed to answer PING");
                }
            }
            Classified::Event(event) => {
                debug!(?event, "dispatch");
                shared.dispatcher.dispatch(&event);
            }
            Classified::Ignored => debug!(%line, "ignored short line"),
        }
    };

    shared.finish(reason).await;
}

async fn next_line(
    lines: &mut Lines,
    receive_timeout: Option<Duration>,
) -> Result<Option<Result<Bytes, AnyDelimiterCodecError>>, Elapsed> {
    match receive_timeout {
        Some(limit) => tokio::time::timeout(limit, lines.next()).await,
        None => Ok(lines.next().await),
    }
}

/// Decode one frame, replacing invalid UTF-8 and dropping a trailing `\r`.
fn decode_line(chunk: &[u8]) -> String {
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    String::from_utf8_lossy(chunk).into_owned()
}
