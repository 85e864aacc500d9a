//! Line-delimited JSON transport for driving the bot from a terminal or a
//! script.
//!
//! Each input line is one [`InboundEvent`]:
//!
//! ```text
//! {"user": {"id": 42, "handle": "alice"}, "text": "/food Pizza"}
//! ```
//!
//! Every event is handled on its own task. Replies go through a single writer
//! task so blocks from concurrent events never interleave; each block ends
//! with a blank line.

use crate::commands::CommandHandler;
use crate::model::InboundEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

const REPLY_BUFFER: usize = 64;

/// Reads events until `reader` is exhausted, then waits for every in-flight
/// event and returns the writer.
///
/// Lines that are not UTF-8 or not a valid event are logged and skipped. A
/// read error stops intake, but events already accepted still get their
/// replies written before the error is returned.
pub async fn run<R, W>(handler: CommandHandler, mut reader: R, writer: W) -> std::io::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (reply_tx, reply_rx) = mpsc::channel::<String>(REPLY_BUFFER);
    let writer_task = tokio::spawn(write_replies(reply_rx, writer));

    let mut events = JoinSet::new();
    let mut buf = Vec::new();
    let mut line_no: u64 = 0;
    let intake = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => line_no += 1,
            Err(e) => {
                error!(line = line_no + 1, error = %e, "Reading input failed");
                break Err(e);
            }
        }

        while let Some(result) = events.try_join_next() {
            log_finished(result);
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping non-UTF-8 line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let event: InboundEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed event");
                continue;
            }
        };
        debug!(?event, "Event received");

        let handler = handler.clone();
        let reply_tx = reply_tx.clone();
        events.spawn(async move {
            if let Some(reply) = handler.handle(&event).await {
                // Only fails once the writer has stopped on an I/O error.
                let _ = reply_tx.send(reply).await;
            }
        });
    };

    while let Some(result) = events.join_next().await {
        log_finished(result);
    }
    drop(reply_tx);
    info!(lines = line_no, "Input closed");

    let writer = writer_task
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
    intake.map(|()| writer)
}

fn log_finished(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!("Event task failed: {:?}", e);
    }
}

async fn write_replies<W>(mut replies: mpsc::Receiver<String>, mut writer: W) -> std::io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = replies.recv().await {
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n\n").await?;
        writer.flush().await?;
    }
    Ok(writer)
}
